//! Hand-frame sources: LeapMotion hardware and keyboard/mouse simulation.
//!
//! The public interface is [`HandFrame`] delivered over a `mpsc` channel.
//! Consumers don't need to know whether frames came from real hardware or
//! the keyboard simulator; both end up in the same classifier.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use gesture_map::synthetic::synthetic_frame;
use gesture_map::{DetectorConfig, HandFrame};

// ════════════════════════════════════════════════════════════════════════════
// GestureSource trait: unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandFrame`]s over a channel.
pub trait GestureSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandFrame>);
}

/// Spawn a gesture source on its own thread and return the receiving end.
pub fn spawn_gesture_source<G: GestureSource>(source: G) -> Receiver<HandFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand frames from a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Each tracked hand's bone joints are laid onto the 21-landmark layout and
/// projected onto the horizontal plane, as a camera looking down on the
/// device would see them: Leap `x` becomes image `x`, Leap `z` (toward the
/// user) becomes image `y`.  Extended fingers then point "up" the image and
/// the thumb comparison reads the same way as with a camera.
#[cfg(feature = "leap")]
pub struct LeapHandSource {
    pub detector: DetectorConfig,
}

#[cfg(feature = "leap")]
impl GestureSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                log::error!("failed to create LeapC connection: {:?}", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            log::error!("failed to open LeapMotion device: {:?}", e);
            return;
        }
        log::info!("LeapMotion connection open");

        let mut was_empty = false;
        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().map(|h| leap_hand(&h)).collect();
                // Only the first empty frame after a hand leaves matters.
                if hands.is_empty() && was_empty {
                    continue;
                }
                was_empty = hands.is_empty();
                if tx.send(self.detector.admit(HandFrame::new(hands))).is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(feature = "leap")]
fn leap_hand(hand: &leaprs::Hand) -> gesture_map::HandObservation {
    use gesture_map::landmarks::{LANDMARK_COUNT, WRIST};
    use gesture_map::{HandObservation, Handedness, Landmark};

    /// Millimetres mapped onto the unit image square.
    const SPAN_MM: f32 = 400.0;
    /// Typical palm height above the device.
    const PALM_HEIGHT_MM: f32 = 200.0;

    let project = |x: f32, y: f32, z: f32| {
        Landmark::new(0.5 + x / SPAN_MM, 0.5 + z / SPAN_MM, (PALM_HEIGHT_MM - y) / SPAN_MM)
    };

    let mut lm = vec![Landmark::default(); LANDMARK_COUNT];
    let palm = hand.palm().position();
    lm[WRIST] = project(palm.x, palm.y, palm.z);

    for (d, digit) in hand.digits().enumerate().take(5) {
        let base = 1 + d * 4;
        let joints = [
            digit.proximal().prev_joint(),
            digit.intermediate().prev_joint(),
            digit.distal().prev_joint(),
            digit.distal().next_joint(),
        ];
        for (k, j) in joints.iter().enumerate() {
            lm[base + k] = project(j.x, j.y, j.z);
        }
    }

    let handedness = if hand.hand_type() == leaprs::HandType::Left {
        Handedness::Left
    } else {
        Handedness::Right
    };
    HandObservation::new(handedness, lm)
}

// ════════════════════════════════════════════════════════════════════════════
// SimGestureSource: keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Show a hand with this many raised fingers (0–10).
    Fingers(u32),
    /// Hide or show the simulated hand.
    ToggleHand,
    /// Widen (`+`) or narrow (`−`) the pinch.
    Openness(f32),
    /// Hand position across the window, `0..=1`.
    HandX(f32),
    Quit,
}

/// Simulated hand pose, updated by [`SimInput`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimHand {
    pub present:  bool,
    pub fingers:  u32,
    pub openness: f32,
    pub hand_x:   f32,
}

impl Default for SimHand {
    fn default() -> Self {
        SimHand { present: false, fingers: 0, openness: 0.1, hand_x: 0.5 }
    }
}

/// Largest pinch the simulator produces; anything past 0.5 already gives
/// full scale.
const MAX_OPENNESS: f32 = 0.6;

impl SimHand {
    /// Apply one input.  Returns the frame to publish, or `None` on quit.
    pub fn apply(&mut self, input: SimInput) -> Option<HandFrame> {
        match input {
            SimInput::Fingers(n) => {
                self.fingers = n.min(10);
                self.present = true;
            }
            SimInput::ToggleHand => self.present = !self.present,
            SimInput::Openness(delta) => {
                self.openness = (self.openness + delta).clamp(0.0, MAX_OPENNESS);
            }
            SimInput::HandX(x) => self.hand_x = x.clamp(0.0, 1.0),
            SimInput::Quit => return None,
        }
        Some(self.frame())
    }

    pub fn frame(&self) -> HandFrame {
        if self.present {
            synthetic_frame(self.fingers, self.openness, self.hand_x)
        } else {
            HandFrame::empty()
        }
    }
}

/// Gesture source driven by [`SimInput`] events from the visualizer window.
///
/// The visualizer sends `SimInput`s here; this translator turns them into
/// full landmark frames so the real classifier runs in simulation too.
pub struct SimGestureSource {
    pub rx:       Receiver<SimInput>,
    pub detector: DetectorConfig,
}

impl GestureSource for SimGestureSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        let mut hand = SimHand::default();
        for input in self.rx {
            let Some(frame) = hand.apply(input) else { return };
            if tx.send(self.detector.admit(frame)).is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_map::GestureClassifier;

    #[test]
    fn digit_shows_hand() {
        let mut h = SimHand::default();
        assert!(h.frame().is_empty());
        let f = h.apply(SimInput::Fingers(7)).unwrap();
        assert_eq!(f.hands.len(), 2);
        assert_eq!(GestureClassifier::new().classify(&f).finger_count(), Some(7));
    }

    #[test]
    fn toggle_hides_hand() {
        let mut h = SimHand::default();
        h.apply(SimInput::Fingers(2));
        let f = h.apply(SimInput::ToggleHand).unwrap();
        assert!(f.is_empty());
        let f = h.apply(SimInput::ToggleHand).unwrap();
        assert_eq!(GestureClassifier::new().classify(&f).finger_count(), Some(2));
    }

    #[test]
    fn openness_is_bounded() {
        let mut h = SimHand::default();
        for _ in 0..100 {
            h.apply(SimInput::Openness(0.02));
        }
        assert_eq!(h.openness, MAX_OPENNESS);
        for _ in 0..100 {
            h.apply(SimInput::Openness(-0.02));
        }
        assert_eq!(h.openness, 0.0);
    }

    #[test]
    fn quit_yields_nothing() {
        assert_eq!(SimHand::default().apply(SimInput::Quit), None);
    }

    #[test]
    fn sim_source_forwards_frames_and_stops_on_quit() {
        let (tx, rx) = mpsc::channel();
        let frames = spawn_gesture_source(SimGestureSource { rx, detector: DetectorConfig::default() });
        tx.send(SimInput::Fingers(1)).unwrap();
        tx.send(SimInput::ToggleHand).unwrap();
        tx.send(SimInput::Quit).unwrap();

        let got: Vec<HandFrame> = frames.iter().collect();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].hands.len(), 1);
        assert!(got[1].is_empty());
    }
}
