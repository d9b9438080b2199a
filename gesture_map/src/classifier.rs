//! Frame → [`GestureSignal`]: finger count, pinch openness, and hand
//! position.
//!
//! Finger-up tests are flat 2D comparisons in image space:
//!
//! * thumb: tip `x` against the IP joint `x`.  A right hand counts when the
//!   tip lies left of the joint, a left hand when it lies right (the camera
//!   image is mirrored).
//! * other fingers: tip `y` above (numerically below) the PIP joint `y`.

use crate::landmarks::{
    HandFrame, HandObservation, Handedness, FINGER_TIPS, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP,
    THUMB_IP, THUMB_TIP,
};

/// Why a frame produced no usable hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoHandReason {
    /// The detector saw nothing.
    Absent,
    /// At least one hand was missing landmarks or carried non-finite ones.
    Malformed,
}

/// Measurements taken from a frame with at least one usable hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReading {
    /// Raised fingers summed over every hand, `0..=10`.
    pub finger_count: u32,
    /// Thumb-tip to index-tip distance on the first hand, `≥ 0`.
    pub openness:     f32,
    /// `1 − x` of the first hand's middle knuckle, clamped to `[0, 1]`.
    pub hand_x:       f32,
    /// How many hands contributed.
    pub hands:        usize,
}

/// Output of [`GestureClassifier::classify`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSignal {
    NoHand(NoHandReason),
    Hands(HandReading),
}

impl GestureSignal {
    /// `Some(count)` when a hand was present, `None` otherwise.
    pub fn finger_count(&self) -> Option<u32> {
        match self {
            GestureSignal::Hands(r) => Some(r.finger_count),
            GestureSignal::NoHand(_) => None,
        }
    }

    pub fn is_no_hand(&self) -> bool {
        matches!(self, GestureSignal::NoHand(_))
    }
}

/// Stateless landmark classifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureClassifier;

impl GestureClassifier {
    pub fn new() -> Self {
        GestureClassifier
    }

    /// Classify one frame.  Never fails: a hand with missing or non-finite
    /// landmarks turns the whole frame into [`NoHandReason::Malformed`].
    pub fn classify(&self, frame: &HandFrame) -> GestureSignal {
        let Some(first) = frame.hands.first() else {
            return GestureSignal::NoHand(NoHandReason::Absent);
        };

        let mut finger_count = 0;
        for (i, hand) in frame.hands.iter().enumerate() {
            match count_fingers(hand) {
                Some(n) => finger_count += n,
                None => {
                    log::warn!(
                        "hand {} ({}) has {} of {} landmarks or non-finite values, treating frame as empty",
                        i,
                        hand.handedness,
                        hand.landmarks.len(),
                        LANDMARK_COUNT
                    );
                    return GestureSignal::NoHand(NoHandReason::Malformed);
                }
            }
        }

        let (Some(openness), Some(hand_x)) = (openness(first), hand_x(first)) else {
            return GestureSignal::NoHand(NoHandReason::Malformed);
        };

        GestureSignal::Hands(HandReading {
            finger_count,
            openness,
            hand_x,
            hands: frame.hands.len(),
        })
    }
}

/// Raised fingers on one hand, `0..=5`, or `None` if a needed landmark is
/// missing.
pub fn count_fingers(hand: &HandObservation) -> Option<u32> {
    let tip = hand.get(THUMB_TIP)?;
    let ip = hand.get(THUMB_IP)?;
    let thumb_up = match hand.handedness {
        Handedness::Right => tip.x < ip.x,
        Handedness::Left  => tip.x > ip.x,
    };

    let mut count = u32::from(thumb_up);
    for &(tip, pip) in FINGER_TIPS.iter() {
        if hand.get(tip)?.y < hand.get(pip)?.y {
            count += 1;
        }
    }
    Some(count)
}

/// Thumb-tip to index-tip distance in the image plane.
pub fn openness(hand: &HandObservation) -> Option<f32> {
    Some(hand.get(THUMB_TIP)?.planar_distance(hand.get(INDEX_TIP)?))
}

/// Horizontal hand position, un-mirrored and clamped to `[0, 1]`.
pub fn hand_x(hand: &HandObservation) -> Option<f32> {
    Some((1.0 - hand.get(MIDDLE_MCP)?.x).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Landmark, INDEX_PIP};
    use crate::synthetic::{synthetic_frame, synthetic_hand};

    const ALL_DOWN: [bool; 5] = [false; 5];

    #[test]
    fn empty_frame_is_absent() {
        let s = GestureClassifier::new().classify(&HandFrame::empty());
        assert_eq!(s, GestureSignal::NoHand(NoHandReason::Absent));
        assert_eq!(s.finger_count(), None);
    }

    #[test]
    fn fist_is_zero_not_no_hand() {
        let hand = synthetic_hand(Handedness::Right, ALL_DOWN, 0.1, 0.5);
        let s = GestureClassifier::new().classify(&HandFrame::new(vec![hand]));
        assert_eq!(s.finger_count(), Some(0));
        assert!(!s.is_no_hand());
    }

    #[test]
    fn right_thumb_only_counts_one() {
        let hand = synthetic_hand(Handedness::Right, [true, false, false, false, false], 0.1, 0.5);
        let tip = hand.landmarks[THUMB_TIP];
        let ip = hand.landmarks[THUMB_IP];
        assert!(tip.x < ip.x);
        assert_eq!(count_fingers(&hand), Some(1));
    }

    #[test]
    fn thumb_direction_flips_for_left_hand() {
        let mut hand = synthetic_hand(Handedness::Right, [true, false, false, false, false], 0.1, 0.5);
        hand.handedness = Handedness::Left;
        assert_eq!(count_fingers(&hand), Some(0));

        let left = synthetic_hand(Handedness::Left, [true, false, false, false, false], 0.1, 0.5);
        assert!(left.landmarks[THUMB_TIP].x > left.landmarks[THUMB_IP].x);
        assert_eq!(count_fingers(&left), Some(1));
    }

    #[test]
    fn finger_is_up_when_tip_above_pip() {
        let mut hand = synthetic_hand(Handedness::Right, ALL_DOWN, 0.1, 0.5);
        hand.landmarks[INDEX_TIP].y = hand.landmarks[INDEX_PIP].y - 0.01;
        assert_eq!(count_fingers(&hand), Some(1));
        hand.landmarks[INDEX_TIP].y = hand.landmarks[INDEX_PIP].y;
        assert_eq!(count_fingers(&hand), Some(0));
    }

    #[test]
    fn counts_sum_across_hands() {
        let c = GestureClassifier::new();
        for total in 0..=10 {
            let s = c.classify(&synthetic_frame(total, 0.1, 0.5));
            assert_eq!(s.finger_count(), Some(total), "total {}", total);
        }
    }

    #[test]
    fn openness_and_hand_x_from_first_hand() {
        let first = synthetic_hand(Handedness::Right, ALL_DOWN, 0.25, 0.3);
        let second = synthetic_hand(Handedness::Left, ALL_DOWN, 0.05, 0.9);
        let s = GestureClassifier::new().classify(&HandFrame::new(vec![first, second]));
        let GestureSignal::Hands(r) = s else { panic!("expected hands, got {:?}", s) };
        assert!((r.openness - 0.25).abs() < 1e-5);
        assert!((r.hand_x - 0.3).abs() < 1e-5);
        assert_eq!(r.hands, 2);
    }

    #[test]
    fn hand_x_is_clamped() {
        let mut hand = synthetic_hand(Handedness::Right, ALL_DOWN, 0.1, 0.5);
        hand.landmarks[MIDDLE_MCP].x = 1.4;
        assert_eq!(hand_x(&hand), Some(0.0));
        hand.landmarks[MIDDLE_MCP].x = -0.2;
        assert_eq!(hand_x(&hand), Some(1.0));
    }

    #[test]
    fn short_hand_is_malformed() {
        let good = synthetic_hand(Handedness::Right, [true; 5], 0.1, 0.5);
        let short = HandObservation::new(Handedness::Left, vec![Landmark::default(); 9]);
        let s = GestureClassifier::new().classify(&HandFrame::new(vec![good, short]));
        assert_eq!(s, GestureSignal::NoHand(NoHandReason::Malformed));
    }

    #[test]
    fn nan_landmark_is_malformed() {
        let mut hand = synthetic_hand(Handedness::Right, [true; 5], 0.1, 0.5);
        hand.landmarks[INDEX_TIP].y = f32::NAN;
        let s = GestureClassifier::new().classify(&HandFrame::new(vec![hand]));
        assert_eq!(s, GestureSignal::NoHand(NoHandReason::Malformed));
    }
}
