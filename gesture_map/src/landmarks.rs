//! Hand-landmark frames as delivered by an external detector.
//!
//! Coordinates are normalised image space: `x` and `y` in `[0, 1]` with `y`
//! growing downward, `z` a relative depth.  Each hand carries 21 keypoints
//! in the usual wrist → thumb → index → middle → ring → pinky order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keypoints per hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// `(tip, middle joint)` pairs for the four non-thumb fingers.
pub const FINGER_TIPS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    #[error("unknown handedness label \"{0}\" (expected Left or Right)")]
    UnknownHandedness(String),

    #[error("expected {expected} landmarks per hand, found {found}")]
    LandmarkCount { expected: usize, found: usize },
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark / Handedness
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    /// Euclidean distance in the image plane, ignoring depth.
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Landmark {
    fn from(p: [f32; 3]) -> Self {
        Landmark::new(p[0], p[1], p[2])
    }
}

/// Which hand the detector believes it is looking at (as seen in the
/// mirrored camera image).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// `+1` for right, `-1` for left.
    pub fn sign(self) -> f32 {
        match self {
            Handedness::Left  => -1.0,
            Handedness::Right => 1.0,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Handedness::Left  => "Left",
            Handedness::Right => "Right",
        })
    }
}

impl FromStr for Handedness {
    type Err = LandmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l"  => Ok(Handedness::Left),
            "right" | "r" => Ok(Handedness::Right),
            _ => Err(LandmarkError::UnknownHandedness(s.to_string())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandObservation / HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub handedness: Handedness,
    /// Nominally [`LANDMARK_COUNT`] points; may be short when the detector
    /// misbehaves.
    pub landmarks:  Vec<Landmark>,
    /// Detection confidence in `[0, 1]`.
    pub score:      f32,
}

impl HandObservation {
    /// Wrap landmarks as-is, without validation, at full confidence.
    pub fn new(handedness: Handedness, landmarks: Vec<Landmark>) -> Self {
        HandObservation { handedness, landmarks, score: 1.0 }
    }

    /// Build from raw detector output, checking the label and point count.
    pub fn from_raw(label: &str, points: &[[f32; 3]], score: f32) -> Result<Self, LandmarkError> {
        let handedness = label.parse()?;
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::LandmarkCount {
                expected: LANDMARK_COUNT,
                found:    points.len(),
            });
        }
        Ok(HandObservation {
            handedness,
            landmarks: points.iter().copied().map(Landmark::from).collect(),
            score,
        })
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Landmark `i`, or `None` if missing or non-finite.
    pub fn get(&self, i: usize) -> Option<&Landmark> {
        self.landmarks.get(i).filter(|l| l.is_finite())
    }
}

/// Everything the detector reported for one camera frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<HandObservation>,
}

impl HandFrame {
    pub fn empty() -> Self {
        HandFrame::default()
    }

    pub fn new(hands: Vec<HandObservation>) -> Self {
        HandFrame { hands }
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorConfig
// ════════════════════════════════════════════════════════════════════════════

/// Settings handed to the landmark detector once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub max_hands:                usize,
    /// 0 = lite model, 1 = full model.
    pub model_complexity:         u8,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence:  f32,
    pub camera_width:             u32,
    pub camera_height:            u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            max_hands:                2,
            model_complexity:         1,
            min_detection_confidence: 0.7,
            min_tracking_confidence:  0.7,
            camera_width:             640,
            camera_height:            480,
        }
    }
}

impl DetectorConfig {
    /// Drop hands under the detection threshold and keep at most
    /// `max_hands`, in arrival order.
    pub fn admit(&self, frame: HandFrame) -> HandFrame {
        let before = frame.hands.len();
        let hands: Vec<HandObservation> = frame
            .hands
            .into_iter()
            .filter(|h| h.score >= self.min_detection_confidence)
            .take(self.max_hands)
            .collect();
        if hands.len() < before {
            log::trace!("detector filter kept {} of {} hands", hands.len(), before);
        }
        HandFrame { hands }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand(handedness: Handedness) -> HandObservation {
        HandObservation::new(handedness, vec![Landmark::default(); LANDMARK_COUNT])
    }

    #[test]
    fn handedness_parses_labels() {
        assert_eq!("Right".parse::<Handedness>().unwrap(), Handedness::Right);
        assert_eq!(" left ".parse::<Handedness>().unwrap(), Handedness::Left);
        assert_eq!(
            "Both".parse::<Handedness>().unwrap_err(),
            LandmarkError::UnknownHandedness("Both".to_string())
        );
    }

    #[test]
    fn from_raw_checks_count() {
        let pts = vec![[0.5, 0.5, 0.0]; 20];
        let err = HandObservation::from_raw("Right", &pts, 0.9).unwrap_err();
        assert_eq!(err, LandmarkError::LandmarkCount { expected: 21, found: 20 });

        let pts = vec![[0.5, 0.5, 0.0]; 21];
        let hand = HandObservation::from_raw("Left", &pts, 0.9).unwrap();
        assert_eq!(hand.handedness, Handedness::Left);
        assert_eq!(hand.landmarks.len(), 21);
        assert_eq!(hand.score, 0.9);
    }

    #[test]
    fn get_rejects_missing_and_nan() {
        let mut hand = flat_hand(Handedness::Right);
        hand.landmarks[4].x = f32::NAN;
        hand.landmarks.truncate(10);
        assert!(hand.get(3).is_some());
        assert!(hand.get(4).is_none());
        assert!(hand.get(12).is_none());
    }

    #[test]
    fn planar_distance_ignores_depth() {
        let a = Landmark::new(0.0, 0.0, 5.0);
        let b = Landmark::new(0.3, 0.4, -5.0);
        assert!((a.planar_distance(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn admit_filters_and_caps() {
        let cfg = DetectorConfig { max_hands: 2, min_detection_confidence: 0.6, ..Default::default() };
        let frame = HandFrame::new(vec![
            flat_hand(Handedness::Right).with_score(0.5),
            flat_hand(Handedness::Left).with_score(0.9),
            flat_hand(Handedness::Right).with_score(0.8),
            flat_hand(Handedness::Left).with_score(0.95),
        ]);
        let kept = cfg.admit(frame);
        assert_eq!(kept.hands.len(), 2);
        assert_eq!(kept.hands[0].score, 0.9);
        assert_eq!(kept.hands[1].score, 0.8);
    }
}
