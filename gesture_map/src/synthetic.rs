//! Plausible 21-point hands built from a finger pattern.
//!
//! Used by the keyboard simulator and by tests.  The geometry is a cartoon
//! of a hand held upright in front of a mirrored camera, laid out so that
//! the classifier reads back exactly the pattern, openness and position
//! that were asked for.

use crate::landmarks::{
    HandFrame, HandObservation, Handedness, Landmark, INDEX_TIP, LANDMARK_COUNT, THUMB_CMC,
    THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};

const WRIST_Y: f32 = 0.80;
const MCP_Y: f32 = 0.60;
const PIP_Y: f32 = 0.50;
const DIP_Y_UP: f32 = 0.45;
const TIP_Y_UP: f32 = 0.40;
const DIP_Y_DOWN: f32 = 0.55;
const TIP_Y_DOWN: f32 = 0.58;

/// Column offsets of index, middle, ring and pinky from the middle knuckle.
const COLUMNS: [f32; 4] = [-0.04, 0.0, 0.04, 0.08];

/// Horizontal gap between the thumb tip and its IP joint.
const THUMB_BEND: f32 = 0.02;

/// Build one hand.
///
/// `fingers` lists thumb, index, middle, ring, pinky.  `openness` becomes
/// the thumb-to-index tip distance and `hand_x` the un-mirrored middle
/// knuckle position.
pub fn synthetic_hand(
    handedness: Handedness,
    fingers: [bool; 5],
    openness: f32,
    hand_x: f32,
) -> HandObservation {
    let side = handedness.sign();
    let cx = 1.0 - hand_x;
    let mut lm = vec![Landmark::default(); LANDMARK_COUNT];

    lm[WRIST] = Landmark::new(cx + side * 0.02, WRIST_Y, 0.0);
    lm[THUMB_CMC] = Landmark::new(cx - side * 0.06, 0.72, -0.01);
    lm[THUMB_MCP] = Landmark::new(cx - side * 0.09, 0.64, -0.02);

    for (f, (&up, dx)) in fingers[1..].iter().zip(COLUMNS).enumerate() {
        let x = cx + side * dx;
        let base = 5 + f * 4;
        let (dip, tip) = if up { (DIP_Y_UP, TIP_Y_UP) } else { (DIP_Y_DOWN, TIP_Y_DOWN) };
        lm[base] = Landmark::new(x, MCP_Y, 0.0);
        lm[base + 1] = Landmark::new(x, PIP_Y, -0.01);
        lm[base + 2] = Landmark::new(x, dip, -0.02);
        lm[base + 3] = Landmark::new(x, tip, -0.03);
    }

    // Thumb tip sits level with the index tip, `openness` away on the thumb
    // side; the IP joint goes beside it on whichever side encodes up/down.
    let index_tip = lm[INDEX_TIP];
    let tip_x = index_tip.x - side * openness.max(0.0);
    let bend = if fingers[0] { THUMB_BEND } else { -THUMB_BEND };
    lm[THUMB_TIP] = Landmark::new(tip_x, index_tip.y, -0.03);
    lm[THUMB_IP] = Landmark::new(tip_x + side * bend, index_tip.y + 0.05, -0.02);

    HandObservation::new(handedness, lm)
}

/// `count` leading fingers up, thumb first.
pub fn fingers_up(count: u32) -> [bool; 5] {
    let mut f = [false; 5];
    for slot in f.iter_mut().take(count.min(5) as usize) {
        *slot = true;
    }
    f
}

/// A frame showing `total` raised fingers (capped at 10).
///
/// Up to five go on a right hand; the rest on a second, left hand.
pub fn synthetic_frame(total: u32, openness: f32, hand_x: f32) -> HandFrame {
    let total = total.min(10);
    let mut hands = vec![synthetic_hand(Handedness::Right, fingers_up(total), openness, hand_x)];
    if total > 5 {
        hands.push(synthetic_hand(Handedness::Left, fingers_up(total - 5), openness, hand_x));
    }
    HandFrame::new(hands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{MIDDLE_MCP, PINKY_TIP};

    #[test]
    fn every_landmark_is_finite() {
        for h in [Handedness::Left, Handedness::Right] {
            let hand = synthetic_hand(h, [true, false, true, false, true], 0.2, 0.7);
            assert_eq!(hand.landmarks.len(), LANDMARK_COUNT);
            assert!(hand.landmarks.iter().all(Landmark::is_finite));
        }
    }

    #[test]
    fn knuckle_tracks_hand_x() {
        let hand = synthetic_hand(Handedness::Right, [false; 5], 0.0, 0.25);
        assert!((hand.landmarks[MIDDLE_MCP].x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn pinky_sits_on_the_outer_side() {
        let r = synthetic_hand(Handedness::Right, [false; 5], 0.0, 0.5);
        let l = synthetic_hand(Handedness::Left, [false; 5], 0.0, 0.5);
        assert!(r.landmarks[PINKY_TIP].x > r.landmarks[MIDDLE_MCP].x);
        assert!(l.landmarks[PINKY_TIP].x < l.landmarks[MIDDLE_MCP].x);
    }

    #[test]
    fn fingers_up_saturates() {
        assert_eq!(fingers_up(0), [false; 5]);
        assert_eq!(fingers_up(2), [true, true, false, false, false]);
        assert_eq!(fingers_up(9), [true; 5]);
    }

    #[test]
    fn frame_splits_across_hands() {
        assert_eq!(synthetic_frame(4, 0.1, 0.5).hands.len(), 1);
        let f = synthetic_frame(7, 0.1, 0.5);
        assert_eq!(f.hands.len(), 2);
        assert_eq!(f.hands[1].handedness, Handedness::Left);
        assert_eq!(synthetic_frame(42, 0.1, 0.5).hands.len(), 2);
    }
}
