//! Finger count → silhouette state machine.
//!
//! [`interpret`] is the whole transition function: a pure map from
//! `(signal, state)` to `(state', targets)`.  [`ShapeSelector`] wraps it
//! with a transition counter for callers that want to keep the state in
//! one place.

use particle_shapes::ShapeId;

use crate::classifier::GestureSignal;

pub const SCALE_FLOOR: f32 = 0.5;
pub const SCALE_CEIL: f32 = 3.0;
/// Scale the cloud relaxes to with no hand in view.
pub const SCALE_IDLE: f32 = 1.0;
/// Scale gained per unit of thumb-index distance.
pub const OPENNESS_GAIN: f32 = 5.0;

/// Shape for a raised-finger total; `None` for 0, which holds the
/// current shape.
pub fn shape_for_count(fingers: u32) -> Option<ShapeId> {
    let shape = match fingers {
        0 => return None,
        1 => ShapeId::Heart,
        2 => ShapeId::TwoHearts,
        3 => ShapeId::Infinity,
        4 => ShapeId::Calendar,
        5 => ShapeId::Bridge,
        6 => ShapeId::IntertwinedHearts,
        7 => ShapeId::Envelope,
        8 => ShapeId::Rose,
        9 => ShapeId::RingBox,
        _ => ShapeId::Countdown,
    };
    Some(shape)
}

/// `clamp(0.5 + 5·d, 0.5, 3.0)`; non-finite or negative distances give the
/// floor.
pub fn scale_for_openness(distance: f32) -> f32 {
    if !distance.is_finite() {
        return SCALE_FLOOR;
    }
    (SCALE_FLOOR + distance.max(0.0) * OPENNESS_GAIN).clamp(SCALE_FLOOR, SCALE_CEIL)
}

/// Hand position → hue in `[0, 1)`.
pub fn hue_for_hand_x(hand_x: f32) -> f32 {
    if hand_x.is_finite() {
        hand_x.rem_euclid(1.0)
    } else {
        0.0
    }
}

/// What the selector remembers between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectorState {
    pub active: ShapeId,
    /// Last hue chosen by a hand; `None` until the first hand shows up.
    pub hue:    Option<f32>,
}

impl Default for SelectorState {
    fn default() -> Self {
        SelectorState { active: ShapeId::IDLE, hue: None }
    }
}

/// Per-frame targets handed to the morph engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualTargets {
    pub shape:        ShapeId,
    pub scale_target: f32,
    pub hue_target:   Option<f32>,
}

/// A change of active shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: ShapeId,
    pub to:   ShapeId,
}

/// Result of feeding one signal through [`interpret`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub state:      SelectorState,
    pub targets:    VisualTargets,
    /// Set only when the active shape changed.
    pub transition: Option<Transition>,
}

pub fn interpret(signal: &GestureSignal, state: SelectorState) -> Decision {
    let (next, scale_target, hue) = match signal {
        GestureSignal::NoHand(_) => (ShapeId::IDLE, SCALE_IDLE, state.hue),
        GestureSignal::Hands(r) => (
            shape_for_count(r.finger_count).unwrap_or(state.active),
            scale_for_openness(r.openness),
            Some(hue_for_hand_x(r.hand_x)),
        ),
    };

    let transition = (next != state.active).then_some(Transition { from: state.active, to: next });
    let state = SelectorState { active: next, hue };

    Decision {
        state,
        targets: VisualTargets { shape: next, scale_target, hue_target: hue },
        transition,
    }
}

/// Owns a [`SelectorState`] and counts transitions.
#[derive(Clone, Debug, Default)]
pub struct ShapeSelector {
    state:       SelectorState,
    transitions: u64,
}

impl ShapeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn active(&self) -> ShapeId {
        self.state.active
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn observe(&mut self, signal: &GestureSignal) -> Decision {
        let decision = interpret(signal, self.state);
        self.state = decision.state;
        if let Some(t) = decision.transition {
            self.transitions += 1;
            log::debug!("selector: {} → {}", t.from, t.to);
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{HandReading, NoHandReason};

    fn hands(finger_count: u32, openness: f32, hand_x: f32) -> GestureSignal {
        GestureSignal::Hands(HandReading { finger_count, openness, hand_x, hands: 1 })
    }

    #[test]
    fn count_table_is_total() {
        let expected = [
            None,
            Some(ShapeId::Heart),
            Some(ShapeId::TwoHearts),
            Some(ShapeId::Infinity),
            Some(ShapeId::Calendar),
            Some(ShapeId::Bridge),
            Some(ShapeId::IntertwinedHearts),
            Some(ShapeId::Envelope),
            Some(ShapeId::Rose),
            Some(ShapeId::RingBox),
            Some(ShapeId::Countdown),
        ];
        for (n, want) in expected.iter().enumerate() {
            assert_eq!(shape_for_count(n as u32), *want, "count {}", n);
        }
        for n in [11, 12, 50, u32::MAX] {
            assert_eq!(shape_for_count(n), Some(ShapeId::Countdown));
        }
    }

    #[test]
    fn openness_scale_curve() {
        assert_eq!(scale_for_openness(0.0), 0.5);
        assert!((scale_for_openness(0.1) - 1.0).abs() < 1e-6);
        assert!((scale_for_openness(0.3) - 2.0).abs() < 1e-6);
        assert_eq!(scale_for_openness(0.5), 3.0);
        assert_eq!(scale_for_openness(4.0), 3.0);
        assert_eq!(scale_for_openness(-1.0), 0.5);
        assert_eq!(scale_for_openness(f32::NAN), 0.5);
        assert_eq!(scale_for_openness(f32::INFINITY), 0.5);
    }

    #[test]
    fn hue_stays_in_unit_range() {
        assert_eq!(hue_for_hand_x(0.25), 0.25);
        assert_eq!(hue_for_hand_x(1.0), 0.0);
        assert_eq!(hue_for_hand_x(f32::NAN), 0.0);
    }

    #[test]
    fn starts_idle_without_hue() {
        let s = SelectorState::default();
        assert_eq!(s.active, ShapeId::Lili);
        assert_eq!(s.hue, None);
    }

    #[test]
    fn one_finger_transitions_once() {
        let d = interpret(&hands(1, 0.1, 0.5), SelectorState::default());
        assert_eq!(d.transition, Some(Transition { from: ShapeId::Lili, to: ShapeId::Heart }));
        assert_eq!(d.targets.shape, ShapeId::Heart);

        let again = interpret(&hands(1, 0.2, 0.6), d.state);
        assert_eq!(again.transition, None);
        assert_eq!(again.state.active, ShapeId::Heart);
        assert!((again.targets.scale_target - 1.5).abs() < 1e-6);
        assert_eq!(again.targets.hue_target, Some(0.6));
    }

    #[test]
    fn zero_fingers_hold_shape() {
        let state = SelectorState { active: ShapeId::Rose, hue: Some(0.3) };
        let d = interpret(&hands(0, 0.0, 0.8), state);
        assert_eq!(d.transition, None);
        assert_eq!(d.state.active, ShapeId::Rose);
        assert_eq!(d.targets.scale_target, 0.5);
        assert_eq!(d.targets.hue_target, Some(0.8));
    }

    #[test]
    fn no_hand_returns_to_idle_and_holds_hue() {
        let state = SelectorState { active: ShapeId::Bridge, hue: Some(0.42) };
        for reason in [NoHandReason::Absent, NoHandReason::Malformed] {
            let d = interpret(&GestureSignal::NoHand(reason), state);
            assert_eq!(d.state.active, ShapeId::Lili);
            assert_eq!(d.transition, Some(Transition { from: ShapeId::Bridge, to: ShapeId::Lili }));
            assert_eq!(d.targets.scale_target, SCALE_IDLE);
            assert_eq!(d.targets.hue_target, Some(0.42));
        }

        let idle = interpret(&GestureSignal::NoHand(NoHandReason::Absent), SelectorState::default());
        assert_eq!(idle.transition, None);
        assert_eq!(idle.targets.hue_target, None);
    }

    #[test]
    fn selector_counts_only_changes() {
        let mut sel = ShapeSelector::new();
        for _ in 0..5 {
            sel.observe(&hands(3, 0.1, 0.5));
        }
        assert_eq!(sel.active(), ShapeId::Infinity);
        assert_eq!(sel.transitions(), 1);
        sel.observe(&hands(12, 0.1, 0.5));
        sel.observe(&GestureSignal::NoHand(NoHandReason::Absent));
        assert_eq!(sel.active(), ShapeId::Lili);
        assert_eq!(sel.transitions(), 3);
    }
}
