//! # gesture_map
//!
//! Turns hand-landmark frames into silhouette choices.
//!
//! ```text
//! HandFrame ──classify──▶ GestureSignal ──interpret──▶ (SelectorState, VisualTargets)
//! ```
//!
//! | fingers raised (both hands) | silhouette           |
//! |-----------------------------|----------------------|
//! | no hand                     | lili                 |
//! | 0 (hand present)            | *hold current*       |
//! | 1                           | heart                |
//! | 2                           | two-hearts           |
//! | 3                           | infinity             |
//! | 4                           | calendar             |
//! | 5                           | bridge               |
//! | 6                           | intertwined-hearts   |
//! | 7                           | envelope             |
//! | 8                           | rose                 |
//! | 9                           | ring-box             |
//! | ≥ 10                        | countdown            |
//!
//! Pinch width (thumb tip to index tip) drives scale; the un-mirrored
//! middle-knuckle `x` drives hue.
//!
//! ```
//! use gesture_map::{interpret, synthetic_frame, GestureClassifier, SelectorState};
//! use particle_shapes::ShapeId;
//!
//! let signal = GestureClassifier::new().classify(&synthetic_frame(3, 0.1, 0.5));
//! let d = interpret(&signal, SelectorState::default());
//! assert_eq!(d.state.active, ShapeId::Infinity);
//! assert!(d.transition.is_some());
//! ```

pub mod classifier;
pub mod landmarks;
pub mod selector;
pub mod synthetic;

pub use classifier::{GestureClassifier, GestureSignal, HandReading, NoHandReason};
pub use landmarks::{DetectorConfig, HandFrame, HandObservation, Handedness, Landmark, LandmarkError};
pub use selector::{
    interpret, scale_for_openness, shape_for_count, Decision, SelectorState, ShapeSelector,
    Transition, VisualTargets,
};
pub use synthetic::{synthetic_frame, synthetic_hand};
