//! # leap_particles
//!
//! A particle cloud that reshapes itself into silhouettes picked by hand
//! gestures, rendered in a software framebuffer.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | No hand in view | Return to the "LILI" lettering, scale relaxes to 1 |
//! | Fist (hand present, no fingers up) | Keep the current silhouette |
//! | 1–9 fingers raised (both hands summed) | heart, two-hearts, infinity, calendar, bridge, intertwined-hearts, envelope, rose, ring-box |
//! | 10 fingers | countdown |
//! | Thumb–index pinch width | Overall scale, 0.5 to 3.0 |
//! | Hand position left → right | Hue around the color wheel |
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: keyboard and mouse drive a synthetic hand.
//! * `leap`: **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Gesture |
//! |---|---|
//! | `0`–`9` | Show a hand with that many fingers raised |
//! | `Shift`+`0` | Ten fingers |
//! | `H` | Hide / show the hand |
//! | `Up` / `Down` | Widen / narrow the pinch |
//! | Mouse x | Hand position |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod config;
pub mod error;
pub mod gesture;
pub mod quality;
pub mod visualizer;

pub use app::{run, run_headless, Session, Summary};
pub use config::{AppConfig, CapabilityTier, ProfileOverrides, TierProfile};
pub use error::AppError;
