//! # particle_morph
//!
//! Frame-by-frame morphing of a point cloud toward a target silhouette.
//!
//! [`MorphState`] owns `N` current positions, a double-buffered target, and
//! the global scale, color, and spin.  Each [`MorphState::tick`] moves every
//! quantity a fixed fraction of the way to its target:
//!
//! ```text
//! current[i] += (target[i] − current[i]) · morph_rate
//! scale       = lerp(scale, scale_target, scale_smoothing)
//! color       = lerp(color, color_target, color_smoothing)
//! rotation    = (rotation + rotation_rate) mod 2π
//! ```
//!
//! Convergence is asymptotic and frame-rate dependent.  The state knows
//! nothing about shapes; it only sees flat coordinate buffers, which makes
//! it equally happy with targets from `particle_shapes` or anywhere else.
//!
//! ```rust
//! use particle_morph::{MorphParams, MorphState, ParticleBuffer};
//!
//! let mut state = MorphState::new(ParticleBuffer::zeroed(2), MorphParams::default());
//! state.retarget(|buf| buf.copy_from_slice(&[1.0, 1.0, 1.0, -1.0, -1.0, -1.0]));
//! for _ in 0..200 { state.tick(); }
//! assert!(state.max_deviation() < 1e-3);
//! ```

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

pub mod buffer;
pub mod color;

pub use buffer::{ParticleBuffer, TargetBuffer};
pub use color::{lerp, Rgb};

/// Lower bound of the global scale.
pub const SCALE_MIN: f32 = 0.5;
/// Upper bound of the global scale.
pub const SCALE_MAX: f32 = 3.0;
/// Scale the cloud relaxes to when nobody is steering it.
pub const SCALE_REST: f32 = 1.0;

// ════════════════════════════════════════════════════════════════════════════
// MorphParams
// ════════════════════════════════════════════════════════════════════════════

/// Per-frame approach rates, fixed at startup from the capability tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MorphParams {
    /// Fraction of the remaining distance each particle covers per tick.
    pub morph_rate:      f32,
    /// Radians of spin about the vertical axis per tick.
    pub rotation_rate:   f32,
    pub scale_smoothing: f32,
    pub color_smoothing: f32,
}

impl Default for MorphParams {
    fn default() -> Self {
        MorphParams {
            morph_rate:      0.08,
            rotation_rate:   0.002,
            scale_smoothing: 0.1,
            color_smoothing: 0.1,
        }
    }
}

impl MorphParams {
    /// Force every smoothing rate into `(0, 1]` and the spin to a finite
    /// value, falling back to the defaults for anything unusable.
    pub fn sanitized(self) -> Self {
        let d = MorphParams::default();
        let rate = |v: f32, fallback: f32, name: &str| {
            if v.is_finite() && v > 0.0 {
                v.min(1.0)
            } else {
                log::warn!("{} = {} is outside (0, 1]; using {}", name, v, fallback);
                fallback
            }
        };
        MorphParams {
            morph_rate:      rate(self.morph_rate, d.morph_rate, "morph_rate"),
            scale_smoothing: rate(self.scale_smoothing, d.scale_smoothing, "scale_smoothing"),
            color_smoothing: rate(self.color_smoothing, d.color_smoothing, "color_smoothing"),
            rotation_rate:   if self.rotation_rate.is_finite() { self.rotation_rate } else { 0.0 },
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MorphState
// ════════════════════════════════════════════════════════════════════════════

/// Everything the renderer samples each frame.
#[derive(Clone, Debug)]
pub struct MorphState {
    params:       MorphParams,
    current:      ParticleBuffer,
    target:       TargetBuffer,
    scale:        f32,
    scale_target: f32,
    color:        Rgb,
    color_target: Rgb,
    rotation:     f32,
    ticks:        u64,
}

impl MorphState {
    /// Start from `initial` positions, which also serve as the first target
    /// so nothing moves until [`retarget`](Self::retarget) is called.
    pub fn new(initial: ParticleBuffer, params: MorphParams) -> Self {
        MorphState {
            params:       params.sanitized(),
            target:       TargetBuffer::new(initial.clone()),
            current:      initial,
            scale:        SCALE_REST,
            scale_target: SCALE_REST,
            color:        Rgb::WHITE,
            color_target: Rgb::WHITE,
            rotation:     0.0,
            ticks:        0,
        }
    }

    /// Advance one display frame.
    pub fn tick(&mut self) {
        let rate = self.params.morph_rate;
        for (c, &t) in self
            .current
            .as_mut_slice()
            .iter_mut()
            .zip(self.target.front().as_slice())
        {
            *c += (t - *c) * rate;
        }

        self.scale = lerp(self.scale, self.scale_target, self.params.scale_smoothing);
        self.color = self.color.lerp(self.color_target, self.params.color_smoothing);
        self.rotation = (self.rotation + self.params.rotation_rate).rem_euclid(TAU);
        self.ticks += 1;
    }

    /// Write a new target through `fill` and publish it atomically.
    /// Returns the new target generation.
    pub fn retarget<F>(&mut self, fill: F) -> u64
    where
        F: FnOnce(&mut [f32]),
    {
        self.target.rewrite(fill)
    }

    /// Set the scale to approach; clamped to `[SCALE_MIN, SCALE_MAX]`.
    /// A NaN request is ignored.
    pub fn set_scale_target(&mut self, scale: f32) {
        if scale.is_nan() {
            log::debug!("ignoring NaN scale target");
            return;
        }
        self.scale_target = scale.clamp(SCALE_MIN, SCALE_MAX);
    }

    pub fn set_color_target(&mut self, color: Rgb) {
        self.color_target = color;
    }

    /// Approach the fully saturated, mid-lightness color of `hue`.
    pub fn set_hue_target(&mut self, hue: f32) {
        self.color_target = Rgb::from_hue(hue);
    }

    /// Largest per-coordinate distance between current and target.
    pub fn max_deviation(&self) -> f32 {
        self.current
            .as_slice()
            .iter()
            .zip(self.target.front().as_slice())
            .map(|(c, t)| (t - c).abs())
            .fold(0.0, f32::max)
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn positions(&self)      -> &[f32]          { self.current.as_slice() }
    pub fn current(&self)        -> &ParticleBuffer { &self.current }
    pub fn target(&self)         -> &ParticleBuffer { self.target.front() }
    pub fn generation(&self)     -> u64             { self.target.generation() }
    pub fn particle_count(&self) -> usize           { self.current.len() }
    pub fn scale(&self)          -> f32             { self.scale }
    pub fn scale_target(&self)   -> f32             { self.scale_target }
    pub fn color(&self)          -> Rgb             { self.color }
    pub fn color_target(&self)   -> Rgb             { self.color_target }
    pub fn rotation(&self)       -> f32             { self.rotation }
    pub fn ticks(&self)          -> u64             { self.ticks }
    pub fn params(&self)         -> &MorphParams    { &self.params }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
