//! # particle_shapes
//!
//! A registry of parametric silhouettes for a morphing point cloud.  Every
//! generator fills a caller-owned flat buffer (`x, y, z` per particle) with
//! target coordinates for one named shape.
//!
//! ## Shapes
//!
//! | Shape | Construction |
//! |---|---|
//! | `lili` | four letter strokes (L, I, L, I) plus a heart-shaped halo |
//! | `heart` | polar heart curve, radially filled, with a heartbeat pulse |
//! | `two-hearts` | two half-size hearts side by side |
//! | `infinity` | lemniscate swept by particle index |
//! | `calendar` | 6 × 30 grid of jittered buckets |
//! | `bridge` | parabolic arc over a linear span |
//! | `envelope` | rectangle with a raised flap and a heart bump |
//! | `rose` | five-petal rose curve bloomed across spherical angles |
//! | `ring-box` | flat ring floating above a cube shell |
//! | `countdown` | clock-face ring around a small heart |
//! | `intertwined-hearts` | two hearts tilted ±45° and overlapped |
//!
//! ## Quick start
//!
//! ```rust
//! use particle_shapes::{ShapeId, ShapeLibrary};
//!
//! let mut library = ShapeLibrary::seeded(7);
//! let mut target = vec![0.0_f32; 3 * 1000];
//! library.generate(ShapeId::Heart, 1000, &mut target);
//! assert!(target.iter().all(|c| c.is_finite()));
//! ```
//!
//! Generators never read the prior contents of the buffer and write every
//! slot of the first `count` points exactly once.  Regions that split the
//! particle budget (letters, grid buckets, ring + box, clock + heart) hand
//! any integer-division remainder to the region filled last.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod curves;
mod hearts;
mod layouts;
mod letters;

// ════════════════════════════════════════════════════════════════════════════
// ShapeId
// ════════════════════════════════════════════════════════════════════════════

/// The silhouettes the cloud can morph between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Lili,
    Heart,
    TwoHearts,
    Infinity,
    Calendar,
    Bridge,
    IntertwinedHearts,
    Envelope,
    Rose,
    RingBox,
    Countdown,
}

impl ShapeId {
    /// The shape shown while no hand is in view.
    pub const IDLE: ShapeId = ShapeId::Lili;

    pub fn all() -> [ShapeId; 11] {
        [
            ShapeId::Lili,
            ShapeId::Heart,
            ShapeId::TwoHearts,
            ShapeId::Infinity,
            ShapeId::Calendar,
            ShapeId::Bridge,
            ShapeId::IntertwinedHearts,
            ShapeId::Envelope,
            ShapeId::Rose,
            ShapeId::RingBox,
            ShapeId::Countdown,
        ]
    }

    /// Kebab-case identifier, accepted back by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ShapeId::Lili              => "lili",
            ShapeId::Heart             => "heart",
            ShapeId::TwoHearts         => "two-hearts",
            ShapeId::Infinity          => "infinity",
            ShapeId::Calendar          => "calendar",
            ShapeId::Bridge            => "bridge",
            ShapeId::IntertwinedHearts => "intertwined-hearts",
            ShapeId::Envelope          => "envelope",
            ShapeId::Rose              => "rose",
            ShapeId::RingBox           => "ring-box",
            ShapeId::Countdown         => "countdown",
        }
    }

    /// Status line shown once when this shape becomes active.
    pub fn caption(self) -> &'static str {
        match self {
            ShapeId::Lili              => "LILI - Show your hand to see magic!",
            ShapeId::Heart             => "My heart beats for you",
            ShapeId::TwoHearts         => "Two hearts, one love",
            ShapeId::Infinity          => "Forever and always",
            ShapeId::Calendar          => "6 months of love and counting",
            ShapeId::Bridge            => "Distance means nothing to us",
            ShapeId::IntertwinedHearts => "Our souls are connected",
            ShapeId::Envelope          => "Every message brings us closer",
            ShapeId::Rose              => "A rose across the miles",
            ShapeId::RingBox           => "A promise to keep",
            ShapeId::Countdown         => "Counting every moment until we're together",
        }
    }

    fn generator(self) -> Generator {
        match self {
            ShapeId::Lili              => letters::lili,
            ShapeId::Heart             => hearts::heart,
            ShapeId::TwoHearts         => hearts::two_hearts,
            ShapeId::Infinity          => curves::infinity,
            ShapeId::Calendar          => layouts::calendar,
            ShapeId::Bridge            => curves::bridge,
            ShapeId::IntertwinedHearts => hearts::intertwined_hearts,
            ShapeId::Envelope          => layouts::envelope,
            ShapeId::Rose              => curves::rose,
            ShapeId::RingBox           => layouts::ring_box,
            ShapeId::Countdown         => layouts::countdown,
        }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a shape name is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape \"{0}\" (expected one of: lili, heart, two-hearts, infinity, calendar, bridge, intertwined-hearts, envelope, rose, ring-box, countdown)")]
pub struct ParseShapeError(pub String);

impl FromStr for ShapeId {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        let shape = match key.as_str() {
            "twohearts"   => ShapeId::TwoHearts,
            "intertwined" => ShapeId::IntertwinedHearts,
            "ring"        => ShapeId::RingBox,
            other => ShapeId::all()
                .into_iter()
                .find(|shape| shape.name() == other)
                .ok_or_else(|| ParseShapeError(s.to_string()))?,
        };
        Ok(shape)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sampler: randomness + clock handed to each generator
// ════════════════════════════════════════════════════════════════════════════

/// Per-call sampling context: the random source and the pulse clock.
pub struct Sampler<'a> {
    rng:     &'a mut StdRng,
    time_ms: f64,
}

impl<'a> Sampler<'a> {
    pub fn new(rng: &'a mut StdRng, time_ms: f64) -> Self {
        Sampler { rng, time_ms }
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform in `[-0.5, 0.5)`.
    #[inline]
    pub fn centered(&mut self) -> f32 {
        self.unit() - 0.5
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.unit() * std::f32::consts::TAU
    }

    /// Uniform integer in `0..n`.
    #[inline]
    pub fn below(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Heartbeat factor `1 + 0.1·sin(t·0.001)` for the sampler's clock.
    pub fn pulse(&self) -> f32 {
        1.0 + (self.time_ms * 0.001).sin() as f32 * 0.1
    }
}

type Generator = fn(&mut Sampler<'_>, &mut [f32]);

/// Splits `count` particles into `parts` equal shares.  The last share
/// absorbs the integer-division remainder so the shares always sum to
/// `count`.
pub(crate) fn shares(count: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let each = count / parts;
    let mut out = vec![each; parts];
    out[parts - 1] += count - each * parts;
    out
}

/// Splits a flat buffer into consecutive point regions of the given sizes.
pub(crate) fn regions<'b>(mut buf: &'b mut [f32], sizes: &[usize]) -> Vec<&'b mut [f32]> {
    let mut out = Vec::with_capacity(sizes.len());
    for &n in sizes {
        let (head, tail) = std::mem::take(&mut buf).split_at_mut(n * 3);
        out.push(head);
        buf = tail;
    }
    out
}

// ════════════════════════════════════════════════════════════════════════════
// ShapeLibrary
// ════════════════════════════════════════════════════════════════════════════

/// Owns the random source and pulse clock, and dispatches to generators.
pub struct ShapeLibrary {
    rng:   StdRng,
    epoch: Instant,
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeLibrary {
    /// Library seeded from OS entropy.
    pub fn new() -> Self {
        ShapeLibrary { rng: StdRng::from_entropy(), epoch: Instant::now() }
    }

    /// Library with a fixed seed; identical call sequences at identical
    /// clock values reproduce identical buffers.
    pub fn seeded(seed: u64) -> Self {
        ShapeLibrary { rng: StdRng::seed_from_u64(seed), epoch: Instant::now() }
    }

    /// Milliseconds since the library was created; drives the heart pulse.
    pub fn clock_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Write `count` points of `shape` into `out`.
    ///
    /// `out` should hold `3 * count` floats.  If it is shorter, only the
    /// points that fit are written; if longer, the tail is left untouched.
    pub fn generate(&mut self, shape: ShapeId, count: usize, out: &mut [f32]) {
        let now = self.clock_ms();
        self.generate_at(shape, count, out, now);
    }

    /// [`generate`](Self::generate) with an explicit pulse clock.
    pub fn generate_at(&mut self, shape: ShapeId, count: usize, out: &mut [f32], time_ms: f64) {
        let fit = count.min(out.len() / 3);
        if fit < count {
            log::warn!(
                "{} requested {} points but the buffer holds {}; writing {}",
                shape, count, out.len() / 3, fit
            );
        }
        let mut sampler = Sampler::new(&mut self.rng, time_ms);
        (shape.generator())(&mut sampler, &mut out[..fit * 3]);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
