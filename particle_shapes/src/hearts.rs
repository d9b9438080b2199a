//! Heart-curve silhouettes.

use std::f32::consts::FRAC_PI_4;

use crate::Sampler;

/// The classic polar heart: `x = 16 sin³t`, `y = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t`.
#[inline]
pub(crate) fn heart_curve(t: f32) -> (f32, f32) {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    (x, y)
}

/// A filled, beating heart.
pub(crate) fn heart(s: &mut Sampler<'_>, out: &mut [f32]) {
    let pulse = s.pulse();
    for p in out.chunks_exact_mut(3) {
        let t = s.angle();
        let r = s.unit();
        let (hx, hy) = heart_curve(t);
        let z = s.centered() * 5.0;

        p[0] = hx * pulse * 0.8 * r;
        p[1] = hy * pulse * 0.8 * r;
        p[2] = z * r;
    }
}

/// Two half-size hearts, the first ⌊N/2⌋ particles on the left.
pub(crate) fn two_hearts(s: &mut Sampler<'_>, out: &mut [f32]) {
    let half = out.len() / 3 / 2;
    for (i, p) in out.chunks_exact_mut(3).enumerate() {
        let t = s.angle();
        let r = s.unit();
        let (hx, hy) = heart_curve(t);
        let z = s.centered() * 3.0;

        let offset = if i < half { -10.0 } else { 10.0 };
        p[0] = hx * 0.5 * r + offset;
        p[1] = hy * 0.5 * r;
        p[2] = z * r;
    }
}

/// Two hearts leaning into each other: the first half rotated +45° and
/// shifted left, the rest rotated −45° and shifted right.
pub(crate) fn intertwined_hearts(s: &mut Sampler<'_>, out: &mut [f32]) {
    let half = out.len() / 3 / 2;
    for (i, p) in out.chunks_exact_mut(3).enumerate() {
        let t = s.angle();
        let r = s.unit();
        let (hx, hy) = heart_curve(t);
        let z = s.centered() * 5.0;

        let (x, y) = (hx * 0.4 * r, hy * 0.4 * r);
        let (angle, shift) = if i < half { (FRAC_PI_4, -5.0) } else { (-FRAC_PI_4, 5.0) };
        let (sin, cos) = angle.sin_cos();

        p[0] = x * cos - y * sin + shift;
        p[1] = x * sin + y * cos;
        p[2] = z * r;
    }
}
