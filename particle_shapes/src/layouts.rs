//! Composite layouts built by partitioning the particle budget into regions.

use std::f32::consts::TAU;

use crate::hearts::heart_curve;
use crate::{regions, shares, Sampler};

const MONTHS: usize = 6;
const DAYS_PER_MONTH: usize = 30;

/// Six columns of thirty day-buckets.  Each bucket gets ⌊N/180⌋ particles;
/// the final bucket also takes the remainder.
pub(crate) fn calendar(s: &mut Sampler<'_>, out: &mut [f32]) {
    let n = out.len() / 3;
    let counts = shares(n, MONTHS * DAYS_PER_MONTH);
    for (bucket, region) in regions(out, &counts).into_iter().enumerate() {
        let month = (bucket / DAYS_PER_MONTH) as f32;
        let day = (bucket % DAYS_PER_MONTH) as f32;
        for p in region.chunks_exact_mut(3) {
            p[0] = (month - 2.5) * 8.0 + s.centered() * 1.5;
            p[1] = (day - 15.0) * 0.8 + s.centered() * 0.5;
            p[2] = s.centered() * 2.0;
        }
    }
}

/// A flat 20 × 14 sheet with the upper half lifted into a flap and a small
/// cone bump in the middle.
pub(crate) fn envelope(s: &mut Sampler<'_>, out: &mut [f32]) {
    for p in out.chunks_exact_mut(3) {
        let u = s.centered() * 20.0;
        let v = s.centered() * 14.0;
        let mut z = 0.0_f32;

        if u.abs() < 10.0 && v > 0.0 && v < 7.0 {
            z = (7.0 - v) * 0.5;
        }
        if u.abs() < 3.0 && v.abs() < 3.0 {
            let dist = (u * u + v * v).sqrt();
            z = z.max(5.0 - dist);
        }

        p[0] = u;
        p[1] = v;
        p[2] = z + s.centered();
    }
}

/// A ring of radius 4 hovering at z = 5 (first ⌊0.3N⌋ particles, evenly
/// spaced) above the shell of a 12-unit cube centred at z = −5.
pub(crate) fn ring_box(s: &mut Sampler<'_>, out: &mut [f32]) {
    const BOX: f32 = 12.0;
    const HALF: f32 = BOX / 2.0;
    const RING_RADIUS: f32 = 4.0;

    let n = out.len() / 3;
    let ring_n = (n as f32 * 0.3) as usize;
    let mut parts = regions(out, &[ring_n, n - ring_n]).into_iter();
    let (ring, shell) = match (parts.next(), parts.next()) {
        (Some(r), Some(b)) => (r, b),
        _ => return,
    };

    for (i, p) in ring.chunks_exact_mut(3).enumerate() {
        let t = i as f32 / ring_n as f32 * TAU;
        p[0] = RING_RADIUS * t.cos();
        p[1] = RING_RADIUS * t.sin();
        p[2] = 5.0;
    }

    for p in shell.chunks_exact_mut(3) {
        let face = s.below(6);
        let u = s.centered() * BOX;
        let v = s.centered() * BOX;
        let (x, y, z) = match face {
            0 => (HALF, u, v - 5.0),
            1 => (-HALF, u, v - 5.0),
            2 => (u, HALF, v - 5.0),
            3 => (u, -HALF, v - 5.0),
            4 => (u, v, HALF - 5.0),
            _ => (u, v, -HALF - 5.0),
        };
        p[0] = x;
        p[1] = y;
        p[2] = z;
    }
}

/// A clock rim of radius 15 (first ⌊0.4N⌋ particles, evenly spaced) around
/// a half-size filled heart.
pub(crate) fn countdown(s: &mut Sampler<'_>, out: &mut [f32]) {
    const CLOCK_RADIUS: f32 = 15.0;

    let n = out.len() / 3;
    let rim_n = (n as f32 * 0.4) as usize;
    let mut parts = regions(out, &[rim_n, n - rim_n]).into_iter();
    let (rim, heart) = match (parts.next(), parts.next()) {
        (Some(r), Some(h)) => (r, h),
        _ => return,
    };

    for (i, p) in rim.chunks_exact_mut(3).enumerate() {
        let t = i as f32 / rim_n as f32 * TAU;
        let r = CLOCK_RADIUS + s.centered();
        p[0] = r * t.cos();
        p[1] = r * t.sin();
        p[2] = s.centered();
    }

    for p in heart.chunks_exact_mut(3) {
        let t = s.angle();
        let r = s.unit();
        let (hx, hy) = heart_curve(t);
        let z = s.centered() * 2.0;
        p[0] = hx * 0.5 * 0.6 * r;
        p[1] = hy * 0.5 * 0.6 * r;
        p[2] = z;
    }
}
