//! The idle letterform: "LILI" inside a heart-shaped sparkle halo.

use crate::{regions, Sampler};

const LETTER_SPACING: f32 = 12.0;
const LETTER_HEIGHT: f32 = 18.0;
const LETTER_WIDTH: f32 = 10.0;
const STROKE_JITTER: f32 = 0.8;

#[derive(Clone, Copy)]
enum Glyph {
    L,
    I,
}

const WORD: [(Glyph, f32); 4] = [
    (Glyph::L, -LETTER_SPACING * 1.5),
    (Glyph::I, -LETTER_SPACING * 0.5),
    (Glyph::L, LETTER_SPACING * 0.5),
    (Glyph::I, LETTER_SPACING * 1.5),
];

/// Four equal letter groups of ⌊N/4⌋ particles; whatever is left over
/// becomes the halo.
pub(crate) fn lili(s: &mut Sampler<'_>, out: &mut [f32]) {
    let n = out.len() / 3;
    let per_letter = n / WORD.len();
    let mut sizes = [per_letter; WORD.len() + 1];
    sizes[WORD.len()] = n - per_letter * WORD.len();

    let mut parts = regions(out, &sizes).into_iter();
    for &(glyph, x0) in WORD.iter() {
        let Some(region) = parts.next() else { return };
        match glyph {
            Glyph::L => letter_l(s, region, x0),
            Glyph::I => letter_i(s, region, x0),
        }
    }
    if let Some(rest) = parts.next() {
        halo(s, rest);
    }
}

/// 60% of the share on the vertical stroke, 40% on the foot at `y = +9`.
fn letter_l(s: &mut Sampler<'_>, out: &mut [f32], x0: f32) {
    let n = out.len() / 3;
    for (i, p) in out.chunks_exact_mut(3).enumerate() {
        let t = i as f32 / n as f32;
        let (x, y) = if t < 0.6 {
            (x0 + s.centered() * STROKE_JITTER, t / 0.6 * LETTER_HEIGHT - LETTER_HEIGHT / 2.0)
        } else {
            (x0 + (t - 0.6) / 0.4 * LETTER_WIDTH, LETTER_HEIGHT / 2.0 - s.unit() * 0.5)
        };
        p[0] = x;
        p[1] = y;
        p[2] = s.centered() * 2.0;
    }
}

fn letter_i(s: &mut Sampler<'_>, out: &mut [f32], x0: f32) {
    let n = out.len() / 3;
    for (i, p) in out.chunks_exact_mut(3).enumerate() {
        let t = i as f32 / n as f32;
        p[0] = x0 + s.centered() * STROKE_JITTER;
        p[1] = t * LETTER_HEIGHT - LETTER_HEIGHT / 2.0;
        p[2] = s.centered() * 2.0;
    }
}

fn halo(s: &mut Sampler<'_>, out: &mut [f32]) {
    for p in out.chunks_exact_mut(3) {
        let angle = s.angle();
        let radius = 25.0 + s.unit() * 8.0;
        let heart_r = radius * (0.8 + 0.2 * (angle.sin() * 0.5 + 0.5));

        p[0] = angle.cos() * heart_r * 0.7;
        p[1] = angle.sin() * heart_r;
        p[2] = s.centered() * 4.0;
    }
}
