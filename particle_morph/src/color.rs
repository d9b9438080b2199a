//! Linear RGB triples, HSL conversion, and packing for the framebuffer.

use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    /// `#FF1493`, the resting tint before any hand has chosen a hue.
    pub const DEEP_PINK: Rgb = Rgb::new(1.0, 20.0 / 255.0, 147.0 / 255.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    pub fn from_hex(hex: u32) -> Self {
        Rgb {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Convert HSL → RGB.  `h` wraps into `[0, 1)`; `s` and `l` are clamped.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = if h.is_finite() { h.rem_euclid(1.0) } else { 0.0 };
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Rgb::new(l, l, l);
        }
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgb {
            r: hue_channel(p, q, h + 1.0 / 3.0),
            g: hue_channel(p, q, h),
            b: hue_channel(p, q, h - 1.0 / 3.0),
        }
    }

    /// Fully saturated, mid-lightness color for a hue in `[0, 1)`.
    pub fn from_hue(h: f32) -> Self {
        Rgb::from_hsl(h, 1.0, 0.5)
    }

    /// Per-channel `(1 − t)·self + t·to`.
    pub fn lerp(self, to: Rgb, t: f32) -> Rgb {
        Rgb {
            r: lerp(self.r, to.r, t),
            g: lerp(self.g, to.g, t),
            b: lerp(self.b, to.b, t),
        }
    }

    pub fn scaled(self, k: f32) -> Rgb {
        Rgb { r: self.r * k, g: self.g * k, b: self.b * k }
    }

    /// Pack into `0xAARRGGBB` with opaque alpha; channels saturate at 1.
    pub fn to_argb(self) -> u32 {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        0xFF00_0000 | (q(self.r) << 16) | (q(self.g) << 8) | q(self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// `(1 − t)·a + t·b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn primary_hues() {
        assert!(close(Rgb::from_hue(0.0), Rgb::new(1.0, 0.0, 0.0)));
        assert!(close(Rgb::from_hue(1.0 / 3.0), Rgb::new(0.0, 1.0, 0.0)));
        assert!(close(Rgb::from_hue(2.0 / 3.0), Rgb::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hue_wraps() {
        assert!(close(Rgb::from_hue(1.25), Rgb::from_hue(0.25)));
        assert!(close(Rgb::from_hue(-0.75), Rgb::from_hue(0.25)));
    }

    #[test]
    fn non_finite_hue_is_red() {
        assert!(close(Rgb::from_hue(f32::NAN), Rgb::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(Rgb::from_hsl(0.4, 0.0, 0.3), Rgb::new(0.3, 0.3, 0.3));
    }

    #[test]
    fn deep_pink_hex() {
        assert_eq!(Rgb::DEEP_PINK.to_argb(), 0xFFFF1493);
        assert_eq!(Rgb::from_hex(0xFF1493), Rgb::DEEP_PINK);
    }

    #[test]
    fn argb_opaque_and_saturating() {
        assert_eq!(Rgb::new(2.0, -1.0, 0.5).to_argb(), 0xFFFF0080);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::WHITE;
        let b = Rgb::new(0.0, 0.5, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert!(close(a.lerp(b, 1.0), b));
    }
}
