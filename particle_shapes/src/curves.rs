//! Open and closed parametric curves: lemniscate, arc, rose.

use std::f32::consts::PI;

use crate::Sampler;

const LEMNISCATE_SCALE: f32 = 8.0;

/// Lemniscate of Bernoulli, swept twice over `t ∈ [0, 4π)`
/// by particle index so neighbouring indices sit next to each other on the
/// curve.
pub(crate) fn infinity(s: &mut Sampler<'_>, out: &mut [f32]) {
    let n = out.len() / 3;
    for (i, p) in out.chunks_exact_mut(3).enumerate() {
        let t = i as f32 / n as f32 * PI * 4.0;
        let (sin, cos) = t.sin_cos();
        let denom = 1.0 + sin * sin;

        p[0] = LEMNISCATE_SCALE * cos / denom;
        p[1] = LEMNISCATE_SCALE * sin * cos / denom;
        p[2] = s.centered() * 2.0;
    }
}

/// Parabolic arch spanning `x ∈ [-20, 20)`, dipping to `y = -15` at the
/// centre, with a little vertical scatter.
pub(crate) fn bridge(s: &mut Sampler<'_>, out: &mut [f32]) {
    let n = out.len() / 3;
    for (i, p) in out.chunks_exact_mut(3).enumerate() {
        let t = i as f32 / n as f32 - 0.5;
        let span = t * 2.0;

        p[0] = t * 40.0;
        p[1] = -15.0 * (1.0 - span * span) + s.unit() * 2.0;
        p[2] = s.centered() * 3.0;
    }
}

/// Five-petal rose `r = |cos 5θ|·12 + 2`, bloomed over the sphere and
/// flattened in depth.
pub(crate) fn rose(s: &mut Sampler<'_>, out: &mut [f32]) {
    const PETALS: f32 = 5.0;
    for p in out.chunks_exact_mut(3) {
        let theta = s.angle();
        let phi = s.unit() * PI;
        let r = (PETALS * theta).cos().abs() * 12.0 + 2.0;

        p[0] = r * phi.sin() * theta.cos();
        p[1] = r * phi.sin() * theta.sin();
        p[2] = r * phi.cos() * 0.3 - 5.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(gen: fn(&mut Sampler<'_>, &mut [f32]), n: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = Sampler::new(&mut rng, 0.0);
        let mut buf = vec![0.0; n * 3];
        gen(&mut s, &mut buf);
        buf
    }

    #[test]
    fn infinity_xy_is_index_driven() {
        // Different seeds only change the z jitter.
        let a = run(infinity, 360, 1);
        let b = run(infinity, 360, 2);
        for (pa, pb) in a.chunks_exact(3).zip(b.chunks_exact(3)) {
            assert_eq!(pa[0], pb[0]);
            assert_eq!(pa[1], pb[1]);
        }
        assert_eq!(a[0], LEMNISCATE_SCALE);
        assert_eq!(a[1], 0.0);
    }

    #[test]
    fn infinity_neighbours_are_close() {
        let buf = run(infinity, 2000, 0);
        for w in buf.chunks_exact(3).collect::<Vec<_>>().windows(2) {
            let dx = w[1][0] - w[0][0];
            let dy = w[1][1] - w[0][1];
            assert!((dx * dx + dy * dy).sqrt() < 0.1);
        }
    }

    #[test]
    fn bridge_arch_shape() {
        let buf = run(bridge, 1000, 0);
        let pts: Vec<&[f32]> = buf.chunks_exact(3).collect();
        assert_eq!(pts[0][0], -20.0);
        // Ends rest near y ∈ [0, 2), centre near y ∈ [-15, -13).
        assert!(pts[0][1] >= 0.0 && pts[0][1] < 2.0);
        assert!(pts[500][1] >= -15.0 && pts[500][1] < -13.0);
        for p in &pts {
            assert!(p[0] >= -20.0 && p[0] < 20.0);
        }
    }

    #[test]
    fn rose_radius_band() {
        let buf = run(rose, 3000, 9);
        for p in buf.chunks_exact(3) {
            let planar = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!(planar <= 14.0 + 1e-3);
            assert!(p[2] >= -5.0 - 14.0 * 0.3 - 1e-3 && p[2] <= -5.0 + 14.0 * 0.3 + 1e-3);
        }
    }
}
