//! Fixed-length point buffers and the double-buffered morph target.
//!
//! Both buffers are sized once for `N` particles and never reallocated.  A
//! new target is written into the hidden back buffer and only becomes
//! visible when it is swapped to the front, so a reader never observes a
//! half-written silhouette.

use rand::Rng;

/// `N` points stored flat as `[x0, y0, z0, x1, y1, z1, …]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBuffer {
    coords: Vec<f32>,
}

impl ParticleBuffer {
    /// All points at the origin.
    pub fn zeroed(count: usize) -> Self {
        ParticleBuffer { coords: vec![0.0; count * 3] }
    }

    /// Every coordinate uniform in `[-extent/2, extent/2)`.
    pub fn scattered<R: Rng + ?Sized>(count: usize, extent: f32, rng: &mut R) -> Self {
        let coords = (0..count * 3).map(|_| (rng.gen::<f32>() - 0.5) * extent).collect();
        ParticleBuffer { coords }
    }

    /// Number of points (not floats).
    pub fn len(&self) -> usize {
        self.coords.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.coords
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.coords
    }

    /// Point `i` as `[x, y, z]`.
    pub fn point(&self, i: usize) -> Option<[f32; 3]> {
        self.coords.get(i * 3..i * 3 + 3).map(|p| [p[0], p[1], p[2]])
    }

    pub fn points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.coords.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}

/// Front/back pair for morph targets with a monotonically increasing
/// generation counter.
#[derive(Clone, Debug)]
pub struct TargetBuffer {
    front:      ParticleBuffer,
    back:       ParticleBuffer,
    generation: u64,
}

impl TargetBuffer {
    /// Both halves start as copies of `initial`.
    pub fn new(initial: ParticleBuffer) -> Self {
        TargetBuffer { back: initial.clone(), front: initial, generation: 0 }
    }

    /// The visible target.
    pub fn front(&self) -> &ParticleBuffer {
        &self.front
    }

    /// Number of completed rewrites.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fill the back buffer with `fill`, then swap it to the front.
    ///
    /// `fill` receives a slice of exactly `3·N` floats and must overwrite
    /// all of them; the back buffer holds the target from two rewrites ago.
    pub fn rewrite<F>(&mut self, fill: F) -> u64
    where
        F: FnOnce(&mut [f32]),
    {
        fill(self.back.as_mut_slice());
        std::mem::swap(&mut self.front, &mut self.back);
        self.generation += 1;
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scatter_within_extent() {
        let mut rng = StdRng::seed_from_u64(0);
        let b = ParticleBuffer::scattered(1000, 50.0, &mut rng);
        assert_eq!(b.len(), 1000);
        assert!(b.as_slice().iter().all(|&c| (-25.0..25.0).contains(&c)));
    }

    #[test]
    fn point_access() {
        let mut b = ParticleBuffer::zeroed(2);
        b.as_mut_slice()[3..6].copy_from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(b.point(1), Some([1.0, 2.0, 3.0]));
        assert_eq!(b.point(2), None);
        assert_eq!(b.points().count(), 2);
    }

    #[test]
    fn empty_buffer() {
        let b = ParticleBuffer::zeroed(0);
        assert!(b.is_empty());
        assert_eq!(b.point(0), None);
    }

    #[test]
    fn rewrite_swaps_and_counts() {
        let mut t = TargetBuffer::new(ParticleBuffer::zeroed(2));
        assert_eq!(t.generation(), 0);
        let g = t.rewrite(|buf| buf.fill(7.0));
        assert_eq!(g, 1);
        assert!(t.front().as_slice().iter().all(|&c| c == 7.0));
        t.rewrite(|buf| {
            // Back buffer is the pre-swap front: still the initial zeros.
            assert!(buf.iter().all(|&c| c == 0.0));
            buf.fill(9.0);
        });
        assert_eq!(t.generation(), 2);
        assert!(t.front().as_slice().iter().all(|&c| c == 9.0));
    }

    #[test]
    fn rewrite_never_reallocates() {
        let mut t = TargetBuffer::new(ParticleBuffer::zeroed(64));
        let a = t.front().as_slice().as_ptr();
        t.rewrite(|buf| buf.fill(1.0));
        let b = t.front().as_slice().as_ptr();
        t.rewrite(|buf| buf.fill(2.0));
        assert_ne!(a, b);
        assert_eq!(t.front().as_slice().as_ptr(), a);
        assert_eq!(t.front().len(), 64);
    }
}
