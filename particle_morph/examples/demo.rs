//! Morphs a scattered cloud through every silhouette and reports how many
//! frames each transition needs to settle at two different morph rates.

use particle_morph::{MorphParams, MorphState, ParticleBuffer, Rgb};
use particle_shapes::{ShapeId, ShapeLibrary};
use rand::rngs::StdRng;
use rand::SeedableRng;

const N: usize = 15_000;
const SETTLED: f32 = 0.01;

fn frames_to_settle(state: &mut MorphState, limit: usize) -> Option<usize> {
    (1..=limit).find(|_| {
        state.tick();
        state.max_deviation() < SETTLED
    })
}

fn main() {
    println!("\n=== Morph Convergence Demo ({} particles) ===\n", N);

    for rate in [0.06_f32, 0.08] {
        println!("morph_rate = {}", rate);
        let mut rng = StdRng::seed_from_u64(1);
        let mut library = ShapeLibrary::seeded(1);
        let params = MorphParams { morph_rate: rate, ..MorphParams::default() };
        let mut state = MorphState::new(ParticleBuffer::scattered(N, 50.0, &mut rng), params);

        for shape in ShapeId::all() {
            let generation = state.retarget(|buf| library.generate(shape, N, buf));
            match frames_to_settle(&mut state, 2_000) {
                Some(f) => println!("   gen {:>2}  {:<20} settled in {:>4} frames", generation, shape.name(), f),
                None    => println!("   gen {:>2}  {:<20} still moving after 2000 frames", generation, shape.name()),
            }
        }
        println!();
    }

    println!("Color easing white → hue 0.75 at smoothing 0.1:");
    let mut state = MorphState::new(ParticleBuffer::zeroed(1), MorphParams::default());
    state.set_hue_target(0.75);
    for frame in [1, 5, 10, 30] {
        while state.ticks() < frame {
            state.tick();
        }
        let Rgb { r, g, b } = state.color();
        println!("   frame {:>2}: ({:.3}, {:.3}, {:.3})  #{:06X}", frame, r, g, b, state.color().to_argb() & 0xFFFFFF);
    }
    println!();
}
