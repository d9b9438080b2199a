//! Interactive menu for inspecting the silhouette generators.
//! Pick a shape and a particle count; the menu prints the cloud's extent,
//! centroid, and (for small counts) the raw points.

use particle_shapes::{ShapeId, ShapeLibrary};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           Particle Silhouette Explorer               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let mut library = ShapeLibrary::new();
    let shapes = ShapeId::all();

    loop {
        print_menu();
        let choice = read_line("Select a shape (1–11, or q to quit): ");

        if choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let shape = match choice.trim().parse::<usize>() {
            Ok(i) if (1..=shapes.len()).contains(&i) => shapes[i - 1],
            _ => match choice.trim().parse::<ShapeId>() {
                Ok(s) => s,
                Err(e) => { println!("  ⚠  {}\n", e); continue; }
            },
        };

        let n: usize = read_line("  How many particles? (default 15000): ")
            .trim().parse().unwrap_or(15_000);
        let n = n.min(1_000_000);

        let mut buf = vec![0.0_f32; n * 3];
        library.generate(shape, n, &mut buf);

        println!();
        println!("  ┌─ {} ({} particles) ─", shape, n);
        println!("  │  Caption  : {}", shape.caption());

        if n == 0 {
            println!("  │  (empty cloud)");
            println!("  └─");
            println!();
            continue;
        }

        let (lo, hi, mean) = extent(&buf);
        println!("  │  Min      : ({:>8.3}, {:>8.3}, {:>8.3})", lo[0], lo[1], lo[2]);
        println!("  │  Max      : ({:>8.3}, {:>8.3}, {:>8.3})", hi[0], hi[1], hi[2]);
        println!("  │  Centroid : ({:>8.3}, {:>8.3}, {:>8.3})", mean[0], mean[1], mean[2]);

        if n <= 12 {
            println!("  │");
            for (i, p) in buf.chunks_exact(3).enumerate() {
                println!("  │  [{:>2}] ({:>8.3}, {:>8.3}, {:>8.3})", i, p[0], p[1], p[2]);
            }
        }
        println!("  └─");
        println!();
    }
}

fn extent(buf: &[f32]) -> ([f32; 3], [f32; 3], [f32; 3]) {
    let mut lo = [f32::INFINITY; 3];
    let mut hi = [f32::NEG_INFINITY; 3];
    let mut sum = [0.0_f64; 3];
    for p in buf.chunks_exact(3) {
        for k in 0..3 {
            lo[k] = lo[k].min(p[k]);
            hi[k] = hi[k].max(p[k]);
            sum[k] += p[k] as f64;
        }
    }
    let n = (buf.len() / 3).max(1) as f64;
    let mean = [(sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32];
    (lo, hi, mean)
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    for (i, s) in ShapeId::all().iter().enumerate() {
        println!("  │  {:>2}. {:47} │", i + 1, s.name());
    }
    println!("  └──────────────────────────────────────────────────────┘");
    println!();
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
