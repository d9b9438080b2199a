//! leap_particles: interactive entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use leap_particles::config::{AppConfig, CapabilityTier, ProfileOverrides};
use leap_particles::{run, run_headless};

#[derive(Parser, Debug)]
#[command(name = "leap_particles", version, about = "Gesture-steered particle silhouettes")]
struct Cli {
    /// Capability tier: small-screen, mobile, or desktop.
    #[arg(long)]
    tier: Option<CapabilityTier>,

    /// TOML file overriding individual tier settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Particle count, overriding tier and file.
    #[arg(long)]
    particles: Option<usize>,

    /// Seed for reproducible sampling.
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many frames of a scripted gesture walk without a window,
    /// then print a summary.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let overrides = match &cli.config {
        Some(path) => ProfileOverrides::load(path)
            .with_context(|| format!("loading overrides from {}", path.display()))?,
        None => ProfileOverrides::default(),
    };
    let cfg = AppConfig::resolve(cli.tier, &overrides, cli.particles, cli.seed);

    if let Some(frames) = cli.headless {
        let summary = run_headless(&cfg, frames);
        println!("{} tier, {} particles", cfg.tier, cfg.profile.particle_count);
        println!("{}", summary);
        return Ok(());
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Leap Particles — Gesture-Steered Silhouettes        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!("  Tier: {}  ({} particles)", cfg.tier, cfg.profile.particle_count);
    println!();
    println!("  Opening visualizer window…");
    println!();

    run(cfg).context("visualizer loop failed")
}
