//! Top-level application state.
//!
//! [`Session`] owns the shape library, the morph state, the selector, and
//! the gesture counters.  Hand frames go in through [`Session::on_frame`];
//! the render loop calls [`Session::tick`] once per display frame and reads
//! the morph state back out.  Nothing here is global, so independent
//! sessions can run side by side in tests.

use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use gesture_map::synthetic::synthetic_frame;
use gesture_map::{
    GestureClassifier, GestureSignal, HandFrame, NoHandReason, ShapeSelector, Transition,
};
use particle_morph::{MorphState, ParticleBuffer, Rgb};
use particle_shapes::{ShapeId, ShapeLibrary};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{AppConfig, TierProfile};
use crate::error::AppError;
use crate::gesture::{spawn_gesture_source, SimInput};
use crate::quality::FrameRateGovernor;
use crate::visualizer::Visualizer;

/// Side of the cube the particles start scattered in.
const SCATTER_EXTENT: f32 = 50.0;
/// Pulse clock step per display frame for seeded sessions.
const FRAME_MS: f64 = 1000.0 / 60.0;

// ════════════════════════════════════════════════════════════════════════════
// GestureStats
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameKind {
    NoHand,
    Malformed,
    Fist,
    Raised,
}

/// Running counts of what the classifier has seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GestureStats {
    pub frames:      u64,
    pub no_hand:     u64,
    pub zero_finger: u64,
    pub malformed:   u64,
    pub transitions: u64,
    last:            Option<FrameKind>,
}

impl GestureStats {
    fn record(&mut self, signal: &GestureSignal) {
        self.frames += 1;
        let kind = match signal {
            GestureSignal::NoHand(NoHandReason::Absent) => {
                self.no_hand += 1;
                FrameKind::NoHand
            }
            GestureSignal::NoHand(NoHandReason::Malformed) => {
                self.malformed += 1;
                FrameKind::Malformed
            }
            GestureSignal::Hands(r) if r.finger_count == 0 => {
                self.zero_finger += 1;
                FrameKind::Fist
            }
            GestureSignal::Hands(_) => FrameKind::Raised,
        };

        if self.last != Some(kind) {
            match kind {
                FrameKind::NoHand => log::debug!("no hand in view"),
                FrameKind::Fist   => log::debug!("hand in view with no fingers raised"),
                _ => {}
            }
        }
        self.last = Some(kind);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

pub struct Session {
    profile:      TierProfile,
    library:      ShapeLibrary,
    morph:        MorphState,
    classifier:   GestureClassifier,
    selector:     ShapeSelector,
    stats:        GestureStats,
    status:       String,
    last_fingers: Option<u32>,
    /// Seeded sessions read the heart pulse off the tick count instead of
    /// the wall clock, so their targets replay exactly.
    frame_clock:  bool,
}

impl Session {
    /// Scatter the particles and aim them at the idle silhouette.
    pub fn new(profile: TierProfile, seed: Option<u64>) -> Self {
        let frame_clock = seed.is_some();
        let (mut rng, mut library) = match seed {
            Some(s) => (StdRng::seed_from_u64(s), ShapeLibrary::seeded(s.wrapping_add(1))),
            None    => (StdRng::from_entropy(), ShapeLibrary::new()),
        };

        let n = profile.particle_count;
        let scatter = ParticleBuffer::scattered(n, SCATTER_EXTENT, &mut rng);
        let mut morph = MorphState::new(scatter, profile.morph);
        let now = if frame_clock { 0.0 } else { library.clock_ms() };
        morph.retarget(|buf| library.generate_at(ShapeId::IDLE, n, buf, now));
        morph.set_color_target(Rgb::DEEP_PINK);

        log::info!("session started with {} particles on {}", n, ShapeId::IDLE);

        Session {
            profile,
            library,
            morph,
            classifier: GestureClassifier::new(),
            selector: ShapeSelector::new(),
            stats: GestureStats::default(),
            status: ShapeId::IDLE.caption().to_string(),
            last_fingers: None,
            frame_clock,
        }
    }

    /// Classify one hand frame and push the resulting targets into the
    /// morph state.  The target buffer is regenerated only when the active
    /// shape changes.
    pub fn on_frame(&mut self, frame: &HandFrame) -> Option<Transition> {
        let signal = self.classifier.classify(frame);
        self.stats.record(&signal);
        self.last_fingers = signal.finger_count();

        let decision = self.selector.observe(&signal);
        self.morph.set_scale_target(decision.targets.scale_target);
        if let Some(hue) = decision.targets.hue_target {
            self.morph.set_hue_target(hue);
        }

        let t = decision.transition?;
        let n = self.morph.particle_count();
        let now = self.clock_ms();
        let library = &mut self.library;
        let generation = self.morph.retarget(|buf| library.generate_at(t.to, n, buf, now));
        self.stats.transitions += 1;
        self.status = t.to.caption().to_string();
        log::info!("{} → {} (target generation {}): {}", t.from, t.to, generation, self.status);
        Some(t)
    }

    fn clock_ms(&self) -> f64 {
        if self.frame_clock {
            self.morph.ticks() as f64 * FRAME_MS
        } else {
            self.library.clock_ms()
        }
    }

    /// Advance one display frame.
    pub fn tick(&mut self) {
        self.morph.tick();
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn morph(&self)        -> &MorphState    { &self.morph }
    pub fn profile(&self)      -> &TierProfile   { &self.profile }
    pub fn stats(&self)        -> &GestureStats  { &self.stats }
    pub fn status(&self)       -> &str           { &self.status }
    pub fn active(&self)       -> ShapeId        { self.selector.active() }
    pub fn last_fingers(&self) -> Option<u32>    { self.last_fingers }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the windowed loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer, the hand-frame source (simulation by default,
/// hardware with `--features leap`), and drives the event/render loop at
/// ~60 fps.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    // ── Sim input channel ─────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    #[cfg(not(feature = "leap"))]
    let frames = spawn_gesture_source(crate::gesture::SimGestureSource {
        rx:       sim_rx,
        detector: cfg.profile.detector,
    });
    #[cfg(feature = "leap")]
    let frames = {
        drop(sim_rx);
        spawn_gesture_source(crate::gesture::LeapHandSource { detector: cfg.profile.detector })
    };

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx, cfg.profile.camera_distance)?;

    let mut session = Session::new(cfg.profile.clone(), cfg.seed);
    let mut governor = FrameRateGovernor::new(cfg.profile.adaptive_quality, cfg.profile.opacity, Instant::now());

    // ── Main loop ─────────────────────────────────────────────────────────
    'frames: while vis.is_open() {
        if !vis.poll_input() {
            break;
        }

        loop {
            match frames.try_recv() {
                Ok(frame) => {
                    session.on_frame(&frame);
                }
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => break 'frames,
            }
        }

        session.tick();
        governor.frame(Instant::now());
        vis.render(&session, governor.opacity(), governor.fps())?;
    }

    log::info!("{}", Summary::of(&session));
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Headless run
// ════════════════════════════════════════════════════════════════════════════

/// Display frames each scripted gesture is held for.
const HOLD_FRAMES: u64 = 60;

/// Finger totals cycled through by [`run_headless`]; `None` is no hand.
const SCRIPT: [Option<u32>; 13] = [
    None, Some(1), Some(2), Some(3), Some(4), Some(5), Some(6),
    Some(7), Some(8), Some(9), Some(10), Some(0), None,
];

/// End-of-run report.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub ticks:         u64,
    pub generation:    u64,
    pub active:        ShapeId,
    pub max_deviation: f32,
    pub stats:         GestureStats,
}

impl Summary {
    pub fn of(session: &Session) -> Self {
        Summary {
            ticks:         session.morph().ticks(),
            generation:    session.morph().generation(),
            active:        session.active(),
            max_deviation: session.morph().max_deviation(),
            stats:         session.stats().clone(),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = &self.stats;
        write!(
            f,
            "{} ticks, {} hand frames ({} no-hand, {} fist, {} malformed), {} transitions, \
             target generation {}, active {}, max deviation {:.4}",
            self.ticks, s.frames, s.no_hand, s.zero_finger, s.malformed, s.transitions,
            self.generation, self.active, self.max_deviation,
        )
    }
}

/// Drive a session without a window for `frames` display frames, feeding
/// a scripted walk through every finger count.  A hand frame arrives every
/// other display frame.
pub fn run_headless(cfg: &AppConfig, frames: u64) -> Summary {
    let mut session = Session::new(cfg.profile.clone(), cfg.seed);
    for f in 0..frames {
        if f % 2 == 0 {
            let step = (f / HOLD_FRAMES) as usize % SCRIPT.len();
            let hand_x = (f % 600) as f32 / 600.0;
            let frame = match SCRIPT[step] {
                Some(n) => synthetic_frame(n, 0.05 + 0.05 * (step % 4) as f32, hand_x),
                None    => HandFrame::empty(),
            };
            session.on_frame(&cfg.profile.detector.admit(frame));
        }
        session.tick();
    }
    Summary::of(&session)
}
