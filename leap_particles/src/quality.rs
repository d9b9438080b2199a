//! Frame-rate measurement and the opacity back-off for slow machines.

use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(2);
const LOW_FPS: f32 = 20.0;
/// Consecutive slow windows tolerated before backing off.
const STREAK_LIMIT: u32 = 3;
const OPACITY_STEP: f32 = 0.1;
const OPACITY_FLOOR: f32 = 0.5;

/// Counts frames over fixed windows.  When enabled, a run of more than
/// three slow windows lowers the point opacity one step.
#[derive(Clone, Debug)]
pub struct FrameRateGovernor {
    enabled:      bool,
    window_start: Instant,
    frames:       u32,
    low_streak:   u32,
    fps:          f32,
    opacity:      f32,
}

impl FrameRateGovernor {
    pub fn new(enabled: bool, opacity: f32, now: Instant) -> Self {
        FrameRateGovernor {
            enabled,
            window_start: now,
            frames: 0,
            low_streak: 0,
            fps: 0.0,
            opacity,
        }
    }

    /// Record one presented frame.  Returns the new opacity when it drops.
    pub fn frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < WINDOW {
            return None;
        }

        self.fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = now;

        if !self.enabled {
            return None;
        }
        if self.fps < LOW_FPS {
            self.low_streak += 1;
        } else {
            self.low_streak = 0;
        }
        if self.low_streak <= STREAK_LIMIT {
            return None;
        }

        self.low_streak = 0;
        let lowered = (self.opacity - OPACITY_STEP).max(OPACITY_FLOOR);
        if lowered < self.opacity {
            log::info!("{:.1} fps sustained; lowering opacity {:.2} → {:.2}", self.fps, self.opacity, lowered);
            self.opacity = lowered;
            Some(lowered)
        } else {
            None
        }
    }

    /// Frames per second over the last completed window.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed one full window at `fps`, landing the last frame exactly on the
    /// window boundary; returns that frame's result.
    fn window(g: &mut FrameRateGovernor, t: &mut Instant, fps: u32) -> Option<f32> {
        let start = *t;
        let frames = fps * 2;
        let step = Duration::from_secs(1) / fps;
        for i in 1..frames {
            assert_eq!(g.frame(start + step * i), None);
        }
        *t = start + WINDOW;
        g.frame(*t)
    }

    #[test]
    fn measures_fps() {
        let mut t = Instant::now();
        let mut g = FrameRateGovernor::new(false, 0.8, t);
        window(&mut g, &mut t, 60);
        assert!((g.fps() - 60.0).abs() < 0.01, "fps {}", g.fps());
    }

    #[test]
    fn fourth_slow_window_drops_opacity() {
        let mut t = Instant::now();
        let mut g = FrameRateGovernor::new(true, 0.8, t);
        for _ in 0..3 {
            assert_eq!(window(&mut g, &mut t, 5), None);
        }
        let dropped = window(&mut g, &mut t, 5).unwrap();
        assert!((dropped - 0.7).abs() < 1e-6);
        assert!((g.opacity() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn fast_window_resets_streak() {
        let mut t = Instant::now();
        let mut g = FrameRateGovernor::new(true, 0.8, t);
        for _ in 0..3 {
            window(&mut g, &mut t, 5);
        }
        window(&mut g, &mut t, 60);
        for _ in 0..3 {
            assert_eq!(window(&mut g, &mut t, 5), None);
        }
        assert_eq!(g.opacity(), 0.8);
    }

    #[test]
    fn opacity_floors_at_half() {
        let mut t = Instant::now();
        let mut g = FrameRateGovernor::new(true, 0.8, t);
        for _ in 0..40 {
            window(&mut g, &mut t, 5);
        }
        assert!((g.opacity() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn disabled_never_drops() {
        let mut t = Instant::now();
        let mut g = FrameRateGovernor::new(false, 0.8, t);
        for _ in 0..10 {
            assert_eq!(window(&mut g, &mut t, 5), None);
        }
        assert_eq!(g.opacity(), 0.8);
    }
}
