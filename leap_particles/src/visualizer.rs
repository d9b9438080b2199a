//! Software-rendered point cloud using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  status caption                                          │
//! │                                                          │
//! │                  · ·  ·   ·  · ·                         │
//! │               ·   particle cloud   ·                     │
//! │                  · ·  ·   ·  · ·                         │
//! │                                                          │
//! │  shape  fingers  scale  fps                              │
//! │  key legend                                              │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};
use particle_morph::Rgb;

use crate::app::Session;
use crate::error::AppError;
use crate::gesture::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:   usize = 1024;
pub const WIN_H:   usize = 768;
const BG_COLOR:    u32   = 0xFF000000;
const STATUS_BG:   u32   = 0xFF0F0F1E;
const STATUS_H:    usize = 26;
const HUD_Y:       usize = WIN_H - 34;
/// Vertical field of view.
const FOV_DEG:     f32   = 75.0;
/// Points closer than this to the eye are dropped.
const NEAR:        f32   = 0.1;
/// Widest splat, in pixels, however close a point comes.
const MAX_SPLAT:   usize = 8;
const TEXT_SCALE:  usize = 2;

const DIGIT_KEYS: [Key; 10] = [
    Key::Key0, Key::Key1, Key::Key2, Key::Key3, Key::Key4,
    Key::Key5, Key::Key6, Key::Key7, Key::Key8, Key::Key9,
];
const OPENNESS_STEP: f32 = 0.02;

// ════════════════════════════════════════════════════════════════════════════
// Camera
// ════════════════════════════════════════════════════════════════════════════

/// Perspective camera on the `+z` axis looking at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub distance: f32,
    /// Pixels per world unit at unit depth.
    pub focal:    f32,
    pub cx:       f32,
    pub cy:       f32,
}

impl Camera {
    pub fn new(distance: f32, width: usize, height: usize) -> Self {
        let half_fov = (FOV_DEG * 0.5).to_radians();
        Camera {
            distance,
            focal: (height as f32 * 0.5) / half_fov.tan(),
            cx:    width as f32 * 0.5,
            cy:    height as f32 * 0.5,
        }
    }

    /// Spin `p` about the vertical axis by `rotation`, scale it, and
    /// project.  Returns `(screen_x, screen_y, depth)`, or `None` behind
    /// the near plane.
    pub fn project(&self, p: [f32; 3], rotation: f32, scale: f32) -> Option<(f32, f32, f32)> {
        let (sin, cos) = rotation.sin_cos();
        let x = (p[0] * cos + p[2] * sin) * scale;
        let y = p[1] * scale;
        let z = (p[2] * cos - p[0] * sin) * scale;

        let depth = self.distance - z;
        if !(depth > NEAR) {
            return None;
        }
        let k = self.focal / depth;
        Some((self.cx + x * k, self.cy - y * k, depth))
    }

    /// Screen diameter of a point of world size `size` at `depth`, capped
    /// at `MAX_SPLAT` pixels.
    pub fn footprint(&self, size: f32, depth: f32) -> usize {
        ((size * self.focal / depth).round() as usize).clamp(1, MAX_SPLAT)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas: window-independent framebuffer
// ════════════════════════════════════════════════════════════════════════════

pub struct Canvas {
    pub buf: Vec<u32>,
    pub w:   usize,
    pub h:   usize,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Canvas { buf: vec![BG_COLOR; w * h], w, h }
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    /// Draw every particle of `session` with additive blending.
    pub fn draw_cloud(&mut self, session: &Session, camera: &Camera, opacity: f32) {
        let morph = session.morph();
        let rgb = channels(morph.color().scaled(opacity));
        let size = session.profile().point_size;
        let (rotation, scale) = (morph.rotation(), morph.scale());

        for p in morph.current().points() {
            let Some((sx, sy, depth)) = camera.project(p, rotation, scale) else { continue };
            let d = camera.footprint(size, depth);
            let half = (d / 2) as f32;
            self.splat(sx - half, sy - half, d, rgb);
        }
    }

    /// Add `rgb` to a `d × d` square with its corner at `(x, y)`.
    fn splat(&mut self, x: f32, y: f32, d: usize, rgb: [u32; 3]) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let x0 = x.round() as isize;
        let y0 = y.round() as isize;
        for dy in 0..d as isize {
            for dx in 0..d as isize {
                self.add_pixel(x0 + dx, y0 + dy, rgb);
            }
        }
    }

    fn add_pixel(&mut self, x: isize, y: isize, rgb: [u32; 3]) {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return;
        }
        let px = &mut self.buf[y as usize * self.w + x as usize];
        let add = |shift: u32, c: u32| ((((*px >> shift) & 0xFF) + c).min(0xFF)) << shift;
        *px = 0xFF00_0000 | add(16, rgb[0]) | add(8, rgb[1]) | add(0, rgb[2]);
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.h) {
            for col in x..(x + w).min(self.w) {
                self.buf[row * self.w + col] = color;
            }
        }
    }

    /// Minimal bitmap font: 3×5 characters blown up `scale` times.
    /// Each character is encoded as 5 rows × 3 bits.
    pub fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let advance = 4 * scale; // 3 wide + 1 gap
        let mut cx = x;
        for ch in text.chars() {
            if cx + advance > self.w {
                break;
            }
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += advance;
        }
    }

    fn draw_hud(&mut self, session: &Session, fps: f32) {
        self.fill_rect(0, 0, self.w, STATUS_H, STATUS_BG);
        self.draw_label(session.status(), 10, 8, TEXT_SCALE, 0xFFEEEEEE);

        let morph = session.morph();
        let fingers = match session.last_fingers() {
            Some(n) => n.to_string(),
            None    => "-".to_string(),
        };
        let line = format!(
            "shape {}   fingers {}   scale {:.2}   fps {:.0}   gen {}",
            session.active(),
            fingers,
            morph.scale(),
            fps,
            morph.generation(),
        );
        self.draw_label(&line, 10, HUD_Y, TEXT_SCALE, 0xFFAADDFF);
        self.draw_label(
            "0-9=fingers  shift+0=ten  h=hand  up/down=pinch  mouse=hue  q=quit",
            10, WIN_H - 12, 1, 0xFF888888,
        );
    }
}

/// Color as additive 0–255 channel contributions.
fn channels(c: Rgb) -> [u32; 3] {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    [q(c.r), q(c.g), q(c.b)]
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:  Window,
    canvas:  Canvas,
    camera:  Camera,
    sim_tx:  Sender<SimInput>,
    mouse_x: Option<f32>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>, camera_distance: f32) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Leap Particles — gesture-steered silhouettes",
            WIN_W,
            WIN_H,
            WindowOptions { resize: false, ..WindowOptions::default() },
        )?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            canvas: Canvas::new(WIN_W, WIN_H),
            camera: Camera::new(camera_distance, WIN_W, WIN_H),
            sim_tx,
            mouse_x: None,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll keyboard and mouse and translate to [`SimInput`] events.
    /// Returns false on quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }

        let send = |input: SimInput| {
            let _ = self.sim_tx.send(input);
        };
        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let held = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            send(SimInput::Quit);
            return false;
        }

        let shift = self.window.is_key_down(Key::LeftShift) || self.window.is_key_down(Key::RightShift);
        for (n, &key) in DIGIT_KEYS.iter().enumerate() {
            if one_shot(key) {
                let fingers = if n == 0 && shift { 10 } else { n as u32 };
                send(SimInput::Fingers(fingers));
            }
        }
        if one_shot(Key::H) {
            send(SimInput::ToggleHand);
        }
        if held(Key::Up) {
            send(SimInput::Openness(OPENNESS_STEP));
        }
        if held(Key::Down) {
            send(SimInput::Openness(-OPENNESS_STEP));
        }

        if let Some((mx, _)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let x = (mx / WIN_W as f32).clamp(0.0, 1.0);
            if self.mouse_x.map_or(true, |prev| (prev - x).abs() > 0.002) {
                self.mouse_x = Some(x);
                send(SimInput::HandX(x));
            }
        }

        true
    }

    /// Render one frame.
    pub fn render(&mut self, session: &Session, opacity: f32, fps: f32) -> Result<(), AppError> {
        self.canvas.clear(BG_COLOR);
        self.canvas.draw_cloud(session, &self.camera, opacity);
        self.canvas.draw_hud(session, fps);
        self.window.update_with_buffer(&self.canvas.buf, WIN_W, WIN_H)?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
