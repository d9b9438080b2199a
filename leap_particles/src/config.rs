//! Startup configuration: capability tiers plus an optional TOML override
//! file.
//!
//! ```toml
//! tier = "mobile"
//! particle_count = 10000
//! morph_rate = 0.07
//!
//! [detector]
//! max_hands = 1
//! ```
//!
//! Anything the file leaves out comes from the chosen tier.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use gesture_map::DetectorConfig;
use particle_morph::MorphParams;
use serde::Deserialize;

use crate::error::AppError;

// ════════════════════════════════════════════════════════════════════════════
// CapabilityTier
// ════════════════════════════════════════════════════════════════════════════

/// Coarse device class, used only to pick constants once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityTier {
    SmallScreen,
    Mobile,
    #[default]
    Desktop,
}

impl CapabilityTier {
    pub fn all() -> [CapabilityTier; 3] {
        [CapabilityTier::SmallScreen, CapabilityTier::Mobile, CapabilityTier::Desktop]
    }

    pub fn name(self) -> &'static str {
        match self {
            CapabilityTier::SmallScreen => "small-screen",
            CapabilityTier::Mobile      => "mobile",
            CapabilityTier::Desktop     => "desktop",
        }
    }

    /// Fixed constants for this tier.
    pub fn profile(self) -> TierProfile {
        let desktop = self == CapabilityTier::Desktop;
        let (particle_count, camera_distance, camera_width, camera_height) = match self {
            CapabilityTier::SmallScreen => (5_000, 35.0, 320, 240),
            CapabilityTier::Mobile      => (8_000, 32.0, 480, 360),
            CapabilityTier::Desktop     => (15_000, 30.0, 640, 480),
        };
        let confidence = if desktop { 0.7 } else { 0.6 };

        TierProfile {
            particle_count,
            point_size: if desktop { 0.15 } else { 0.22 },
            morph: MorphParams {
                morph_rate:      if desktop { 0.08 } else { 0.06 },
                rotation_rate:   if desktop { 0.002 } else { 0.001 },
                scale_smoothing: 0.1,
                color_smoothing: 0.1,
            },
            camera_distance,
            opacity: 0.8,
            adaptive_quality: !desktop,
            detector: DetectorConfig {
                max_hands:                2,
                model_complexity:         u8::from(desktop),
                min_detection_confidence: confidence,
                min_tracking_confidence:  confidence,
                camera_width,
                camera_height,
            },
        }
    }
}

impl fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CapabilityTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "small-screen" | "small" | "smallscreen" => Ok(CapabilityTier::SmallScreen),
            "mobile"                                 => Ok(CapabilityTier::Mobile),
            "desktop"                                => Ok(CapabilityTier::Desktop),
            _ => Err(AppError::InvalidTier(s.to_string())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TierProfile
// ════════════════════════════════════════════════════════════════════════════

/// Everything fixed at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct TierProfile {
    pub particle_count:   usize,
    /// Point diameter in world units.
    pub point_size:       f32,
    pub morph:            MorphParams,
    pub camera_distance:  f32,
    pub opacity:          f32,
    /// Let the frame-rate governor lower opacity on slow machines.
    pub adaptive_quality: bool,
    pub detector:         DetectorConfig,
}

impl Default for TierProfile {
    fn default() -> Self {
        CapabilityTier::default().profile()
    }
}

impl TierProfile {
    /// Replace unusable values with the `fallback` tier's, and force the
    /// morph rates into `(0, 1]`.
    pub fn sanitized(mut self, fallback: &TierProfile) -> Self {
        self.morph = self.morph.sanitized();
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            log::warn!("point_size = {} is not positive; using {}", self.point_size, fallback.point_size);
            self.point_size = fallback.point_size;
        }
        if !(self.camera_distance.is_finite() && self.camera_distance > 0.0) {
            log::warn!(
                "camera_distance = {} is not positive; using {}",
                self.camera_distance,
                fallback.camera_distance
            );
            self.camera_distance = fallback.camera_distance;
        }
        self.opacity = if self.opacity.is_finite() { self.opacity.clamp(0.0, 1.0) } else { fallback.opacity };
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Override file
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorOverrides {
    pub max_hands:                Option<usize>,
    pub model_complexity:         Option<u8>,
    pub min_detection_confidence: Option<f32>,
    pub min_tracking_confidence:  Option<f32>,
    pub camera_width:             Option<u32>,
    pub camera_height:            Option<u32>,
}

/// Contents of a TOML override file.  Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOverrides {
    pub tier:             Option<CapabilityTier>,
    pub particle_count:   Option<usize>,
    pub point_size:       Option<f32>,
    pub morph_rate:       Option<f32>,
    pub rotation_rate:    Option<f32>,
    pub scale_smoothing:  Option<f32>,
    pub color_smoothing:  Option<f32>,
    pub camera_distance:  Option<f32>,
    pub opacity:          Option<f32>,
    pub adaptive_quality: Option<bool>,
    pub detector:         DetectorOverrides,
}

impl ProfileOverrides {
    pub fn parse(text: &str, path: &Path) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|source| AppError::Toml { path: path.to_path_buf(), source })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)
            .map_err(|source| AppError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text, path)
    }

    /// Layer these overrides on top of `base`.
    pub fn apply(&self, mut base: TierProfile) -> TierProfile {
        fn set<T: Copy>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut base.particle_count, self.particle_count);
        set(&mut base.point_size, self.point_size);
        set(&mut base.morph.morph_rate, self.morph_rate);
        set(&mut base.morph.rotation_rate, self.rotation_rate);
        set(&mut base.morph.scale_smoothing, self.scale_smoothing);
        set(&mut base.morph.color_smoothing, self.color_smoothing);
        set(&mut base.camera_distance, self.camera_distance);
        set(&mut base.opacity, self.opacity);
        set(&mut base.adaptive_quality, self.adaptive_quality);

        let d = &self.detector;
        set(&mut base.detector.max_hands, d.max_hands);
        set(&mut base.detector.model_complexity, d.model_complexity);
        set(&mut base.detector.min_detection_confidence, d.min_detection_confidence);
        set(&mut base.detector.min_tracking_confidence, d.min_tracking_confidence);
        set(&mut base.detector.camera_width, d.camera_width);
        set(&mut base.detector.camera_height, d.camera_height);
        base
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Resolved configuration for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub tier:    CapabilityTier,
    pub profile: TierProfile,
    /// Seed for the scatter and the shape sampler; entropy when `None`.
    pub seed:    Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { tier: CapabilityTier::default(), profile: TierProfile::default(), seed: None }
    }
}

impl AppConfig {
    /// Precedence, lowest first: tier constants, override file, explicit
    /// `particles`.  A tier named on the command line beats one named in the
    /// file.
    pub fn resolve(
        tier: Option<CapabilityTier>,
        overrides: &ProfileOverrides,
        particles: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        let tier = tier.or(overrides.tier).unwrap_or_default();
        let base = tier.profile();
        let mut profile = overrides.apply(base.clone()).sanitized(&base);
        if let Some(n) = particles {
            profile.particle_count = n;
        }
        log::debug!("resolved {} profile: {:?}", tier, profile);
        AppConfig { tier, profile, seed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_constants() {
        let s = CapabilityTier::SmallScreen.profile();
        let m = CapabilityTier::Mobile.profile();
        let d = CapabilityTier::Desktop.profile();

        assert_eq!((s.particle_count, m.particle_count, d.particle_count), (5000, 8000, 15000));
        assert_eq!((s.camera_distance, m.camera_distance, d.camera_distance), (35.0, 32.0, 30.0));
        assert_eq!(s.point_size, 0.22);
        assert_eq!(d.point_size, 0.15);
        assert_eq!(m.morph.morph_rate, 0.06);
        assert_eq!(d.morph.morph_rate, 0.08);
        assert_eq!(m.morph.rotation_rate, 0.001);
        assert_eq!(d.morph.rotation_rate, 0.002);
        assert!(s.adaptive_quality && m.adaptive_quality && !d.adaptive_quality);
        assert_eq!(s.detector.model_complexity, 0);
        assert_eq!(d.detector.model_complexity, 1);
        assert_eq!(m.detector.min_detection_confidence, 0.6);
        assert_eq!(d.detector.min_tracking_confidence, 0.7);
        assert_eq!((m.detector.camera_width, m.detector.camera_height), (480, 360));
        assert!(CapabilityTier::all().iter().all(|t| t.profile().detector.max_hands == 2));
    }

    #[test]
    fn tier_names_parse() {
        for t in CapabilityTier::all() {
            assert_eq!(t.name().parse::<CapabilityTier>().unwrap(), t);
        }
        assert_eq!("Small_Screen".parse::<CapabilityTier>().unwrap(), CapabilityTier::SmallScreen);
        assert!(matches!("tablet".parse::<CapabilityTier>(), Err(AppError::InvalidTier(s)) if s == "tablet"));
    }

    #[test]
    fn overrides_layer_on_chosen_tier() {
        let text = r#"
            tier = "mobile"
            morph_rate = 0.05

            [detector]
            max_hands = 1
        "#;
        let o = ProfileOverrides::parse(text, Path::new("test.toml")).unwrap();
        let cfg = AppConfig::resolve(None, &o, None, Some(3));
        assert_eq!(cfg.tier, CapabilityTier::Mobile);
        assert_eq!(cfg.profile.particle_count, 8000);
        assert_eq!(cfg.profile.morph.morph_rate, 0.05);
        assert_eq!(cfg.profile.morph.rotation_rate, 0.001);
        assert_eq!(cfg.profile.detector.max_hands, 1);
        assert_eq!(cfg.profile.detector.camera_width, 480);
        assert_eq!(cfg.seed, Some(3));
    }

    #[test]
    fn cli_beats_file() {
        let o = ProfileOverrides { tier: Some(CapabilityTier::Mobile), particle_count: Some(9), ..Default::default() };
        let cfg = AppConfig::resolve(Some(CapabilityTier::SmallScreen), &o, Some(42), None);
        assert_eq!(cfg.tier, CapabilityTier::SmallScreen);
        assert_eq!(cfg.profile.particle_count, 42);
        assert_eq!(cfg.profile.camera_distance, 35.0);
    }

    #[test]
    fn bad_values_are_sanitized() {
        let o = ProfileOverrides {
            morph_rate: Some(7.0),
            color_smoothing: Some(-1.0),
            point_size: Some(0.0),
            opacity: Some(3.0),
            ..Default::default()
        };
        let cfg = AppConfig::resolve(Some(CapabilityTier::Desktop), &o, None, None);
        assert_eq!(cfg.profile.morph.morph_rate, 1.0);
        assert_eq!(cfg.profile.morph.color_smoothing, MorphParams::default().color_smoothing);
        assert_eq!(cfg.profile.point_size, 0.15);
        assert_eq!(cfg.profile.opacity, 1.0);
    }

    #[test]
    fn unknown_keys_and_bad_tiers_are_errors() {
        let path = Path::new("x.toml");
        assert!(matches!(ProfileOverrides::parse("warp = 9", path), Err(AppError::Toml { .. })));
        assert!(matches!(ProfileOverrides::parse("tier = \"tablet\"", path), Err(AppError::Toml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ProfileOverrides::load(Path::new("/nonexistent/leap_particles.toml")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/leap_particles.toml"));
    }
}
