//! Engine tuning
//!
//! Every simulation and presentation constant lives in `Tuning`. Defaults
//! reproduce the reference feel; `assets/config/tuning.ron` may override any
//! subset of fields on native builds.

use std::fs;
use std::path::Path;
use macroquad::logging::{info, warn};
use serde::{Deserialize, Serialize};
use crate::rasterizer::{Color, Vec3};

/// Default location of the tuning override
pub const TUNING_PATH: &str = "assets/config/tuning.ron";

/// Upper bound on simulation steps folded into one frame in elapsed mode
const MAX_TICKS_PER_FRAME: f32 = 4.0;

/// How per-tick increments relate to wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Timestep {
    /// One simulation step per rendered frame, regardless of frame rate
    FrameCoupled,
    /// Increments scaled by elapsed seconds times `reference_hz`
    Elapsed { reference_hz: f32 },
}

impl Default for Timestep {
    fn default() -> Self {
        Timestep::FrameCoupled
    }
}

impl Timestep {
    /// Number of reference ticks represented by a frame of `dt_seconds`
    pub fn ticks(&self, dt_seconds: f32) -> f32 {
        match *self {
            Timestep::FrameCoupled => 1.0,
            Timestep::Elapsed { reference_hz } => {
                let t = dt_seconds * reference_hz;
                if t.is_finite() {
                    t.clamp(0.0, MAX_TICKS_PER_FRAME)
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub timestep: Timestep,
    /// Framebuffer size relative to the window
    pub render_scale: f32,

    // Camera and atmosphere
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_position: Vec3,
    pub background: Color,
    pub fog_near: f32,
    pub fog_far: f32,

    // Passive motion
    /// Radians per tick around Y
    pub rotation_speed: f32,
    /// Animation clock increment per tick
    pub clock_step: f32,

    // Needles
    /// Launch point relative to the camera position
    pub needle_origin_offset: Vec3,
    /// Impact distance along the ray when nothing is hit
    pub whiff_distance: f32,
    pub needle_step: f32,
    pub needle_shrink: f32,
    pub needle_min_scale: f32,
    pub needle_length: f32,
    pub needle_aimed_color: Color,
    pub needle_idle_color: Color,

    // Bursts
    pub burst_count: usize,
    /// Half-width of the per-axis velocity range
    pub burst_spread: f32,
    pub burst_life_decay: f32,
    pub burst_size: f32,
    pub correct_color: Color,
    pub incorrect_color: Color,
    pub miss_color: Color,

    // Acupoints
    pub point_radius: f32,
    pub glow_radius: f32,
    pub glow_frequency: f32,
    pub glow_scale_amplitude: f32,
    pub glow_opacity_base: f32,
    pub glow_opacity_amplitude: f32,
    pub target_opacity: f32,
    pub idle_opacity: f32,
    pub highlight_color: Color,
    pub neutral_color: Color,

    // Body cloud
    pub body_count: usize,
    pub body_seed: u32,
    pub body_opacity: f32,
    pub body_size: f32,
    pub body_primary_color: Color,
    pub body_secondary_color: Color,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            timestep: Timestep::FrameCoupled,
            render_scale: 1.0,

            camera_fov: 75.0,
            camera_near: 0.1,
            camera_far: 1000.0,
            camera_position: Vec3::new(0.0, 0.0, 4.0),
            background: Color::from_hex(0x050505),
            fog_near: 1.0,
            fog_far: 15.0,

            rotation_speed: 0.0015,
            clock_step: 0.02,

            needle_origin_offset: Vec3::new(0.0, -0.6, -1.2),
            whiff_distance: 10.0,
            needle_step: 0.14,
            needle_shrink: 0.75,
            needle_min_scale: 0.1,
            needle_length: 0.6,
            needle_aimed_color: Color::from_hex(0x00f3ff),
            needle_idle_color: Color::from_hex(0x444444),

            burst_count: 35,
            burst_spread: 0.05,
            burst_life_decay: 0.04,
            burst_size: 0.05,
            correct_color: Color::from_hex(0xffcc33),
            incorrect_color: Color::from_hex(0xff0055),
            miss_color: Color::from_hex(0x555555),

            point_radius: 0.07,
            glow_radius: 0.14,
            glow_frequency: 6.0,
            glow_scale_amplitude: 0.4,
            glow_opacity_base: 0.2,
            glow_opacity_amplitude: 0.15,
            target_opacity: 1.0,
            idle_opacity: 0.15,
            highlight_color: Color::from_hex(0xffcc33),
            neutral_color: Color::from_hex(0x00f3ff),

            body_count: 12000,
            body_seed: 0x00AC_0C1B,
            body_opacity: 0.4,
            body_size: 0.012,
            body_primary_color: Color::from_hex(0x00f3ff),
            body_secondary_color: Color::from_hex(0x0088ff),
        }
    }
}

impl Tuning {
    /// Reject values that would stall needles or keep bursts alive forever
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("needle_step", self.needle_step),
            ("needle_min_scale", self.needle_min_scale),
            ("burst_life_decay", self.burst_life_decay),
            ("render_scale", self.render_scale),
            ("camera_near", self.camera_near),
            ("whiff_distance", self.whiff_distance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !(self.needle_shrink > 0.0 && self.needle_shrink < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "needle_shrink must be in (0, 1), got {}", self.needle_shrink
            )));
        }
        if self.camera_far <= self.camera_near {
            return Err(ConfigError::ValidationError("camera_far must exceed camera_near".into()));
        }
        if !(self.camera_fov > 0.0 && self.camera_fov < 180.0) {
            return Err(ConfigError::ValidationError(format!("camera_fov out of range: {}", self.camera_fov)));
        }
        if let Timestep::Elapsed { reference_hz } = self.timestep {
            if !(reference_hz.is_finite() && reference_hz > 0.0) {
                return Err(ConfigError::ValidationError(format!("reference_hz must be positive, got {}", reference_hz)));
            }
        }
        Ok(())
    }

    /// Parse a (possibly partial) tuning document
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = ron::from_str(s)?;
        tuning.validate()?;
        Ok(tuning)
    }
}

/// Errors that can occur loading the tuning file
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load tuning from a RON file
pub fn load_tuning<P: AsRef<Path>>(path: P) -> Result<Tuning, ConfigError> {
    let contents = fs::read_to_string(path.as_ref())?;
    Tuning::from_ron_str(&contents)
}

/// Load tuning, falling back to defaults.
/// A missing file is normal; a broken one is reported and ignored.
pub fn load_tuning_or_default<P: AsRef<Path>>(path: P) -> Tuning {
    let path = path.as_ref();
    if cfg!(target_arch = "wasm32") || !path.exists() {
        return Tuning::default();
    }
    match load_tuning(path) {
        Ok(tuning) => {
            info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(e) => {
            warn!("Ignoring {}: {}", path.display(), e);
            Tuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_ron_str("(needle_step: 0.2, burst_count: 10)").unwrap();
        assert_eq!(tuning.needle_step, 0.2);
        assert_eq!(tuning.burst_count, 10);
        assert_eq!(tuning.needle_shrink, 0.75);
        assert_eq!(tuning.camera_position, Vec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_elapsed_timestep_parses() {
        let tuning = Tuning::from_ron_str("(timestep: Elapsed(reference_hz: 60.0))").unwrap();
        assert_eq!(tuning.timestep, Timestep::Elapsed { reference_hz: 60.0 });
    }

    #[test]
    fn test_timestep_ticks() {
        assert_eq!(Timestep::FrameCoupled.ticks(0.5), 1.0);
        let elapsed = Timestep::Elapsed { reference_hz: 60.0 };
        assert!((elapsed.ticks(1.0 / 30.0) - 2.0).abs() < 1e-4);
        assert_eq!(elapsed.ticks(10.0), MAX_TICKS_PER_FRAME);
        assert_eq!(elapsed.ticks(f32::NAN), 0.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(Tuning::from_ron_str("(needle_step: 0.0)"), Err(ConfigError::ValidationError(_))));
        assert!(Tuning::from_ron_str("(needle_shrink: 1.0)").is_err());
        assert!(Tuning::from_ron_str("(burst_life_decay: -0.1)").is_err());
        assert!(Tuning::from_ron_str("(timestep: Elapsed(reference_hz: 0.0))").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(rotation_speed: 0.003)").unwrap();
        let tuning = load_tuning(file.path()).unwrap();
        assert_eq!(tuning.rotation_speed, 0.003);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let tuning = load_tuning_or_default(dir.path().join("nope.ron"));
        assert_eq!(tuning, Tuning::default());
        assert!(matches!(load_tuning(dir.path().join("nope.ron")), Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(needle_step: ").unwrap();
        assert!(matches!(load_tuning(file.path()), Err(ConfigError::ParseError(_))));
        assert_eq!(load_tuning_or_default(file.path()), Tuning::default());
    }

    #[test]
    fn test_shipped_tuning_file_parses() {
        let tuning = Tuning::from_ron_str(include_str!("../assets/config/tuning.ron")).unwrap();
        assert_eq!(tuning, Tuning::default());
    }
}
