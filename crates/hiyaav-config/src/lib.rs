//! HIYAAV page configuration
//!
//! Centralized tuning for the page runtime, loaded from `hiyaav.toml` with
//! `HIYAAV_*` environment variables layered on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure for the page runtime
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HiyaavConfig {
    /// Smooth-scroll driver settings
    pub scroll: ScrollConfig,
    /// Reveal trigger registry settings
    pub reveal: RevealConfig,
    /// Scroll-position triggers for entrance timelines
    pub triggers: TriggerConfig,
    /// Custom cursor settings
    pub cursor: CursorConfig,
    /// Decorative 3D background settings
    pub background: BackgroundConfig,
    /// Contact form settings
    pub contact: ContactConfig,
    /// Navigation bar settings
    pub navbar: NavbarConfig,
    /// Initial viewport used by the simulator
    pub viewport: ViewportConfig,
}

/// Smooth-scroll configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Duration of one glide toward the target, in seconds
    pub duration_secs: f32,
    /// Multiplier applied to wheel / trackpad deltas
    pub mouse_multiplier: f32,
    /// Multiplier applied to touch gesture deltas
    pub touch_multiplier: f32,
    /// Ease touch input like wheel input (otherwise applied immediately)
    pub smooth_touch: bool,
}

/// Reveal trigger registry configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of an element's area that must be inside the viewport
    pub threshold: f32,
    /// Pixels added around the viewport before intersecting
    pub root_margin_px: f32,
}

/// Scroll trigger configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Viewport fraction the section top has to reach ("top 80%")
    pub start_fraction: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Viewports narrower than this never show the custom cursor
    pub min_viewport_width: f32,
    /// Overlay diameter while resting
    pub resting_size: f32,
    /// Overlay diameter while the pointer is pressed
    pub active_size: f32,
    /// Duration of the opacity, size and color transitions
    pub fade_ms: f32,
    /// Duration of the transform transition
    pub transform_ms: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Number of particles in the cloud
    pub particle_count: usize,
    /// Edge length of the cube particles are scattered in before the first frame
    pub particle_spread: f32,
    /// Seed for the initial scatter
    pub seed: u64,
    /// Camera offset per unit of normalized pointer x
    pub camera_gain_x: f32,
    /// Camera offset per unit of normalized pointer y
    pub camera_gain_y: f32,
    /// Fixed camera depth
    pub camera_depth: f32,
    /// Per-frame lerp factor of the camera toward its goal
    pub camera_lerp: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// How long the acknowledgment stays up before the form resets
    pub reset_after_ms: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Scroll offset past which the navbar switches to its condensed style
    pub scrolled_threshold_px: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.2,
            mouse_multiplier: 1.0,
            touch_multiplier: 2.0,
            smooth_touch: false,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_px: 0.0,
        }
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            start_fraction: 0.8,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            resting_size: 20.0,
            active_size: 40.0,
            fade_ms: 300.0,
            transform_ms: 100.0,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            particle_spread: 10.0,
            seed: 0x4849_5941_4156,
            camera_gain_x: 2.0,
            camera_gain_y: 1.0,
            camera_depth: 10.0,
            camera_lerp: 0.05,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            reset_after_ms: 3000.0,
        }
    }
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: 50.0,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

/// Parse a `WIDTHxHEIGHT` viewport string such as `1440x900`.
fn parse_viewport(val: &str) -> Option<(f32, f32)> {
    let (w, h) = val.split_once(['x', 'X'])?;
    let w = w.trim().parse::<f32>().ok()?;
    let h = h.trim().parse::<f32>().ok()?;
    (w > 0.0 && h > 0.0).then_some((w, h))
}

impl HiyaavConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load `hiyaav.toml` from the current directory, or defaults if it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        Self::load_from_file("hiyaav.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("HIYAAV_SCROLL_DURATION") {
            if let Ok(secs) = val.parse::<f32>() {
                self.scroll.duration_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("HIYAAV_TOUCH_MULTIPLIER") {
            if let Ok(mult) = val.parse::<f32>() {
                self.scroll.touch_multiplier = mult;
            }
        }
        if let Ok(val) = std::env::var("HIYAAV_SMOOTH_TOUCH") {
            self.scroll.smooth_touch = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("HIYAAV_REVEAL_THRESHOLD") {
            if let Ok(threshold) = val.parse::<f32>() {
                self.reveal.threshold = threshold.clamp(0.0, 1.0);
            }
        }
        if let Ok(val) = std::env::var("HIYAAV_PARTICLES") {
            if let Ok(count) = val.parse::<usize>() {
                self.background.particle_count = count;
            }
        }
        if let Ok(val) = std::env::var("HIYAAV_CURSOR_MIN_WIDTH") {
            if let Ok(width) = val.parse::<f32>() {
                self.cursor.min_viewport_width = width;
            }
        }
        if let Ok(val) = std::env::var("HIYAAV_CONTACT_RESET_MS") {
            if let Ok(ms) = val.parse::<f64>() {
                self.contact.reset_after_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("HIYAAV_VIEWPORT") {
            if let Some((width, height)) = parse_viewport(&val) {
                self.viewport.width = width;
                self.viewport.height = height;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from hiyaav.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HiyaavConfig::default();
        assert_eq!(config.scroll.duration_secs, 1.2);
        assert_eq!(config.scroll.touch_multiplier, 2.0);
        assert!(!config.scroll.smooth_touch);
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.root_margin_px, 0.0);
        assert_eq!(config.triggers.start_fraction, 0.8);
        assert_eq!(config.cursor.min_viewport_width, 768.0);
        assert_eq!(config.background.particle_count, 200);
        assert_eq!(config.contact.reset_after_ms, 3000.0);
    }

    #[test]
    fn test_toml_roundtrip_keeps_overrides() {
        let mut config = HiyaavConfig::default();
        config.scroll.duration_secs = 0.8;
        config.background.particle_count = 64;
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: HiyaavConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scroll.duration_secs, 0.8);
        assert_eq!(parsed.background.particle_count, 64);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: HiyaavConfig = toml::from_str(
            r#"
            [reveal]
            threshold = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(parsed.reveal.threshold, 0.25);
        assert_eq!(parsed.reveal.root_margin_px, 0.0);
        assert_eq!(parsed.scroll.mouse_multiplier, 1.0);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = HiyaavConfig::load_from_file("definitely/not/here/hiyaav.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("1440x900"), Some((1440.0, 900.0)));
        assert_eq!(parse_viewport("375 X 812"), Some((375.0, 812.0)));
        assert_eq!(parse_viewport("0x900"), None);
        assert_eq!(parse_viewport("wide"), None);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("HIYAAV_SMOOTH_TOUCH", "true");
            std::env::set_var("HIYAAV_VIEWPORT", "375x812");
            std::env::set_var("HIYAAV_REVEAL_THRESHOLD", "3.0");
        }

        let mut config = HiyaavConfig::default();
        config.merge_with_env();

        assert!(config.scroll.smooth_touch);
        assert_eq!(config.viewport.width, 375.0);
        assert_eq!(config.viewport.height, 812.0);
        assert_eq!(config.reveal.threshold, 1.0);

        unsafe {
            std::env::remove_var("HIYAAV_SMOOTH_TOUCH");
            std::env::remove_var("HIYAAV_VIEWPORT");
            std::env::remove_var("HIYAAV_REVEAL_THRESHOLD");
        }
    }
}
