//! JSON configuration for the planner.

use deskplan_annotate::{ArrowStyle, ZoneColors};
use deskplan_core::MAX_CANVAS_PIXELS;
use deskplan_services::DEFAULT_JPEG_QUALITY;
use deskplan_zones::ZoneSplit;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// How viewport tap coordinates are scaled into crop pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapScaling {
    /// Both axes by `crop_width / viewport_width`. Exact for a cover crop,
    /// whose aspect matches the viewport's.
    #[default]
    Uniform,
    /// Each axis by its own crop/viewport ratio.
    PerAxis,
}

fn default_session_ttl_secs() -> u64 {
    30 * 60
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub zones: ZoneSplit,
    pub colors: ZoneColors,
    pub arrows: ArrowStyle,
    /// How long a plan stays available for checking.
    pub session_ttl_secs: u64,
    /// JPEG quality for images sent to service backends.
    pub jpeg_quality: u8,
    pub tap_scaling: TapScaling,
    /// Largest rectified canvas, in pixels, a request may produce.
    pub max_canvas_pixels: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            zones: ZoneSplit::default(),
            colors: ZoneColors::default(),
            arrows: ArrowStyle::default(),
            session_ttl_secs: default_session_ttl_secs(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            tap_scaling: TapScaling::default(),
            max_canvas_pixels: MAX_CANVAS_PIXELS,
        }
    }
}

impl PlannerConfig {
    /// Load a JSON config from disk. Missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: PlannerConfig = serde_json::from_str(
            r##"{"zones": {"support_percent": 25}, "colors": {"main_work_area": "#00FF00"}, "tap_scaling": "per_axis"}"##,
        )
        .expect("parse");
        assert_eq!(cfg.zones.support_percent, 25);
        assert_eq!(cfg.zones.edge_percent, 30);
        assert_eq!(cfg.colors.main_work_area, [0, 255, 0]);
        assert_eq!(cfg.colors.edge_area, ZoneColors::default().edge_area);
        assert_eq!(cfg.tap_scaling, TapScaling::PerAxis);
        assert_eq!(cfg.session_ttl(), Duration::from_secs(1800));
    }

    #[test]
    fn write_then_load_preserves_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("planner.json");
        let cfg = PlannerConfig {
            session_ttl_secs: 5,
            jpeg_quality: 70,
            ..PlannerConfig::default()
        };
        cfg.write_json(&path).expect("write");
        assert_eq!(PlannerConfig::load_json(&path).expect("load"), cfg);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PlannerConfig::load_json("/definitely/not/here.json").expect_err("missing");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
