//! Render settings
//!
//! Chart sizes, stroke widths and colors used when drawing SVG. Settings are
//! read from `render.json` in the user's config directory, or from a file
//! named with `--config`. Missing fields fall back to the defaults below.
//!
//! Config path: `~/.config/crunch/render.json` (Linux)

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crunch_core::{Canvas, OverlayMode};
use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SETTINGS_FILE: &str = "render.json";

pub fn get_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "formulacrunch", "crunch")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Settings file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Canvas size must be positive and finite, got {width}x{height}")]
    CanvasSize { width: f64, height: f64 },
}

/// `canvas` with `width` and/or `height` replaced, margins kept
pub fn resize_canvas(
    canvas: &Canvas,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<Canvas, ConfigError> {
    let width = width.unwrap_or(canvas.width);
    let height = height.unwrap_or(canvas.height);
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(width) || !valid(height) {
        return Err(ConfigError::CanvasSize { width, height });
    }
    Ok(Canvas {
        width,
        height,
        ..*canvas
    })
}

/// How charts are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderSettings {
    pub track_map: Canvas,
    pub corner_analysis: Canvas,
    /// Overlay used when a request does not name one
    pub overlay: OverlayMode,
    pub background: String,
    pub track_color: String,
    pub track_width: f64,
    pub overlay_width: f64,
    pub speed_width: f64,
    pub band_width: f64,
    pub font_family: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            track_map: Canvas::default(),
            corner_analysis: Canvas::new(1040.0, 300.0),
            overlay: OverlayMode::None,
            background: "#000022".to_string(),
            track_color: "#F1E9DA".to_string(),
            track_width: 12.0,
            overlay_width: 6.0,
            speed_width: 2.0,
            band_width: 10.0,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl RenderSettings {
    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let settings = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ConfigError::Parse {
                path: path.to_owned(),
                source,
            }
        })?;
        info!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    /// Settings from `path` if given, else from the config directory, else defaults.
    ///
    /// A file named explicitly must exist; the config directory file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match get_project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE)) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                debug!("No settings at {}, using defaults", path.display());
                Ok(RenderSettings::default())
            }
            None => {
                debug!("No home directory, using default render settings");
                Ok(RenderSettings::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"trackWidth": 8, "trackMap": {{"width": 800}}, "overlay": "fastest"}}"#).unwrap();

        let settings = RenderSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.track_width, 8.0);
        assert_eq!(settings.overlay, OverlayMode::Fastest);
        assert_eq!(settings.track_map.width, 800.0);
        assert_eq!(settings.track_map.height, 500.0);
        assert_eq!(settings.track_map.margin_x, 14.0);
        assert_eq!(settings.band_width, 10.0);
    }

    #[test]
    fn test_resize_canvas() {
        let base = Canvas::default();
        let resized = resize_canvas(&base, Some(800.0), None).unwrap();
        assert_eq!(resized.width, 800.0);
        assert_eq!(resized.height, base.height);
        assert_eq!(resized.margin_x, base.margin_x);

        assert!(resize_canvas(&base, Some(0.0), None).is_err());
        assert!(resize_canvas(&base, None, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RenderSettings::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = RenderSettings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
