use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::ConfigError;

/// Parameters of a lesson run. Every field is optional in the json config file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunParams {
    pub window_name:     String,
    pub window_width:    u32,
    pub window_height:   u32,
    pub tick_per_second: u32,
    /// Text typed out over the scene
    pub headline:        String,
    /// Minimum milliseconds between two revealed characters of the headline
    pub typing_interval_ms: f64,
    pub clear_color:     [f32; 3],
    /// Image shown under the headline
    pub logo_texture:    Option<PathBuf>,
    /// facetype.js typeface the headline is measured with
    pub headline_font:   Option<PathBuf>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            window_name:        "Three lessons".to_owned(),
            window_width:       1280,
            window_height:      720,
            tick_per_second:    60,
            headline:           "Hi, I build things for the web and beyond.".to_owned(),
            typing_interval_ms: 20.0,
            clear_color:        [0.1, 0.2, 0.3],
            logo_texture:       None,
            headline_font:      None,
        }
    }
}

impl RunParams {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params = RunParams::from_json(r#"{ "window_name": "Materials", "typing_interval_ms": 35 }"#).unwrap();
        assert_eq!(params.window_name, "Materials");
        assert_eq!(params.typing_interval_ms, 35.0);
        assert_eq!(params.window_width, RunParams::default().window_width);
        assert_eq!(params.headline, RunParams::default().headline);
    }

    #[test]
    fn asset_paths_are_optional() {
        assert_eq!(RunParams::default().logo_texture, None);

        let params = RunParams::from_json(r#"{ "logo_texture": "assets/logo.png", "headline_font": "fonts/helvetiker.json" }"#).unwrap();
        assert_eq!(params.logo_texture, Some(PathBuf::from("assets/logo.png")));
        assert_eq!(params.headline_font, Some(PathBuf::from("fonts/helvetiker.json")));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = RunParams::from_json(r#"{ "currency_key": "secret" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RunParams::from_file("/nonexistent/lesson.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
