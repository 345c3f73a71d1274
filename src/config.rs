use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_FIELD_WIDTH: usize = 10;
pub const DEFAULT_FIELD_HEIGHT: usize = 20;
pub const DEFAULT_SQUARE_SIZE: f32 = 20.0;
pub const DEFAULT_TICK_MS: u64 = 500;
pub const DEFAULT_PAUSE_DEBOUNCE_MS: u64 = 50;

// Figures are built from a 2x4 template.
const MIN_FIELD_SIDE: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field_width: usize,
    pub field_height: usize,
    pub square_size: f32,
    /// Gravity interval: the figure drops one row every `tick_ms`.
    pub tick_ms: u64,
    /// Minimum time between two accepted pause toggles.
    pub pause_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            square_size: DEFAULT_SQUARE_SIZE,
            tick_ms: DEFAULT_TICK_MS,
            pause_debounce_ms: DEFAULT_PAUSE_DEBOUNCE_MS,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width < MIN_FIELD_SIDE {
            return Err(ConfigError::Invalid(format!(
                "field_width must be at least {MIN_FIELD_SIDE}, got {}",
                self.field_width
            )));
        }
        if self.field_height < MIN_FIELD_SIDE {
            return Err(ConfigError::Invalid(format!(
                "field_height must be at least {MIN_FIELD_SIDE}, got {}",
                self.field_height
            )));
        }
        if self.square_size.is_nan() || self.square_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "square_size must be positive, got {}",
                self.square_size
            )));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn tick_secs(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    pub fn pause_debounce_secs(&self) -> f32 {
        self.pause_debounce_ms as f32 / 1000.0
    }

    /// Column the left half of the 2-wide template spawns at.
    pub fn spawn_offset(&self) -> i32 {
        self.field_width as i32 / 2 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = Settings::from_json(r#"{ "tick_ms": 250 }"#).unwrap();
        assert_eq!(settings.tick_ms, 250);
        assert_eq!(settings.field_width, DEFAULT_FIELD_WIDTH);
        assert_eq!(settings.field_height, DEFAULT_FIELD_HEIGHT);
        assert_eq!(settings.pause_debounce_ms, DEFAULT_PAUSE_DEBOUNCE_MS);
    }

    #[test]
    fn rejects_narrow_field() {
        let err = Settings::from_json(r#"{ "field_width": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_tick() {
        let err = Settings::from_json(r#"{ "tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Settings::from_json("{ field_width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "field_width": 12, "field_height": 24 }}"#).unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.field_width, 12);
        assert_eq!(settings.field_height, 24);
        assert_eq!(settings.spawn_offset(), 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn default_timings() {
        let settings = Settings::default();
        assert!((settings.tick_secs() - 0.5).abs() < f32::EPSILON);
        assert!((settings.pause_debounce_secs() - 0.05).abs() < f32::EPSILON);
        assert_eq!(settings.spawn_offset(), 4);
    }
}
