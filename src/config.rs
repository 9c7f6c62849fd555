//! Game configuration.
//!
//! Everything has a default matching the classic layout (18x32 field, one
//! gravity step per second). With the `serde_json` feature the host page can
//! pass a partial JSON object to `start_game_with_config`.

use std::fmt;

/// Smallest accepted grid side. Needs to fit the 4-wide I piece.
pub const MIN_GRID_SIDE: usize = 4;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub drop_interval_ms: f64,
    /// Piece sequence seed; `None` seeds from the host.
    pub seed: Option<u64>,
    /// Canvas pixels per grid cell.
    pub cell_size: f64,
    pub canvas_id: String,
    pub score_id: String,
    /// Base URL holding `music.mp3`, `snare.wav` and `clear.mp3`.
    pub sounds_path: String,
    pub music_volume: f64,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 18,
            height: 32,
            drop_interval_ms: 1000.0,
            seed: None,
            cell_size: 20.0,
            canvas_id: "viewport".to_string(),
            score_id: "score".to_string(),
            sounds_path: "sounds".to_string(),
            music_volume: 0.5,
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Clamp out-of-range values instead of rejecting them.
    pub fn normalized(mut self) -> Self {
        self.width = self.width.max(MIN_GRID_SIDE);
        self.height = self.height.max(MIN_GRID_SIDE);
        if !self.drop_interval_ms.is_finite() || self.drop_interval_ms < 0.0 {
            self.drop_interval_ms = Self::default().drop_interval_ms;
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            self.cell_size = Self::default().cell_size;
        }
        self.music_volume = if self.music_volume.is_finite() {
            self.music_volume.clamp(0.0, 1.0)
        } else {
            Self::default().music_volume
        };
        self
    }

    /// Level filter for the console logger; unknown names fall back to `Info`.
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Parse a (possibly partial) JSON object; missing fields keep defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(json).map_err(|e| ConfigError(e.to_string()))?;
        Ok(cfg.normalized())
    }
}

/// Configuration could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid game config: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for wasm_bindgen::JsValue {
    fn from(err: ConfigError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let cfg = GameConfig::default();
        assert_eq!((cfg.width, cfg.height), (18, 32));
        assert_eq!(cfg.drop_interval_ms, 1000.0);
        assert_eq!(cfg.canvas_id, "viewport");
        assert_eq!(cfg.log_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn normalized_clamps_bad_values() {
        let cfg = GameConfig {
            width: 1,
            height: 0,
            drop_interval_ms: f64::NAN,
            cell_size: -3.0,
            music_volume: 4.0,
            ..GameConfig::default()
        }
        .normalized();
        assert_eq!(cfg.width, MIN_GRID_SIDE);
        assert_eq!(cfg.height, MIN_GRID_SIDE);
        assert_eq!(cfg.drop_interval_ms, 1000.0);
        assert_eq!(cfg.cell_size, 20.0);
        assert_eq!(cfg.music_volume, 1.0);
    }

    #[test]
    fn unknown_log_level_falls_back() {
        let cfg = GameConfig {
            log_level: "chatty".into(),
            ..GameConfig::default()
        };
        assert_eq!(cfg.log_filter(), log::LevelFilter::Info);
        let cfg = GameConfig {
            log_level: "debug".into(),
            ..GameConfig::default()
        };
        assert_eq!(cfg.log_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn config_error_message() {
        let err = ConfigError("expected value".into());
        assert_eq!(err.to_string(), "invalid game config: expected value");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"width": 10, "seed": 99}"#).unwrap();
        assert_eq!(cfg.width, 10);
        assert_eq!(cfg.height, 32);
        assert_eq!(cfg.seed, Some(99));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn malformed_json_is_an_error() {
        assert!(GameConfig::from_json("{width:").is_err());
    }
}
