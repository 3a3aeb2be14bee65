use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AutoplaySettings, DEFAULT_TOAST_DURATION_MS, DomainError, Slide, SlideDeck};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config format - {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Showcase settings as stored on disk. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub autoplay_duration_ms: u64,
    pub tick_interval_ms: u64,
    pub min_deadline_ms: u64,
    /// Pixel width assumed for one terminal column.
    pub cell_width_px: u32,
    pub toast_duration_ms: u64,
    pub slides: Vec<Slide>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        let autoplay = AutoplaySettings::default();
        Self {
            autoplay_duration_ms: autoplay.duration_ms,
            tick_interval_ms: autoplay.tick_interval_ms,
            min_deadline_ms: autoplay.min_deadline_ms,
            cell_width_px: 8,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            slides: SlideDeck::default_slides(),
        }
    }
}

impl ShowcaseConfig {
    /// Rejects values that would make the event loop spin.
    /// A zero autoplay duration is allowed and simply disables autoplay.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".to_string()));
        }
        if self.cell_width_px == 0 {
            return Err(ConfigError::Invalid("cell_width_px must be positive".to_string()));
        }
        SlideDeck::new(self.slides.clone())?;
        Ok(())
    }

    pub fn autoplay(&self) -> AutoplaySettings {
        AutoplaySettings {
            duration_ms: self.autoplay_duration_ms,
            tick_interval_ms: self.tick_interval_ms,
            min_deadline_ms: self.min_deadline_ms,
        }
    }

    pub fn deck(&self) -> Result<SlideDeck, ConfigError> {
        Ok(SlideDeck::new(self.slides.clone())?)
    }

    /// Viewport width in pixels for a terminal `columns` wide.
    pub fn viewport_width(&self, columns: u16) -> u32 {
        u32::from(columns).saturating_mul(self.cell_width_px)
    }
}

pub struct ConfigRepository;

impl ConfigRepository {
    pub fn save_config(config: &ShowcaseConfig, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_config(path: &Path) -> Result<ShowcaseConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ShowcaseConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
