//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{TracksyncError, TracksyncResult};

/// Fallback frame rate used when a table has no usable time field.
pub const DEFAULT_FPS: f64 = 30.0;

/// Default media playback rate.
pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial values for the live view settings.
    #[serde(default)]
    pub view: ViewDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Starting values for every live setting of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewDefaults {
    /// Fallback frame rate for `frame`-indexed tables.
    pub fps: f64,

    /// Sync offset in seconds (media time minus data time). May be negative.
    pub offset_secs: f64,

    /// Smoothing time constant in seconds. 0 disables smoothing.
    pub smoothing_secs: f64,

    /// Scale each trace to `[0, 1]` before smoothing.
    pub normalize: bool,

    /// Media playback rate.
    pub playback_rate: f64,

    /// Columns selected right after a table is loaded, when eligible.
    pub default_columns: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "tracksync=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            view: ViewDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            offset_secs: 0.0,
            smoothing_secs: 0.0,
            normalize: false,
            playback_rate: DEFAULT_PLAYBACK_RATE,
            default_columns: ["pfgi", "tui", "tfe_peak_rate", "com_velocity"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    ///
    /// A missing file is silent; an unreadable or invalid one is logged.
    pub fn load_from(config_path: &Path) -> Self {
        match Self::read(config_path) {
            Ok(config) => config,
            Err(TracksyncError::FileNotFound { .. }) => Self::default(),
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "Ignoring config file, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Read and validate a config file.
    pub fn read(config_path: &Path) -> TracksyncResult<Self> {
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| TracksyncError::from_io_at(e, config_path))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no session can use.
    ///
    /// Zero rates are allowed: they mean "use the default".
    pub fn validate(&self) -> TracksyncResult<()> {
        if self.view.fps < 0.0 {
            return Err(TracksyncError::config(format!(
                "view.fps must not be negative (got {})",
                self.view.fps
            )));
        }
        if self.view.playback_rate < 0.0 {
            return Err(TracksyncError::config(format!(
                "view.playback_rate must not be negative (got {})",
                self.view.playback_rate
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(TracksyncError::config("logging.level must not be empty"));
        }
        Ok(())
    }

    /// Save config to the standard location. Returns the path written.
    pub fn save(&self) -> TracksyncResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> TracksyncResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("tracksync").join("config.json")
}
