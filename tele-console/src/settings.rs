//! Console settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tele_sched::SimulatorConfig;

use crate::sweep::SweepSettings;

/// Dispatcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dispatcher tick period in milliseconds
    pub tick_ms: u64,
    /// How often the station table is logged, in milliseconds
    pub summary_interval_ms: u64,
    /// Signal meter decay per tick
    pub meter_decay: u32,
    /// Stop after this long; run until Ctrl-C when absent
    pub run_for_ms: Option<u64>,
    pub sweep: SweepSettings,
    pub simulator: SimulatorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 5,
            summary_interval_ms: 5000,
            meter_decay: 1,
            run_for_ms: None,
            sweep: SweepSettings::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl Settings {
    /// Get the XDG config directory for telesim
    /// Uses $XDG_CONFIG_HOME/telesim on Linux/macOS, falls back to ~/.config/telesim
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("telesim"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("telesim"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path =
            Self::settings_path().ok_or_else(|| "Could not determine settings path".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::SweepMode;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let json = r#"{ "tick_ms": 10, "sweep": { "mode": "hold" } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.tick_ms, 10);
        assert_eq!(settings.sweep.mode, SweepMode::Hold);
        assert_eq!(settings.summary_interval_ms, 5000);
        assert_eq!(settings.simulator, SimulatorConfig::default());
    }

    #[test]
    fn test_serialized_defaults_read_back() {
        let json = serde_json::to_string_pretty(&Settings::default()).unwrap();
        let settings: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
