use crate::config::{find_cluster, DEFAULT_CLUSTER};
use crate::quote::QuoteFailurePolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "solcard_settings.json";

/// Directory name under the platform config dir
pub(crate) const APP_DIR_NAME: &str = "solcard";

fn default_cluster() -> String {
    DEFAULT_CLUSTER.to_string()
}

fn default_price_refresh_interval() -> u64 {
    30
}

fn default_starting_balance() -> f64 {
    1.0
}

fn default_log_operations() -> bool {
    true
}

/// User settings that persist between sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    /// Selected cluster id
    #[serde(default = "default_cluster")]
    pub selected_cluster: String,
    /// What the swap dialog shows when a quote fetch fails
    #[serde(default)]
    pub quote_failure_policy: QuoteFailurePolicy,
    /// How often the USD price behind the fiat balance is refreshed (seconds, 0 = never)
    #[serde(default = "default_price_refresh_interval")]
    pub price_refresh_interval_secs: u64,
    /// Native balance given to the first simulated account
    #[serde(default = "default_starting_balance")]
    pub starting_balance: f64,
    /// Append wallet operations to the operation log file
    #[serde(default = "default_log_operations")]
    pub log_operations: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            selected_cluster: default_cluster(),
            quote_failure_policy: QuoteFailurePolicy::default(),
            price_refresh_interval_secs: default_price_refresh_interval(),
            starting_balance: default_starting_balance(),
            log_operations: default_log_operations(),
        }
    }
}

/// App data directory, created on demand. Falls back to the current directory.
pub(crate) fn app_data_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        let app_dir = config_dir.join(APP_DIR_NAME);
        if !app_dir.exists() {
            let _ = fs::create_dir_all(&app_dir);
        }
        app_dir
    } else {
        PathBuf::from(".")
    }
}

impl UserSettings {
    fn settings_path() -> PathBuf {
        app_data_dir().join(SETTINGS_FILE)
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    pub(crate) fn load_from(path: &std::path::Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str::<UserSettings>(&content) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings.normalized();
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path())
    }

    pub(crate) fn save_to(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Get the settings file path for display
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Replace values that would break the app with their defaults.
    fn normalized(mut self) -> Self {
        if find_cluster(&self.selected_cluster).is_none() {
            tracing::warn!(
                "Unknown cluster '{}' in settings, using {}",
                self.selected_cluster,
                DEFAULT_CLUSTER
            );
            self.selected_cluster = default_cluster();
        }
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            self.starting_balance = default_starting_balance();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "solcard_settings_test_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    // ==================== UserSettings::default tests ====================

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();
        assert_eq!(settings.selected_cluster, "devnet");
        assert_eq!(settings.quote_failure_policy, QuoteFailurePolicy::RetainLast);
        assert_eq!(settings.price_refresh_interval_secs, 30);
        assert_eq!(settings.starting_balance, 1.0);
        assert!(settings.log_operations);
    }

    // ==================== serde tests ====================

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"selected_cluster":"testnet"}"#).unwrap();
        assert_eq!(settings.selected_cluster, "testnet");
        assert_eq!(settings.price_refresh_interval_secs, 30);
        assert!(settings.log_operations);
    }

    #[test]
    fn test_policy_round_trips_through_json() {
        let mut settings = UserSettings::default();
        settings.quote_failure_policy = QuoteFailurePolicy::MarkUnavailable;
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("mark-unavailable"));
    }

    // ==================== load/save tests ====================

    #[test]
    fn test_save_then_load() {
        let path = temp_settings_path("roundtrip");
        let mut settings = UserSettings::default();
        settings.selected_cluster = "mainnet-beta".to_string();
        settings.price_refresh_interval_secs = 0;

        settings.save_to(&path).unwrap();
        let loaded = UserSettings::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let path = temp_settings_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(UserSettings::load_from(&path), UserSettings::default());
    }

    #[test]
    fn test_load_corrupt_file_returns_default() {
        let path = temp_settings_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let loaded = UserSettings::load_from(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, UserSettings::default());
    }

    #[test]
    fn test_load_normalizes_unknown_cluster() {
        let path = temp_settings_path("normalize");
        fs::write(&path, r#"{"selected_cluster":"localnet","starting_balance":-3.0}"#).unwrap();
        let loaded = UserSettings::load_from(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.selected_cluster, "devnet");
        assert_eq!(loaded.starting_balance, 1.0);
    }
}
