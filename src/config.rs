use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default spreadsheet export address (published Google Sheets CSV).
const DEFAULT_SOURCE_URL: &str =
    "https://docs.google.com/spreadsheets/d/1OxU_4C8zAp_3sqcmj2dnn4YB7N6xcI6PUPLWSG-yl4E/export?format=csv";

/// Path checked for overrides when `STAFFBOARD_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "staffboard.json";

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Startup configuration. Every field falls back to its default, so a
/// partial config file only overrides what it names.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV export URL fetched on every refresh cycle.
    pub source_url: String,
    /// Auto-refresh period.
    pub refresh_secs: u64,
    /// Upper bound on the blocking fetch; a timeout surfaces as a
    /// source-unavailable error for that cycle.
    pub fetch_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            refresh_secs: 60,
            fetch_timeout_secs: 10,
        }
    }
}

impl DashboardConfig {
    /// Read the config file (`$STAFFBOARD_CONFIG` or `staffboard.json`).
    /// A missing file means defaults; an unreadable or malformed one is
    /// ignored with a warning rather than aborting startup.
    pub fn load() -> Self {
        let path = std::env::var("STAFFBOARD_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        if !Path::new(&path).exists() {
            return Self::default();
        }
        match Self::read_from(&path) {
            Ok(cfg) => {
                log::info!("loaded config from {path}");
                cfg
            }
            Err(e) => {
                log::warn!("ignoring config {path}: {e:#}");
                Self::default()
            }
        }
    }

    fn read_from(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading config file")?;
        let cfg = serde_json::from_str(&text).context("parsing config JSON")?;
        Ok(cfg)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_source_and_clocks() {
        let cfg = DashboardConfig::default();
        assert!(cfg.source_url.contains("export?format=csv"));
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(60));
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_config_keeps_defaults_for_the_rest() {
        let cfg: DashboardConfig =
            serde_json::from_str(r#"{ "refresh_secs": 120 }"#).unwrap();
        assert_eq!(cfg.refresh_secs, 120);
        assert_eq!(cfg.fetch_timeout_secs, 10);
        assert_eq!(cfg.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn read_errors_carry_their_context() {
        let err = DashboardConfig::read_from("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));

        let path = std::env::temp_dir().join("staffboard_config_malformed_test.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = DashboardConfig::read_from(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config JSON"));
        std::fs::remove_file(&path).ok();
    }
}
