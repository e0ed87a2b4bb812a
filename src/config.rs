//! Settings loading and layering.
//!
//! Defaults are overridden by an optional TOML file, then by
//! `FARMWATCH_*` environment variables, then by CLI flags.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Resolved runtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the farm backend.
    pub base_url: String,
    /// Days of history to request.
    pub days: u32,
    /// Re-request interval in seconds; 0 fetches once.
    pub refresh: u64,
    /// Crop health score below which a day is flagged.
    pub poor_health: f64,
    /// Pest probability above which a day is flagged.
    pub high_pest: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            days: 7,
            refresh: 0,
            poor_health: 50.0,
            high_pest: 0.7,
        }
    }
}

impl Settings {
    /// Load settings, merging the optional config file and environment over
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("days", i64::from(defaults.days))?
            .set_default("refresh", defaults.refresh as i64)?
            .set_default("poor_health", defaults.poor_health)?
            .set_default("high_pest", defaults.high_pest)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("FARMWATCH"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Apply CLI flag overrides; a `None` keeps the loaded value.
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        days: Option<u32>,
        refresh: Option<u64>,
        poor_health: Option<f64>,
        high_pest: Option<f64>,
    ) {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(days) = days {
            self.days = days;
        }
        if let Some(refresh) = refresh {
            self.refresh = refresh;
        }
        if let Some(poor_health) = poor_health {
            self.poor_health = poor_health;
        }
        if let Some(high_pest) = high_pest {
            self.high_pest = high_pest;
        }
    }

    /// Days clamped to the range the backend accepts.
    pub fn clamped_days(&self) -> u32 {
        self.days.clamp(1, 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.base_url, "http://127.0.0.1:8000");
        assert_eq!(settings.days, 7);
        assert_eq!(settings.refresh, 0);
        assert_eq!(settings.poor_health, 50.0);
        assert_eq!(settings.high_pest, 0.7);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "base_url = \"http://farm:9000\"").unwrap();
        writeln!(file, "days = 3").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.base_url, "http://farm:9000");
        assert_eq!(settings.days, 3);
        // Untouched keys keep their defaults
        assert_eq!(settings.refresh, 0);
        assert_eq!(settings.high_pest, 0.7);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "days = 3").unwrap();
        file.flush().unwrap();

        let mut settings = Settings::load(Some(file.path())).unwrap();
        settings.apply_overrides(None, Some(14), Some(30), None, Some(0.5));

        assert_eq!(settings.days, 14);
        assert_eq!(settings.refresh, 30);
        assert_eq!(settings.high_pest, 0.5);
        // Flags not given keep the loaded values
        assert_eq!(settings.base_url, "http://127.0.0.1:8000");
        assert_eq!(settings.poor_health, 50.0);
    }

    #[test]
    fn test_days_clamped_to_backend_range() {
        let mut settings = Settings::default();
        settings.days = 90;
        assert_eq!(settings.clamped_days(), 30);
        settings.days = 0;
        assert_eq!(settings.clamped_days(), 1);
        settings.days = 7;
        assert_eq!(settings.clamped_days(), 7);
    }
}
