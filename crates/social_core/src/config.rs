//! Layered configuration for the foundation services.
//!
//! # Responsibility
//! - Load settings from defaults, an optional TOML file and the environment.
//! - Externalize per-entity recency windows.
//!
//! # Invariants
//! - Later providers win: defaults < TOML file < `SOCIAL_CORE_*` variables.
//! - Recency windows are never negative once loaded.

use chrono::{DateTime, TimeDelta, Utc};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENV_PREFIX: &str = "SOCIAL_CORE_";
const DEFAULT_WINDOW_SECONDS: i64 = 60;
const MAX_WINDOW_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("invalid recency window for `{entity}`: {reason}")]
    InvalidWindow { entity: String, reason: &'static str },
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Load(Box::new(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub recency: RecencyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path; in-memory when unset.
    pub path: Option<PathBuf>,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute log directory; logging stays uninitialized when unset.
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

/// Allowed distance between a timestamp and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyWindow {
    pub past_seconds: i64,
    pub future_seconds: i64,
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self::symmetric(DEFAULT_WINDOW_SECONDS)
    }
}

impl RecencyWindow {
    pub fn symmetric(seconds: i64) -> Self {
        Self {
            past_seconds: seconds,
            future_seconds: seconds,
        }
    }

    /// Returns whether `date` lies within the window around `now`, bounds
    /// included.
    ///
    /// A bound too large to represent as a `TimeDelta` does not limit that
    /// side of the window.
    pub fn contains(&self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let delta = date.signed_duration_since(now);
        let within_past =
            TimeDelta::try_seconds(self.past_seconds).map_or(true, |past| delta >= -past);
        let within_future =
            TimeDelta::try_seconds(self.future_seconds).map_or(true, |future| delta <= future);
        within_past && within_future
    }

    fn check(&self, entity: &str) -> Result<(), ConfigError> {
        if self.past_seconds < 0 || self.future_seconds < 0 {
            return Err(ConfigError::InvalidWindow {
                entity: entity.to_string(),
                reason: "window bounds must not be negative",
            });
        }
        if self.past_seconds > MAX_WINDOW_SECONDS || self.future_seconds > MAX_WINDOW_SECONDS {
            return Err(ConfigError::InvalidWindow {
                entity: entity.to_string(),
                reason: "window bounds must not exceed 100 years",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyConfig {
    pub default: RecencyWindow,
    /// Per-entity windows keyed by entity name (`Post`, `Profile`, ...).
    pub overrides: BTreeMap<String, RecencyWindow>,
}

impl RecencyConfig {
    /// Entity names match case-insensitively; environment keys arrive
    /// lowercased.
    pub fn window_for(&self, entity: &str) -> RecencyWindow {
        self.overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(entity))
            .map_or(self.default, |(_, window)| *window)
    }
}

impl CoreConfig {
    /// Loads defaults overridden by the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(base_figment())
    }

    /// Loads defaults, then `path` (if it exists), then the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(CoreConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: CoreConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.recency.default.check("default")?;
        for (entity, window) in &self.recency.overrides {
            window.check(entity)?;
        }
        Ok(())
    }
}

fn base_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CoreConfig::default()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, RecencyWindow};
    use chrono::{TimeDelta, TimeZone, Utc};
    use figment::providers::Serialized;
    use figment::Figment;
    use std::io::Write;

    #[test]
    fn window_bounds_are_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let window = RecencyWindow::symmetric(60);

        assert!(window.contains(now, now));
        assert!(window.contains(now + TimeDelta::seconds(60), now));
        assert!(window.contains(now - TimeDelta::seconds(60), now));
        assert!(!window.contains(now + TimeDelta::seconds(61), now));
        assert!(!window.contains(now - TimeDelta::minutes(10), now));
    }

    #[test]
    fn asymmetric_window_uses_separate_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let window = RecencyWindow {
            past_seconds: 300,
            future_seconds: 0,
        };

        assert!(window.contains(now - TimeDelta::minutes(4), now));
        assert!(!window.contains(now + TimeDelta::seconds(1), now));
    }

    #[test]
    fn toml_file_overrides_defaults_per_entity() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[logging]
level = "warn"

[recency.default]
past_seconds = 120
future_seconds = 30

[recency.overrides.Post]
past_seconds = 5
future_seconds = 5
"#
        )
        .unwrap();

        let config = CoreConfig::load_from(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(
            config.recency.window_for("Profile"),
            RecencyWindow {
                past_seconds: 120,
                future_seconds: 30
            }
        );
        assert_eq!(config.recency.window_for("Post"), RecencyWindow::symmetric(5));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.recency.window_for("Post"), RecencyWindow::default());
        assert_eq!(config.database.busy_timeout_ms, 5_000);
    }

    #[test]
    fn negative_window_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[recency.overrides.PostReport]\npast_seconds = -1\nfuture_seconds = 10"
        )
        .unwrap();

        let err = CoreConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidWindow { ref entity, .. } if entity == "PostReport"
        ));
    }

    #[test]
    fn oversized_window_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[recency.default]\npast_seconds = 9223372036854775807\nfuture_seconds = 60"
        )
        .unwrap();

        let err = CoreConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidWindow { ref entity, .. } if entity == "default"
        ));
    }

    #[test]
    fn unrepresentable_bound_does_not_panic() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let window = RecencyWindow {
            past_seconds: i64::MAX,
            future_seconds: 60,
        };

        assert!(window.contains(now - TimeDelta::days(365 * 50), now));
        assert!(!window.contains(now + TimeDelta::minutes(2), now));
    }

    #[test]
    fn lowercased_override_key_still_applies() {
        // Keys from `SOCIAL_CORE_RECENCY__OVERRIDES__POST__*` arrive as `post`.
        let figment = Figment::new()
            .merge(Serialized::defaults(CoreConfig::default()))
            .merge(Serialized::default(
                "recency.overrides.post",
                RecencyWindow::symmetric(15),
            ));

        let config = CoreConfig::extract(figment).unwrap();
        assert!(config.recency.overrides.contains_key("post"));
        assert_eq!(config.recency.window_for("Post"), RecencyWindow::symmetric(15));
        assert_eq!(config.recency.window_for("PostReport"), RecencyWindow::default());
    }
}
