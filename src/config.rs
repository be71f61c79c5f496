use chrono_tz::Tz;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ERA_THRESHOLD, ENV_PREFIX};

/// Settings for a [`DateNormalizer`](crate::DateNormalizer).
///
/// The timezone is carried here rather than read from process state, so any
/// number of normalizers with different zones can run side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Zone whose local midnight anchors every returned date
    pub timezone: Tz,
    /// Years past the current year beyond which input is read as Buddhist Era
    pub era_threshold: i32,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong type.
    #[error(transparent)]
    Load(#[from] figment::Error),

    /// The era threshold would treat present-day years as Buddhist Era.
    #[error("Invalid era threshold: {0} (must not be negative)")]
    NegativeThreshold(i32),
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Bangkok,
            era_threshold: DEFAULT_ERA_THRESHOLD,
        }
    }
}

impl NormalizerConfig {
    #[must_use]
    pub const fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub const fn with_era_threshold(mut self, era_threshold: i32) -> Self {
        self.era_threshold = era_threshold;
        self
    }

    /// Defaults overlaid with `FLEX_DATE_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the configuration from the environment, e.g.
    /// `FLEX_DATE_TIMEZONE=Asia/Tokyo` or `FLEX_DATE_ERA_THRESHOLD=300`.
    ///
    /// # Errors
    /// Returns `ConfigError::Load` for unknown timezones or non-numeric
    /// thresholds, `ConfigError::NegativeThreshold` for negative thresholds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extracts and validates the configuration from any figment.
    ///
    /// # Errors
    /// See [`NormalizerConfig::from_env`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError::NegativeThreshold` if `era_threshold < 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.era_threshold < 0 {
            return Err(ConfigError::NegativeThreshold(self.era_threshold));
        }
        Ok(())
    }
}
