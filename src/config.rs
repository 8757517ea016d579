//! Per-call configuration for selection and completeness filtering.
//!
//! All behavior that used to live in ambient defaults is threaded through
//! this struct explicitly: the austral split month, the completeness
//! granularity, the empty-selection policy, and the clarity-report flag.

use crate::complete::UnitGranularity;
use crate::error::{ChronoselError, Result};
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// What to do when a selection call supplies no predicate at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Fail the call with `NoSelectionMade`.
    #[default]
    Fail,
    /// Log a warning and keep every layer (the index set is unchanged).
    WarnKeepAll,
}

/// Configuration threaded through selection and completeness calls.
///
/// Designed to be loadable from JSON (and TOML with the `toml` feature)
/// while keeping every field defaultable.
///
/// # Example
///
/// ```rust
/// use chronosel::Config;
///
/// let config = Config::default().with_split_month(3).with_daily(true);
/// assert!(config.validate().is_ok());
///
/// let json = r#"{ "split_month": 6, "print_clarity": true }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.split_month, Some(6));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Last calendar month counted toward the *previous* austral year.
    /// Months after it roll into the next year label. `None` disables the
    /// `summer` field entirely.
    #[serde(default)]
    pub split_month: Option<u32>,

    /// Completeness filtering granularity: `true` compares month-day
    /// combinations, `false` compares months.
    #[serde(default)]
    pub daily: bool,

    /// Policy for calls that supply zero predicates.
    #[serde(default)]
    pub on_empty_selection: EmptySelectionPolicy,

    /// Emit the human-readable completeness report via `log::info!`.
    #[serde(default)]
    pub print_clarity: bool,
}

impl Config {
    /// Set the austral split month (1-12).
    pub fn with_split_month(mut self, month: u32) -> Self {
        self.split_month = Some(month);
        self
    }

    /// Use month-day granularity for completeness filtering.
    pub fn with_daily(mut self, daily: bool) -> Self {
        self.daily = daily;
        self
    }

    /// Set the empty-selection policy.
    pub fn with_empty_selection(mut self, policy: EmptySelectionPolicy) -> Self {
        self.on_empty_selection = policy;
        self
    }

    /// Enable or disable the clarity report.
    pub fn with_print_clarity(mut self, print: bool) -> Self {
        self.print_clarity = print;
        self
    }

    /// Completeness granularity implied by the `daily` flag.
    pub fn granularity(&self) -> UnitGranularity {
        if self.daily {
            UnitGranularity::MonthDay
        } else {
            UnitGranularity::Month
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(split) = self.split_month {
            if !(1..=12).contains(&split) {
                return Err(ChronoselError::InvalidSplitMonth(split));
            }
        }
        Ok(())
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a TOML string (requires the `toml` feature).
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as a TOML string (requires the `toml` feature).
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
