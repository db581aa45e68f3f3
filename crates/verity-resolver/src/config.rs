//! Configuration for claim resolution and the verdict reveal
//!
//! Defines the poll budget and the duration of each reveal phase.

use crate::error::ResolutionError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing of each reveal phase
///
/// # Examples
///
/// ```
/// use verity_resolver::RevealTimings;
///
/// let timings = RevealTimings::default();
/// assert_eq!(timings.per_char_ms, 30);
///
/// // No waiting at all, for piped or non-interactive output
/// let timings = RevealTimings::instant();
/// assert_eq!(timings.commentary_ms, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTimings {
    /// Delay between typed characters of the query
    /// Default: 30ms
    #[serde(default = "default_per_char_ms")]
    pub per_char_ms: u64,

    /// Pause after the query is fully typed
    /// Default: 500ms
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// How long the commentary message stays up
    /// Default: 2500ms
    #[serde(default = "default_commentary_ms")]
    pub commentary_ms: u64,

    /// How long the verdict badge shows before the full result
    /// Default: 1000ms
    #[serde(default = "default_reveal_ms")]
    pub reveal_ms: u64,
}

fn default_per_char_ms() -> u64 {
    30
}

fn default_settle_ms() -> u64 {
    500
}

fn default_commentary_ms() -> u64 {
    2500
}

fn default_reveal_ms() -> u64 {
    1000
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            per_char_ms: default_per_char_ms(),
            settle_ms: default_settle_ms(),
            commentary_ms: default_commentary_ms(),
            reveal_ms: default_reveal_ms(),
        }
    }
}

impl RevealTimings {
    /// All phases pass without delay
    pub fn instant() -> Self {
        Self {
            per_char_ms: 0,
            settle_ms: 0,
            commentary_ms: 0,
            reveal_ms: 0,
        }
    }

    /// Delay per typed character
    pub fn per_char(&self) -> Duration {
        Duration::from_millis(self.per_char_ms)
    }

    /// Pause after typing
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Commentary dwell time
    pub fn commentary(&self) -> Duration {
        Duration::from_millis(self.commentary_ms)
    }

    /// Verdict badge dwell time
    pub fn reveal(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }

    /// Total time the full reveal of `query` takes, saturating at `Duration::MAX`
    pub fn total_for(&self, query: &str) -> Duration {
        let chars = u32::try_from(query.chars().count()).unwrap_or(u32::MAX);
        self.per_char()
            .saturating_mul(chars)
            .saturating_add(self.settle())
            .saturating_add(self.commentary())
            .saturating_add(self.reveal())
    }
}

/// Configuration for resolving a claim and revealing its verdict
///
/// # Examples
///
/// ```
/// use verity_resolver::ResolverConfig;
///
/// // Default: poll every 2s, give up after 60 polls (about two minutes)
/// let config = ResolverConfig::default();
/// assert_eq!(config.max_attempts, 60);
///
/// // Patient: slower research backends
/// let config = ResolverConfig::patient();
/// assert_eq!(config.max_attempts, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Wait between poll attempts (in milliseconds)
    /// Default: 2000
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Poll attempts after the initial fetch before giving up
    /// Default: 60
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Reveal phase timings
    #[serde(default)]
    pub reveal: RevealTimings,
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_max_attempts() -> u32 {
    60
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
            reveal: RevealTimings::default(),
        }
    }
}

impl ResolverConfig {
    /// Longer poll budget for slow research backends
    ///
    /// - Poll interval: 3 seconds
    /// - Max attempts: 90 (about four and a half minutes)
    pub fn patient() -> Self {
        Self {
            poll_interval_ms: 3000,
            max_attempts: 90,
            reveal: RevealTimings::default(),
        }
    }

    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Longest the poller can wait before timing out
    pub fn poll_budget(&self) -> Duration {
        self.poll_interval().saturating_mul(self.max_attempts)
    }

    /// Reject configurations that could never resolve a claim
    pub fn validate(&self) -> Result<(), ResolutionError> {
        if self.poll_interval_ms == 0 {
            return Err(ResolutionError::Config(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ResolutionError::Config(
                "max_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.max_attempts, 60);
        assert_eq!(config.reveal.per_char_ms, 30);
        assert_eq!(config.reveal.settle_ms, 500);
        assert_eq!(config.reveal.commentary_ms, 2500);
        assert_eq!(config.reveal.reveal_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_patient_config() {
        let config = ResolverConfig::patient();
        assert!(config.poll_budget() > ResolverConfig::default().poll_budget());
    }

    #[test]
    fn test_duration_conversions() {
        let config = ResolverConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.poll_budget(), Duration::from_secs(120));
        assert_eq!(
            config.reveal.total_for("abcd"),
            Duration::from_millis(4 * 30 + 500 + 2500 + 1000)
        );
    }

    #[test]
    fn test_totals_saturate_on_huge_settings() {
        let timings = RevealTimings {
            per_char_ms: u64::MAX,
            ..Default::default()
        };
        assert_eq!(timings.total_for(&"x".repeat(2000)), Duration::MAX);

        let config = ResolverConfig {
            poll_interval_ms: u64::MAX,
            max_attempts: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.poll_budget(), Duration::MAX);
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let config = ResolverConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ResolverConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: ResolverConfig = toml::from_str(
            r#"
            max_attempts = 10

            [reveal]
            commentary_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.reveal.commentary_ms, 0);
        assert_eq!(config.reveal.per_char_ms, 30);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ResolverConfig::patient();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: ResolverConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
