//! Human-like pacing between search-engine interactions
//!
//! Search engines flag clients that type and paginate at machine speed. The
//! harvester therefore pauses for a random duration drawn from a configured
//! range after the home page settles, around typing the query, and after
//! every results page loads. This is deliberate anti-detection behavior.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::utils::{DEFAULT_KEYSTROKE_DELAY_MS, DEFAULT_SETTLE_DELAY_MS};

/// Inclusive range a random delay is drawn from, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    #[must_use]
    pub const fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    #[must_use]
    pub const fn from_secs(min_secs: u64, max_secs: u64) -> Self {
        Self::from_millis(min_secs * 1000, max_secs * 1000)
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::from_millis(0, 0)
    }

    /// Draw a delay from the range; a collapsed range always yields `min_ms`
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidPacing {
                field,
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }
}

/// Delay policy applied by the harvester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingPolicy {
    /// After a page (home page or results page) has loaded
    pub settle: DelayRange,
    /// Before typing the query and before submitting it
    pub keystroke: DelayRange,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            settle: DelayRange::from_millis(DEFAULT_SETTLE_DELAY_MS.0, DEFAULT_SETTLE_DELAY_MS.1),
            keystroke: DelayRange::from_millis(
                DEFAULT_KEYSTROKE_DELAY_MS.0,
                DEFAULT_KEYSTROKE_DELAY_MS.1,
            ),
        }
    }
}

impl PacingPolicy {
    /// No waiting at all. Meant for tests and local mirrors of a search page.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            settle: DelayRange::zero(),
            keystroke: DelayRange::zero(),
        }
    }

    pub async fn settle(&self) {
        pause(self.settle).await;
    }

    pub async fn keystroke(&self) {
        pause(self.keystroke).await;
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.settle.validate("settle")?;
        self.keystroke.validate("keystroke")
    }
}

async fn pause(range: DelayRange) {
    let delay = range.sample();
    if delay.is_zero() {
        return;
    }
    tracing::debug!("Pacing pause of {:.1}s", delay.as_secs_f64());
    tokio::time::sleep(delay).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_inside_bounds() {
        let range = DelayRange::from_millis(5, 9);
        for _ in 0..200 {
            let d = range.sample();
            assert!(d >= Duration::from_millis(5) && d <= Duration::from_millis(9));
        }
    }

    #[test]
    fn collapsed_range_is_fixed() {
        assert_eq!(DelayRange::from_secs(3, 3).sample(), Duration::from_secs(3));
        assert_eq!(DelayRange::zero().sample(), Duration::ZERO);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let policy = PacingPolicy {
            settle: DelayRange::from_millis(10, 1),
            keystroke: DelayRange::zero(),
        };
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::InvalidPacing { field: "settle", .. })
        ));
        assert!(PacingPolicy::default().validate().is_ok());
    }
}
