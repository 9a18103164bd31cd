//! Attempt budgets for the probabilistic drivers.

use serde::{Deserialize, Serialize};

/// Budget for [`Simon`](crate::Simon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimonConfig {
    /// Circuit runs allowed per input bit before giving up.
    #[serde(default = "default_samples_per_bit")]
    pub samples_per_bit: u32,
}

fn default_samples_per_bit() -> u32 {
    10
}

impl Default for SimonConfig {
    fn default() -> Self {
        Self {
            samples_per_bit: default_samples_per_bit(),
        }
    }
}

/// Budget for [`PeriodFinder`](crate::PeriodFinder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFinderConfig {
    /// Circuit runs combined (by LCM) into one period estimate.
    #[serde(default = "default_samples_per_attempt")]
    pub samples_per_attempt: u32,

    /// Estimates tried before giving up.
    #[serde(default = "default_attempts")]
    pub attempts: u32,
}

fn default_samples_per_attempt() -> u32 {
    8
}

fn default_attempts() -> u32 {
    3
}

impl Default for PeriodFinderConfig {
    fn default() -> Self {
        Self {
            samples_per_attempt: default_samples_per_attempt(),
            attempts: default_attempts(),
        }
    }
}

/// Budget for [`Shor`](crate::Shor).
///
/// Order finding gets `2 · m` circuit runs and stops early after `m`
/// accepted estimates, where `m` is the bit length of the modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorConfig {
    /// Random bases tried before giving up.
    #[serde(default = "default_factor_attempts")]
    pub factor_attempts: u32,
}

fn default_factor_attempts() -> u32 {
    8
}

impl Default for ShorConfig {
    fn default() -> Self {
        Self {
            factor_attempts: default_factor_attempts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(SimonConfig::default().samples_per_bit, 10);
        let p = PeriodFinderConfig::default();
        assert_eq!((p.samples_per_attempt, p.attempts), (8, 3));
        assert_eq!(ShorConfig::default().factor_attempts, 8);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let p: PeriodFinderConfig = serde_json::from_str(r#"{"attempts": 5}"#).unwrap();
        assert_eq!(p.samples_per_attempt, 8);
        assert_eq!(p.attempts, 5);
        let s: ShorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(s, ShorConfig::default());
    }
}
