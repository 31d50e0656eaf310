//! Simplifier configuration.
//!
//! The defaults reproduce currency-style behavior: balances within one
//! cent of zero are settled, and payments are rounded to cents with
//! round-half-up. Callers working with other minor units override these,
//! either in code or from a JSON file:
//!
//! ```json
//! { "epsilon": "0.001", "decimal_places": 3, "rounding": "half_even", "currency_symbol": "KD" }
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Highest scale a `Decimal` can carry.
const MAX_DECIMAL_PLACES: u32 = 28;

/// Errors arising from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("epsilon must be positive, got {0}")]
    NonPositiveEpsilon(Decimal),
    #[error("decimal_places must be at most 28, got {0}")]
    InvalidPrecision(u32),
}

/// Tie-break rule used when an emitted amount lies exactly halfway
/// between two representable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingRule {
    /// 2.345 -> 2.35 (midpoint away from zero).
    #[default]
    HalfUp,
    /// 2.345 -> 2.34, 2.355 -> 2.36 (banker's rounding).
    HalfEven,
}

impl RoundingRule {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingRule::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingRule::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Numeric policy of the debt simplifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifierConfig {
    /// Balances and remainders within this distance of zero count as settled.
    pub epsilon: Decimal,
    /// Minor-unit precision of emitted amounts.
    pub decimal_places: u32,
    pub rounding: RoundingRule,
    /// Prefix used by the human-readable summary.
    pub currency_symbol: String,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            epsilon: dec!(0.01),
            decimal_places: 2,
            rounding: RoundingRule::HalfUp,
            currency_symbol: "$".to_string(),
        }
    }
}

impl SimplifierConfig {
    /// Load and validate a configuration from a JSON file.
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epsilon <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveEpsilon(self.epsilon));
        }
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::InvalidPrecision(self.decimal_places));
        }
        Ok(())
    }

    pub fn with_epsilon(mut self, epsilon: Decimal) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingRule) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Round an amount to the configured precision with the configured rule.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimal_places, self.rounding.strategy())
    }
}
