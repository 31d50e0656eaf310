//! Random balance generation for benchmarks, property checks and the CLI.
//!
//! Generated groups are always coherent: balances are whole minor units and
//! sum to exactly zero.

use crate::core::balance::PersonBalance;
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

/// Group settings the generator cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("decimal_places must be at most 18, got {0}")]
    PrecisionOutOfRange(u32),
    #[error("max amount {max_amount} is too large at {decimal_places} decimal places")]
    AmountOutOfRange { max_amount: u64, decimal_places: u32 },
}

/// Configuration for generating a random group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of participants in the group.
    pub participant_count: usize,
    /// Largest absolute balance, in whole currency units.
    pub max_amount: u64,
    /// Minor-unit precision of generated balances.
    pub decimal_places: u32,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            participant_count: 10,
            max_amount: 1_000,
            decimal_places: 2,
        }
    }
}

/// Generate a random, zero-sum balance snapshot.
///
/// Every participant but the last draws a random balance; the last one
/// absorbs the negated total so the snapshot sums to zero.
pub fn generate_random_balances(
    config: &GroupConfig,
) -> Result<Vec<PersonBalance>, GeneratorError> {
    let scale = 10i64
        .checked_pow(config.decimal_places)
        .ok_or(GeneratorError::PrecisionOutOfRange(config.decimal_places))?;
    let bound = i64::try_from(config.max_amount)
        .ok()
        .and_then(|max| max.checked_mul(scale))
        .ok_or(GeneratorError::AmountOutOfRange {
            max_amount: config.max_amount,
            decimal_places: config.decimal_places,
        })?
        .max(1);

    let mut rng = rand::thread_rng();
    let mut balances = Vec::with_capacity(config.participant_count);
    let mut total = Decimal::ZERO;

    for i in 0..config.participant_count {
        let id = format!("user-{:03}", i);
        let name = format!("Member {}", i);
        let balance = if i + 1 == config.participant_count {
            -total
        } else {
            Decimal::new(rng.gen_range(-bound..=bound), config.decimal_places)
        };
        total += balance;
        balances.push(PersonBalance::new(id, name, balance));
    }

    Ok(balances)
}
