//! Optional pre-checks layered on top of the simplifier.
//!
//! The simplifier itself is total and never reports a problem with its
//! input. Callers that want imbalanced or malformed snapshots rejected
//! run these checks first.

use crate::core::balance::{checked_total_balance, PersonBalance};
use crate::core::participant::ParticipantId;
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("balances sum to {total}, expected zero within {tolerance}")]
    ImbalancedLedger { total: Decimal, tolerance: Decimal },
    #[error("participant {id} appears more than once")]
    DuplicateParticipant { id: ParticipantId },
    #[error("balances overflow the decimal range when summed")]
    Overflow,
}

/// Check that a snapshot is coherent: ids are unique and the balances sum
/// to zero within `tolerance`.
pub fn validate_balances(
    balances: &[PersonBalance],
    tolerance: Decimal,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(balances.len());
    for b in balances {
        if !seen.insert(&b.user_id) {
            warn!("duplicate participant {} in balance snapshot", b.user_id);
            return Err(ValidationError::DuplicateParticipant {
                id: b.user_id.clone(),
            });
        }
    }

    let total = checked_total_balance(balances).ok_or_else(|| {
        warn!("balance snapshot overflows when summed");
        ValidationError::Overflow
    })?;
    if total.abs() > tolerance {
        warn!("balance snapshot is off by {}", total);
        return Err(ValidationError::ImbalancedLedger { total, tolerance });
    }
    Ok(())
}
