use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single directed payment in a settlement plan.
///
/// `from` was a debtor and pays `to`, who was a creditor. The amount is
/// always strictly positive and already rounded to the configured
/// minor-unit precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedTransaction {
    pub from: ParticipantId,
    pub from_name: String,
    pub to: ParticipantId,
    pub to_name: String,
    pub amount: Decimal,
}

impl SimplifiedTransaction {
    /// True when payer and payee are the same id. Only possible if the
    /// input contained duplicate ids.
    pub fn is_self_payment(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for SimplifiedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) -> {} ({}): {}",
            self.from_name, self.from, self.to_name, self.to, self.amount
        )
    }
}
