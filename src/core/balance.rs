use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net balance of one participant within a group snapshot.
///
/// A positive balance means the participant is owed money (creditor).
/// A negative balance means the participant owes money (debtor).
/// Balances within the configured epsilon of zero count as settled.
///
/// In a coherent ledger the balances of all participants sum to zero.
/// The simplifier relies on that but does not check it; see
/// [`validate_balances`](crate::optimization::validation::validate_balances).
///
/// # Examples
///
/// ```
/// use debt_simplifier::core::balance::PersonBalance;
/// use rust_decimal_macros::dec;
///
/// let alice = PersonBalance::new("a", "Alice", dec!(30));
/// assert!(alice.is_creditor(dec!(0.01)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonBalance {
    pub user_id: ParticipantId,
    pub name: String,
    pub balance: Decimal,
}

impl PersonBalance {
    pub fn new(
        user_id: impl Into<ParticipantId>,
        name: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            balance,
        }
    }

    /// Owed more than `epsilon`.
    pub fn is_creditor(&self, epsilon: Decimal) -> bool {
        self.balance > epsilon
    }

    /// Owes more than `epsilon`.
    pub fn is_debtor(&self, epsilon: Decimal) -> bool {
        self.balance < -epsilon
    }

    pub fn is_settled(&self, epsilon: Decimal) -> bool {
        !self.is_creditor(epsilon) && !self.is_debtor(epsilon)
    }
}

/// Sum of all balances in a snapshot. Zero for a coherent ledger.
///
/// Panics if the sum leaves the `Decimal` range; see
/// [`checked_total_balance`].
pub fn total_balance(balances: &[PersonBalance]) -> Decimal {
    balances.iter().map(|b| b.balance).sum()
}

/// Sum of all balances, or `None` if it overflows.
pub fn checked_total_balance(balances: &[PersonBalance]) -> Option<Decimal> {
    balances
        .iter()
        .try_fold(Decimal::ZERO, |acc, b| acc.checked_add(b.balance))
}
