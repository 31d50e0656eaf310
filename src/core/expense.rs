use crate::core::ledger::LedgerError;
use crate::core::participant::ParticipantId;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One participant's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub user_id: ParticipantId,
    pub amount: Decimal,
}

impl Split {
    pub fn new(user_id: impl Into<ParticipantId>, amount: Decimal) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
        }
    }
}

/// An expense paid by one participant and shared among several.
///
/// The payer is credited the full amount; every split participant
/// (the payer included, if listed) is debited their share. Splits must
/// add up to the amount exactly.
///
/// # Examples
///
/// ```
/// use debt_simplifier::core::expense::Expense;
/// use debt_simplifier::core::participant::ParticipantId;
/// use rust_decimal_macros::dec;
///
/// let people = [ParticipantId::new("a"), ParticipantId::new("b"), ParticipantId::new("c")];
/// let dinner = Expense::split_equally("Dinner", dec!(100), "a", &people, 2).unwrap();
///
/// assert_eq!(dinner.splits()[0].amount, dec!(33.34));
/// assert_eq!(dinner.splits()[1].amount, dec!(33.33));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    id: Uuid,
    description: String,
    amount: Decimal,
    paid_by: ParticipantId,
    splits: Vec<Split>,
    category: Option<String>,
    date: DateTime<Utc>,
}

impl Expense {
    /// Create an expense with explicit splits.
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        paid_by: impl Into<ParticipantId>,
        splits: Vec<Split>,
    ) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        if splits.is_empty() {
            return Err(LedgerError::EmptySplits);
        }
        if let Some(split) = splits.iter().find(|s| s.amount < Decimal::ZERO) {
            return Err(LedgerError::NegativeSplit {
                participant: split.user_id.clone(),
                amount: split.amount,
            });
        }
        let total: Decimal = splits.iter().map(|s| s.amount).sum();
        if total != amount {
            return Err(LedgerError::SplitMismatch {
                expected: amount,
                actual: total,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            splits,
            category: None,
            date: Utc::now(),
        })
    }

    /// Split an amount evenly at `decimal_places` precision.
    ///
    /// Shares are truncated to the minor unit and the leftover units go one
    /// each to the first participants, so the splits always sum to `amount`.
    pub fn split_equally(
        description: impl Into<String>,
        amount: Decimal,
        paid_by: impl Into<ParticipantId>,
        participants: &[ParticipantId],
        decimal_places: u32,
    ) -> Result<Self, LedgerError> {
        if participants.is_empty() {
            return Err(LedgerError::EmptySplits);
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        let unit = Decimal::new(1, decimal_places);
        let share = (amount / Decimal::from(participants.len()))
            .round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero);
        let mut remainder = amount - share * Decimal::from(participants.len());

        let mut splits: Vec<Split> = participants
            .iter()
            .map(|p| Split::new(p.clone(), share))
            .collect();
        for split in splits.iter_mut() {
            if remainder < unit {
                break;
            }
            split.amount += unit;
            remainder -= unit;
        }
        // Anything finer than the minor unit stays with the first share.
        splits[0].amount += remainder;

        Self::new(description, amount, paid_by, splits)
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn paid_by(&self) -> &ParticipantId {
        &self.paid_by
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// The share owed by `participant`, zero if they are not in the split.
    pub fn share_of(&self, participant: &ParticipantId) -> Decimal {
        self.splits
            .iter()
            .filter(|s| &s.user_id == participant)
            .map(|s| s.amount)
            .sum()
    }
}

/// A payment recorded between two participants outside of any expense.
///
/// Recording a settlement raises the payer's balance and lowers the
/// payee's by the same amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    id: Uuid,
    from: ParticipantId,
    to: ParticipantId,
    amount: Decimal,
    created_at: DateTime<Utc>,
}

impl Settlement {
    pub fn new(
        from: impl Into<ParticipantId>,
        to: impl Into<ParticipantId>,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        let from = from.into();
        let to = to.into();
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        if from == to {
            return Err(LedgerError::SelfSettlement(from));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            from,
            to,
            amount,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn from(&self) -> &ParticipantId {
        &self.from
    }

    pub fn to(&self) -> &ParticipantId {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| ParticipantId::new(*n)).collect()
    }

    #[test]
    fn test_expense_creation() {
        let exp = Expense::new(
            "Uber to Airport",
            dec!(45.00),
            "user-2",
            vec![Split::new("user-1", dec!(22.50)), Split::new("user-2", dec!(22.50))],
        )
        .unwrap()
        .with_category("Travel");

        assert_eq!(exp.amount(), dec!(45));
        assert_eq!(exp.paid_by().as_str(), "user-2");
        assert_eq!(exp.category(), Some("Travel"));
        assert_eq!(exp.share_of(&ParticipantId::new("user-1")), dec!(22.50));
        assert_eq!(exp.share_of(&ParticipantId::new("user-9")), Decimal::ZERO);
    }

    #[test]
    fn test_expense_rejects_non_positive() {
        let result = Expense::new(
            "Nothing",
            Decimal::ZERO,
            "a",
            vec![Split::new("a", Decimal::ZERO)],
        );
        assert!(matches!(result, Err(LedgerError::NonPositiveAmount(_))));
    }

    #[test]
    fn test_expense_rejects_mismatched_splits() {
        let result = Expense::new(
            "Dinner",
            dec!(85.50),
            "a",
            vec![Split::new("a", dec!(28.50)), Split::new("b", dec!(28.50))],
        );
        assert_eq!(
            result.unwrap_err(),
            LedgerError::SplitMismatch {
                expected: dec!(85.50),
                actual: dec!(57.00),
            }
        );
    }

    #[test]
    fn test_expense_rejects_negative_split() {
        let result = Expense::new(
            "Odd",
            dec!(10),
            "a",
            vec![Split::new("a", dec!(15)), Split::new("b", dec!(-5))],
        );
        assert!(matches!(result, Err(LedgerError::NegativeSplit { .. })));
    }

    #[test]
    fn test_expense_rejects_empty_splits() {
        assert!(matches!(
            Expense::new("Lonely", dec!(10), "a", vec![]),
            Err(LedgerError::EmptySplits)
        ));
        assert!(matches!(
            Expense::split_equally("Lonely", dec!(10), "a", &[], 2),
            Err(LedgerError::EmptySplits)
        ));
    }

    #[test]
    fn test_split_equally_exact() {
        let people = ids(&["user-1", "user-2", "user-3"]);
        let exp = Expense::split_equally("Dinner", dec!(85.50), "user-1", &people, 2).unwrap();
        assert!(exp.splits().iter().all(|s| s.amount == dec!(28.50)));
    }

    #[test]
    fn test_split_equally_distributes_leftover_cents() {
        let exp = Expense::split_equally("Taxi", dec!(10), "a", &ids(&["a", "b", "c"]), 2).unwrap();
        let amounts: Vec<Decimal> = exp.splits().iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![dec!(3.34), dec!(3.33), dec!(3.33)]);

        let exp =
            Expense::split_equally("Snacks", dec!(0.05), "a", &ids(&["a", "b", "c"]), 2).unwrap();
        let amounts: Vec<Decimal> = exp.splits().iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![dec!(0.02), dec!(0.02), dec!(0.01)]);
    }

    #[test]
    fn test_split_equally_sub_unit_amount() {
        let exp = Expense::split_equally("Fee", dec!(1.005), "a", &ids(&["a", "b"]), 2).unwrap();
        let amounts: Vec<Decimal> = exp.splits().iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![dec!(0.505), dec!(0.50)]);
    }

    #[test]
    fn test_settlement_validation() {
        assert!(Settlement::new("a", "b", dec!(6)).is_ok());
        assert!(matches!(
            Settlement::new("a", "a", dec!(6)),
            Err(LedgerError::SelfSettlement(_))
        ));
        assert!(matches!(
            Settlement::new("a", "b", dec!(-1)),
            Err(LedgerError::NonPositiveAmount(_))
        ));
    }
}
