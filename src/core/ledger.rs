use crate::core::balance::PersonBalance;
use crate::core::expense::{Expense, Settlement};
use crate::core::participant::ParticipantId;
use crate::core::transaction::SimplifiedTransaction;
use crate::optimization::simplify::DebtSimplifier;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from building a group ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("an expense needs at least one split")]
    EmptySplits,
    #[error("split of {participant} must not be negative, got {amount}")]
    NegativeSplit {
        participant: ParticipantId,
        amount: Decimal,
    },
    #[error("splits sum to {actual}, expense amount is {expected}")]
    SplitMismatch { expected: Decimal, actual: Decimal },
    #[error("{0} is not a member of this group")]
    UnknownMember(ParticipantId),
    #[error("{0} is already a member of this group")]
    DuplicateMember(ParticipantId),
    #[error("{0} cannot settle with themselves")]
    SelfSettlement(ParticipantId),
}

/// A group member as known to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: ParticipantId,
    pub name: String,
}

/// Expenses and settlements of one group, in one currency.
///
/// The ledger derives each member's net balance on demand: what they paid
/// minus what they owe across all expenses, adjusted by recorded
/// settlements. A positive balance means the member is owed money.
///
/// Every credit has a matching debit, so the balances of a ledger always
/// sum to zero. Nothing is cached; callers re-run
/// [`settlement_plan`](GroupLedger::settlement_plan) after each change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupLedger {
    members: Vec<Member>,
    expenses: Vec<Expense>,
    settlements: Vec<Settlement>,
}

impl GroupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(
        &mut self,
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
    ) -> Result<(), LedgerError> {
        let id = id.into();
        if self.is_member(&id) {
            return Err(LedgerError::DuplicateMember(id));
        }
        self.members.push(Member {
            id,
            name: name.into(),
        });
        Ok(())
    }

    pub fn is_member(&self, id: &ParticipantId) -> bool {
        self.members.iter().any(|m| &m.id == id)
    }

    /// Record an expense. The payer and everyone in the split must be members.
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), LedgerError> {
        self.require_member(expense.paid_by())?;
        for split in expense.splits() {
            self.require_member(&split.user_id)?;
        }
        debug!(
            "expense '{}' of {} paid by {}",
            expense.description(),
            expense.amount(),
            expense.paid_by()
        );
        self.expenses.push(expense);
        Ok(())
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let idx = self.expenses.iter().position(|e| e.id() == id)?;
        Some(self.expenses.remove(idx))
    }

    pub fn record_settlement(&mut self, settlement: Settlement) -> Result<(), LedgerError> {
        self.require_member(settlement.from())?;
        self.require_member(settlement.to())?;
        debug!(
            "settlement {} -> {} of {}",
            settlement.from(),
            settlement.to(),
            settlement.amount()
        );
        self.settlements.push(settlement);
        Ok(())
    }

    /// Record every payment of a plan as a settlement.
    ///
    /// All payments are checked before any is recorded.
    pub fn record_plan(&mut self, plan: &[SimplifiedTransaction]) -> Result<(), LedgerError> {
        let settlements = plan
            .iter()
            .map(|t| Settlement::new(t.from.clone(), t.to.clone(), t.amount))
            .collect::<Result<Vec<_>, _>>()?;
        for s in &settlements {
            self.require_member(s.from())?;
            self.require_member(s.to())?;
        }
        self.settlements.extend(settlements);
        Ok(())
    }

    /// Net balance of one member.
    pub fn position(&self, id: &ParticipantId) -> Decimal {
        self.positions().get(id).copied().unwrap_or(Decimal::ZERO)
    }

    /// Balances of all members, in the order they joined.
    pub fn balances(&self) -> Vec<PersonBalance> {
        let positions = self.positions();
        self.members
            .iter()
            .map(|m| PersonBalance {
                user_id: m.id.clone(),
                name: m.name.clone(),
                balance: positions.get(&m.id).copied().unwrap_or(Decimal::ZERO),
            })
            .collect()
    }

    /// Verify that member balances sum to zero.
    pub fn is_balanced(&self) -> bool {
        self.positions().values().sum::<Decimal>() == Decimal::ZERO
    }

    /// Total spent by the group across all expenses.
    pub fn total_expenses(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// Payments that would settle the group right now.
    pub fn settlement_plan(&self, simplifier: &DebtSimplifier) -> Vec<SimplifiedTransaction> {
        simplifier.simplify(&self.balances())
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    fn require_member(&self, id: &ParticipantId) -> Result<(), LedgerError> {
        if self.is_member(id) {
            Ok(())
        } else {
            Err(LedgerError::UnknownMember(id.clone()))
        }
    }

    fn positions(&self) -> HashMap<ParticipantId, Decimal> {
        let mut positions: HashMap<ParticipantId, Decimal> = HashMap::new();
        for expense in &self.expenses {
            *positions
                .entry(expense.paid_by().clone())
                .or_insert(Decimal::ZERO) += expense.amount();
            for split in expense.splits() {
                *positions
                    .entry(split.user_id.clone())
                    .or_insert(Decimal::ZERO) -= split.amount;
            }
        }
        for settlement in &self.settlements {
            *positions
                .entry(settlement.from().clone())
                .or_insert(Decimal::ZERO) += settlement.amount();
            *positions
                .entry(settlement.to().clone())
                .or_insert(Decimal::ZERO) -= settlement.amount();
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Split;
    use rust_decimal_macros::dec;

    fn apartment() -> GroupLedger {
        let mut ledger = GroupLedger::new();
        ledger.add_member("user-1", "John Doe").unwrap();
        ledger.add_member("user-2", "Jane Smith").unwrap();
        ledger
    }

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    #[test]
    fn test_rent_split() {
        let mut ledger = apartment();
        ledger
            .add_expense(
                Expense::new(
                    "Monthly Rent",
                    dec!(1200),
                    "user-1",
                    vec![Split::new("user-1", dec!(600)), Split::new("user-2", dec!(600))],
                )
                .unwrap(),
            )
            .unwrap();

        assert_eq!(ledger.position(&id("user-1")), dec!(600));
        assert_eq!(ledger.position(&id("user-2")), dec!(-600));
        assert!(ledger.is_balanced());
        assert_eq!(ledger.total_expenses(), dec!(1200));

        let plan = ledger.settlement_plan(&DebtSimplifier::default());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].from_name, "Jane Smith");
        assert_eq!(plan[0].to_name, "John Doe");
        assert_eq!(plan[0].amount, dec!(600));
    }

    #[test]
    fn test_settlement_clears_debt() {
        let mut ledger = apartment();
        ledger
            .add_expense(
                Expense::split_equally("Uber", dec!(45), "user-2", &[id("user-1"), id("user-2")], 2)
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(ledger.position(&id("user-1")), dec!(-22.50));

        ledger
            .record_settlement(Settlement::new("user-1", "user-2", dec!(22.50)).unwrap())
            .unwrap();
        assert_eq!(ledger.position(&id("user-1")), Decimal::ZERO);
        assert_eq!(ledger.position(&id("user-2")), Decimal::ZERO);
        assert!(ledger.settlement_plan(&DebtSimplifier::default()).is_empty());
    }

    #[test]
    fn test_record_plan_settles_everything() {
        let mut ledger = apartment();
        ledger.add_member("user-3", "Mike Johnson").unwrap();
        let everyone = [id("user-1"), id("user-2"), id("user-3")];
        let dinner = Expense::split_equally("Dinner", dec!(85.50), "user-1", &everyone, 2).unwrap();
        ledger.add_expense(dinner).unwrap();
        let groceries =
            Expense::split_equally("Groceries", dec!(31), "user-3", &everyone, 2).unwrap();
        ledger.add_expense(groceries).unwrap();

        let simplifier = DebtSimplifier::default();
        let plan = ledger.settlement_plan(&simplifier);
        assert!(!plan.is_empty());

        ledger.record_plan(&plan).unwrap();
        assert!(ledger.is_balanced());
        assert!(ledger.balances().iter().all(|b| b.balance == Decimal::ZERO));
        assert!(ledger.settlement_plan(&simplifier).is_empty());
    }

    #[test]
    fn test_unknown_member_rejected() {
        let mut ledger = apartment();
        let expense = Expense::new(
            "Gift",
            dec!(10),
            "user-9",
            vec![Split::new("user-1", dec!(10))],
        )
        .unwrap();
        assert_eq!(
            ledger.add_expense(expense),
            Err(LedgerError::UnknownMember(id("user-9")))
        );

        let settlement = Settlement::new("user-1", "user-9", dec!(5)).unwrap();
        assert!(ledger.record_settlement(settlement).is_err());
        assert!(ledger.settlements().is_empty());
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let mut ledger = apartment();
        assert_eq!(
            ledger.add_member("user-1", "Johnny"),
            Err(LedgerError::DuplicateMember(id("user-1")))
        );
        assert_eq!(ledger.members().len(), 2);
    }

    #[test]
    fn test_remove_expense() {
        let mut ledger = apartment();
        let both = [id("user-1"), id("user-2")];
        let expense = Expense::split_equally("Coffee", dec!(8), "user-1", &both, 2).unwrap();
        let expense_id = expense.id();
        ledger.add_expense(expense).unwrap();

        assert!(ledger.remove_expense(expense_id).is_some());
        assert!(ledger.remove_expense(expense_id).is_none());
        assert_eq!(ledger.position(&id("user-1")), Decimal::ZERO);
    }

    #[test]
    fn test_balances_follow_member_order() {
        let mut ledger = GroupLedger::new();
        ledger.add_member("z", "Zed").unwrap();
        ledger.add_member("a", "Amy").unwrap();
        let names: Vec<String> = ledger.balances().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }
}
