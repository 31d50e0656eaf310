use crate::config::SimplifierConfig;
use crate::core::balance::PersonBalance;
use crate::core::participant::ParticipantId;
use crate::core::transaction::SimplifiedTransaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One human-readable line per payment, e.g. `"Bob pays Alice $10.00"`.
pub fn debt_summary(transactions: &[SimplifiedTransaction]) -> Vec<String> {
    debt_summary_with(transactions, &SimplifierConfig::default())
}

/// Like [`debt_summary`], using the configured currency symbol and precision.
pub fn debt_summary_with(
    transactions: &[SimplifiedTransaction],
    config: &SimplifierConfig,
) -> Vec<String> {
    let precision = config.decimal_places as usize;
    transactions
        .iter()
        .map(|t| {
            format!(
                "{} pays {} {}{:.*}",
                t.from_name,
                t.to_name,
                config.currency_symbol,
                precision,
                config.round(t.amount)
            )
        })
        .collect()
}

/// Balances after every payment in the plan has been made.
///
/// Each payer's balance rises by what they paid and each payee's falls by
/// what they received. Entries keep their input order; duplicate ids share
/// one adjustment. Sums saturate at the bounds of `Decimal`.
pub fn apply_transactions(
    balances: &[PersonBalance],
    transactions: &[SimplifiedTransaction],
) -> Vec<PersonBalance> {
    let mut adjustments: HashMap<&ParticipantId, Decimal> = HashMap::new();
    for t in transactions {
        let paid = adjustments.entry(&t.from).or_insert(Decimal::ZERO);
        *paid = paid.saturating_add(t.amount);
        let received = adjustments.entry(&t.to).or_insert(Decimal::ZERO);
        *received = received.saturating_sub(t.amount);
    }

    let mut applied: HashMap<&ParticipantId, bool> = HashMap::new();
    balances
        .iter()
        .map(|b| {
            let mut balance = b.balance;
            let first = applied.insert(&b.user_id, true).is_none();
            if first {
                let adjustment = adjustments.get(&b.user_id).copied().unwrap_or(Decimal::ZERO);
                balance = balance.saturating_add(adjustment);
            }
            PersonBalance {
                user_id: b.user_id.clone(),
                name: b.name.clone(),
                balance,
            }
        })
        .collect()
}

/// Statistics of a settlement plan against the balances it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub transaction_count: usize,
    /// Sum of all payment amounts, saturating at `Decimal::MAX`.
    pub total_volume: Decimal,
    pub creditor_count: usize,
    pub debtor_count: usize,
    /// `creditors + debtors - 1`, the most payments greedy matching can emit.
    pub max_transactions: usize,
    /// Participants left with a balance beyond ε after applying the plan.
    pub residuals: Vec<(ParticipantId, Decimal)>,
}

impl PlanSummary {
    pub fn from_transactions(
        balances: &[PersonBalance],
        transactions: &[SimplifiedTransaction],
        epsilon: Decimal,
    ) -> Self {
        let creditor_count = balances.iter().filter(|b| b.is_creditor(epsilon)).count();
        let debtor_count = balances.iter().filter(|b| b.is_debtor(epsilon)).count();
        let max_transactions = if creditor_count == 0 || debtor_count == 0 {
            0
        } else {
            creditor_count + debtor_count - 1
        };

        let residuals = apply_transactions(balances, transactions)
            .into_iter()
            .filter(|b| !b.is_settled(epsilon))
            .map(|b| (b.user_id, b.balance))
            .collect();

        PlanSummary {
            transaction_count: transactions.len(),
            total_volume: transactions
                .iter()
                .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount)),
            creditor_count,
            debtor_count,
            max_transactions,
            residuals,
        }
    }

    /// True when every participant ends within ε of zero.
    pub fn is_fully_settled(&self) -> bool {
        self.residuals.is_empty()
    }
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        writeln!(f, "Payments:      {}", self.transaction_count)?;
        writeln!(f, "Total Volume:  {}", self.total_volume)?;
        writeln!(f, "Creditors:     {}", self.creditor_count)?;
        writeln!(f, "Debtors:       {}", self.debtor_count)?;
        writeln!(f, "Upper Bound:   {}", self.max_transactions)?;
        writeln!(f, "Fully Settled: {}", self.is_fully_settled())?;

        if !self.residuals.is_empty() {
            writeln!(f, "\nUnsettled:")?;
            for (party, amount) in &self.residuals {
                writeln!(f, "  {} {}", party, amount)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::simplify::simplify;
    use rust_decimal_macros::dec;

    fn group() -> Vec<PersonBalance> {
        vec![
            PersonBalance::new("a", "Alice", dec!(40)),
            PersonBalance::new("b", "Bob", dec!(10)),
            PersonBalance::new("c", "Carol", dec!(-50)),
        ]
    }

    #[test]
    fn test_debt_summary_lines() {
        let plan = simplify(&group());
        assert_eq!(
            debt_summary(&plan),
            vec!["Carol pays Alice $40.00", "Carol pays Bob $10.00"]
        );
    }

    #[test]
    fn test_debt_summary_with_symbol() {
        let plan = simplify(&[
            PersonBalance::new("a", "Ana", dec!(12.5)),
            PersonBalance::new("b", "Ben", dec!(-12.5)),
        ]);
        let config = SimplifierConfig::default().with_currency_symbol("€");
        assert_eq!(debt_summary_with(&plan, &config), vec!["Ben pays Ana €12.50"]);
    }

    #[test]
    fn test_debt_summary_empty() {
        assert!(debt_summary(&[]).is_empty());
    }

    #[test]
    fn test_apply_transactions_settles() {
        let balances = group();
        let plan = simplify(&balances);
        let after = apply_transactions(&balances, &plan);
        assert!(after.iter().all(|b| b.balance == Decimal::ZERO));
        assert_eq!(after[0].name, "Alice");
    }

    #[test]
    fn test_plan_summary_balanced() {
        let balances = group();
        let plan = simplify(&balances);
        let summary = PlanSummary::from_transactions(&balances, &plan, dec!(0.01));

        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.total_volume, dec!(50));
        assert_eq!(summary.creditor_count, 2);
        assert_eq!(summary.debtor_count, 1);
        assert_eq!(summary.max_transactions, 2);
        assert!(summary.is_fully_settled());
    }

    #[test]
    fn test_plan_summary_reports_residuals() {
        let balances = vec![
            PersonBalance::new("a", "A", dec!(20)),
            PersonBalance::new("b", "B", dec!(15)),
            PersonBalance::new("c", "C", dec!(-30)),
        ];
        let plan = simplify(&balances);
        let summary = PlanSummary::from_transactions(&balances, &plan, dec!(0.01));

        assert!(!summary.is_fully_settled());
        assert_eq!(summary.residuals, vec![(ParticipantId::new("b"), dec!(5))]);
        assert!(summary.to_string().contains("Unsettled"));
    }

    #[test]
    fn test_plan_summary_extreme_balances() {
        let balances = vec![
            PersonBalance::new("a", "A", Decimal::MAX),
            PersonBalance::new("b", "B", Decimal::MAX),
            PersonBalance::new("c", "C", Decimal::MIN),
            PersonBalance::new("d", "D", Decimal::MIN),
        ];
        let plan = simplify(&balances);
        let summary = PlanSummary::from_transactions(&balances, &plan, dec!(0.01));

        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.total_volume, Decimal::MAX);
        assert!(summary.is_fully_settled());
    }

    #[test]
    fn test_plan_summary_no_debtors() {
        let balances = vec![PersonBalance::new("a", "A", dec!(20))];
        let summary = PlanSummary::from_transactions(&balances, &[], dec!(0.01));
        assert_eq!(summary.max_transactions, 0);
        assert_eq!(summary.residuals.len(), 1);
    }
}
