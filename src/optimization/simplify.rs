use crate::config::SimplifierConfig;
use crate::core::balance::PersonBalance;
use crate::core::participant::ParticipantId;
use crate::core::transaction::SimplifiedTransaction;
use crate::optimization::validation::{validate_balances, ValidationError};
use log::{debug, trace};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Name used by [`suggested_settlements`] when a participant has no known name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Working copy of one side of the matching.
struct Account<'a> {
    source: &'a PersonBalance,
    remaining: Decimal,
}

/// The debt simplification engine.
///
/// Turns a snapshot of net balances into a list of directed payments that
/// settles every account, using greedy largest-first matching.
///
/// # Algorithm
///
/// 1. Partition into creditors (balance > ε) and debtors (balance < −ε).
///    Everything in between is settled and ignored.
/// 2. Sort creditors descending and debtors ascending (largest debt first),
///    keeping input order among equal balances.
/// 3. Sweep both lists with two cursors. Each step pays
///    `min(debt, credit)` from the current debtor to the current creditor
///    and advances whichever side is now within ε of zero. No account is
///    left more than ε away from its target.
/// 4. Stop when either list is exhausted.
///
/// Greedy matching is a deterministic approximation: it never emits more
/// than `creditors + debtors - 1` payments, but it does not always find the
/// true minimum, which is NP-hard in general.
///
/// If the balances do not sum to zero, whatever cannot be matched is left
/// unsettled without any signal. Use [`DebtSimplifier::simplify_checked`]
/// to reject such input up front.
///
/// # Examples
///
/// ```
/// use debt_simplifier::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let plan = simplify(&[
///     PersonBalance::new("a", "Alice", dec!(40)),
///     PersonBalance::new("b", "Bob", dec!(10)),
///     PersonBalance::new("c", "Carol", dec!(-50)),
/// ]);
///
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan[0].amount, dec!(40));
/// assert_eq!(plan[1].amount, dec!(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebtSimplifier {
    config: SimplifierConfig,
}

impl DebtSimplifier {
    pub fn new(config: SimplifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Compute the settlement plan. Total over any input, never fails.
    pub fn simplify(&self, balances: &[PersonBalance]) -> Vec<SimplifiedTransaction> {
        let epsilon = self.config.epsilon;

        let mut creditors: Vec<Account> = balances
            .iter()
            .filter(|b| b.is_creditor(epsilon))
            .map(|b| Account {
                source: b,
                remaining: b.balance,
            })
            .collect();
        let mut debtors: Vec<Account> = balances
            .iter()
            .filter(|b| b.is_debtor(epsilon))
            .map(|b| Account {
                source: b,
                remaining: b.balance,
            })
            .collect();

        // Stable sorts: equal balances keep input order.
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debtors.sort_by(|a, b| a.remaining.cmp(&b.remaining));
        for debtor in &mut debtors {
            debtor.remaining = debtor.remaining.abs();
        }

        debug!(
            "simplifying {} balances: {} creditors, {} debtors",
            balances.len(),
            creditors.len(),
            debtors.len()
        );

        let mut transactions = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < debtors.len() && j < creditors.len() {
            // Both sides are above ε here, so every step pays something.
            let amount = debtors[i].remaining.min(creditors[j].remaining);
            let rounded = self.config.round(amount);
            let debtor = debtors[i].source;
            let creditor = creditors[j].source;
            if rounded > Decimal::ZERO {
                trace!("{} pays {} {}", debtor.user_id, creditor.user_id, rounded);
                transactions.push(SimplifiedTransaction {
                    from: debtor.user_id.clone(),
                    from_name: debtor.name.clone(),
                    to: creditor.user_id.clone(),
                    to_name: creditor.name.clone(),
                    amount: rounded,
                });
            } else {
                trace!("skipping {} that rounds to zero", amount);
            }

            debtors[i].remaining -= amount;
            creditors[j].remaining -= amount;

            // Remainders inside the settled band [0, ε] are left behind.
            if debtors[i].remaining <= epsilon {
                i += 1;
            }
            if creditors[j].remaining <= epsilon {
                j += 1;
            }
        }

        let unsettled = debtors[i..]
            .iter()
            .chain(creditors[j..].iter())
            .filter(|a| a.remaining > epsilon)
            .count();
        if unsettled > 0 {
            debug!(
                "{} accounts left unsettled; input balances do not sum to zero",
                unsettled
            );
        }

        transactions
    }

    /// Validate the snapshot before simplifying it.
    ///
    /// Rejects input whose balances do not sum to zero within ε and input
    /// with duplicate participant ids.
    pub fn simplify_checked(
        &self,
        balances: &[PersonBalance],
    ) -> Result<Vec<SimplifiedTransaction>, ValidationError> {
        validate_balances(balances, self.config.epsilon)?;
        Ok(self.simplify(balances))
    }
}

/// Simplify with the default configuration (ε = 0.01, cents, round-half-up).
pub fn simplify(balances: &[PersonBalance]) -> Vec<SimplifiedTransaction> {
    DebtSimplifier::default().simplify(balances)
}

/// Suggest settlements across a user's friends.
///
/// `friend_balances` supplies each friend's balance in the order the plan
/// should consider them; names missing from `friend_names` are shown as
/// [`UNKNOWN_NAME`].
pub fn suggested_settlements<I>(
    friend_balances: I,
    friend_names: &HashMap<ParticipantId, String>,
) -> Vec<SimplifiedTransaction>
where
    I: IntoIterator<Item = (ParticipantId, Decimal)>,
{
    let balances: Vec<PersonBalance> = friend_balances
        .into_iter()
        .map(|(user_id, balance)| {
            let name = friend_names
                .get(&user_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_NAME.to_string());
            PersonBalance {
                user_id,
                name,
                balance,
            }
        })
        .collect();

    simplify(&balances)
}
