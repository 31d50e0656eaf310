//! # debt-simplifier
//!
//! Debt simplification engine for group expense splitting.
//!
//! Given the net balance of every participant in a group, this crate
//! computes a short list of payments (debtor → creditor, amount) that
//! settles all debts, using greedy largest-first matching.
//!
//! ## Architecture
//!
//! - **core**: participants, balances, transactions,
//!   expenses and the group ledger that aggregates them into balances
//! - **optimization**: The simplifier, optional input validation, and
//!   summary helpers
//! - **simulation**: Random balanced groups for benchmarks and testing
//! - **config**: numeric policy (epsilon, precision and rounding rule)

pub mod config;
pub mod core;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{RoundingRule, SimplifierConfig};
    pub use crate::core::balance::PersonBalance;
    pub use crate::core::expense::{Expense, Settlement, Split};
    pub use crate::core::ledger::GroupLedger;
    pub use crate::core::participant::ParticipantId;
    pub use crate::core::transaction::SimplifiedTransaction;
    pub use crate::optimization::simplify::{simplify, suggested_settlements, DebtSimplifier};
    pub use crate::optimization::summary::{debt_summary, PlanSummary};
    pub use crate::optimization::validation::{validate_balances, ValidationError};
}
