//! A weekend trip: record shared expenses, derive balances and settle up.

use debt_simplifier::core::expense::{Expense, Split};
use debt_simplifier::core::ledger::GroupLedger;
use debt_simplifier::core::participant::ParticipantId;
use debt_simplifier::optimization::simplify::DebtSimplifier;
use debt_simplifier::optimization::summary::{debt_summary, PlanSummary};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔════════════════════════════════════════╗");
    println!("║  debt-simplifier: Weekend Trip Example ║");
    println!("╚════════════════════════════════════════╝\n");

    let mut ledger = GroupLedger::new();
    ledger.add_member("user-1", "John Doe")?;
    ledger.add_member("user-2", "Jane Smith")?;
    ledger.add_member("user-3", "Mike Johnson")?;
    ledger.add_member("user-4", "Sara Lee")?;

    let everyone: Vec<ParticipantId> = ledger.members().iter().map(|m| m.id.clone()).collect();

    ledger.add_expense(
        Expense::split_equally("Cabin rental", dec!(480), "user-1", &everyone, 2)?
            .with_category("Lodging"),
    )?;
    ledger.add_expense(
        Expense::new(
            "Dinner at Italian Place",
            dec!(85.50),
            "user-2",
            vec![
                Split::new("user-1", dec!(28.50)),
                Split::new("user-2", dec!(28.50)),
                Split::new("user-3", dec!(28.50)),
            ],
        )?
        .with_category("Food"),
    )?;
    ledger.add_expense(Expense::split_equally(
        "Gas",
        dec!(62.35),
        "user-3",
        &everyone,
        2,
    )?)?;
    ledger.add_expense(Expense::split_equally(
        "Groceries",
        dec!(131.10),
        "user-4",
        &everyone[1..],
        2,
    )?)?;

    println!("━━━ Expenses ━━━\n");
    for e in ledger.expenses() {
        println!(
            "  {:<26} {:>8}  paid by {}",
            e.description(),
            e.amount(),
            e.paid_by()
        );
    }
    println!("  {:<26} {:>8}\n", "Total", ledger.total_expenses());

    println!("━━━ Balances ━━━\n");
    for b in ledger.balances() {
        let status = if b.is_creditor(dec!(0.01)) {
            "OWED"
        } else if b.is_debtor(dec!(0.01)) {
            "OWES"
        } else {
            "EVEN"
        };
        println!("  {:<14} {:>9}  [{}]", b.name, b.balance, status);
    }
    println!();

    let simplifier = DebtSimplifier::default();
    let balances = ledger.balances();
    let plan = ledger.settlement_plan(&simplifier);

    println!("━━━ Who Pays Whom ━━━\n");
    for line in debt_summary(&plan) {
        println!("  {}", line);
    }
    println!();
    println!("{}", PlanSummary::from_transactions(&balances, &plan, dec!(0.01)));

    ledger.record_plan(&plan)?;
    println!(
        "After settling up, {} payments remain.",
        ledger.settlement_plan(&simplifier).len()
    );
    Ok(())
}
