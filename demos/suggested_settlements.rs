//! Settle a group from a bare balance map, as a UI would after totting up
//! a list of expenses.

use debt_simplifier::core::participant::ParticipantId;
use debt_simplifier::optimization::simplify::suggested_settlements;
use debt_simplifier::optimization::summary::debt_summary;
use rust_decimal_macros::dec;
use std::collections::HashMap;

fn main() {
    let balances = vec![
        (ParticipantId::new("alice"), dec!(75.20)),
        (ParticipantId::new("bob"), dec!(-20.00)),
        (ParticipantId::new("carol"), dec!(-45.70)),
        (ParticipantId::new("dave"), dec!(-9.50)),
        (ParticipantId::new("erin"), dec!(0.004)),
    ];

    // No display name for dave, so the plan names them "Unknown".
    let names: HashMap<ParticipantId, String> = [
        ("alice", "Alice"),
        ("bob", "Bob"),
        ("carol", "Carol"),
        ("erin", "Erin"),
    ]
    .into_iter()
    .map(|(id, name)| (ParticipantId::new(id), name.to_string()))
    .collect();

    let plan = suggested_settlements(balances, &names);

    println!("Suggested settlements:");
    for line in debt_summary(&plan) {
        println!("  {}", line);
    }

    println!("\nAs JSON:");
    match serde_json::to_string_pretty(&plan) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to serialize plan: {}", e),
    }
}
