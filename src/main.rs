//! debt-simplifier CLI
//!
//! Compute settlement plans from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle a balance snapshot
//! debt-simplifier settle --input balances.json
//!
//! # Reject snapshots that do not sum to zero, output as JSON
//! debt-simplifier settle --input balances.json --strict --format json
//!
//! # Aggregate a group's expenses and settlements, then settle
//! debt-simplifier ledger --input group.json
//!
//! # Generate a random balanced group for testing
//! debt-simplifier generate --participants 12
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use debt_simplifier::config::SimplifierConfig;
use debt_simplifier::core::balance::PersonBalance;
use debt_simplifier::core::expense::{Expense, Settlement, Split};
use debt_simplifier::core::ledger::GroupLedger;
use debt_simplifier::core::participant::ParticipantId;
use debt_simplifier::core::transaction::SimplifiedTransaction;
use debt_simplifier::optimization::simplify::DebtSimplifier;
use debt_simplifier::optimization::summary::{debt_summary_with, PlanSummary};
use debt_simplifier::optimization::validation::validate_balances;
use debt_simplifier::simulation::generator::{generate_random_balances, GroupConfig};
use log::info;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"debt-simplifier: settle group debts with as few payments as possible

USAGE:
    debt-simplifier <COMMAND> [OPTIONS]

COMMANDS:
    settle      Compute a settlement plan from a balance snapshot
    ledger      Aggregate expenses and settlements, then compute a plan
    generate    Generate a random balanced group (for testing)
    help        Show this message

OPTIONS (settle, ledger):
    --input <FILE>      Path to JSON input file
    --format <FORMAT>   Output format: text (default) or json
    --config <FILE>     JSON file overriding epsilon, decimal_places,
                        rounding (half_up | half_even) and currency_symbol
    --strict            (settle only) reject snapshots that do not sum to
                        zero or repeat a participant id

OPTIONS (generate):
    --participants <N>  Number of participants (default: 10)
    --max-amount <N>    Largest absolute balance (default: 1000)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    debt-simplifier settle --input balances.json
    debt-simplifier settle --input balances.json --strict --format json
    debt-simplifier ledger --input group.json --config cents.json
    debt-simplifier generate --participants 20 --output group.json"#
    );
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// An amount given either as a JSON string or a JSON number.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Text(String),
    Number(serde_json::Number),
}

impl AmountInput {
    fn parse(&self) -> Decimal {
        let raw = match self {
            AmountInput::Text(s) => s.clone(),
            AmountInput::Number(n) => n.to_string(),
        };
        raw.trim()
            .parse()
            .unwrap_or_else(|e| fail(format!("invalid amount '{}': {}", raw, e)))
    }
}

/// JSON schema for `settle` input.
#[derive(serde::Deserialize)]
struct BalancesFile {
    balances: Vec<BalanceInput>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceInput {
    user_id: String,
    #[serde(default)]
    name: Option<String>,
    balance: AmountInput,
}

/// JSON schema for `ledger` input.
#[derive(serde::Deserialize)]
struct LedgerFile {
    members: Vec<MemberInput>,
    #[serde(default)]
    expenses: Vec<ExpenseInput>,
    #[serde(default)]
    settlements: Vec<SettlementInput>,
}

#[derive(serde::Deserialize)]
struct MemberInput {
    id: String,
    name: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseInput {
    description: String,
    amount: AmountInput,
    paid_by: String,
    #[serde(default)]
    category: Option<String>,
    /// Explicit shares; takes precedence over `split_among`.
    #[serde(default)]
    splits: Vec<SplitInput>,
    /// Members sharing the expense equally.
    #[serde(default)]
    split_among: Vec<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SplitInput {
    user_id: String,
    amount: AmountInput,
}

#[derive(serde::Deserialize)]
struct SettlementInput {
    from: String,
    to: String,
    amount: AmountInput,
}

/// JSON output schema for a settlement plan.
#[derive(serde::Serialize)]
struct PlanOutput<'a> {
    transactions: &'a [SimplifiedTransaction],
    summary: Vec<String>,
    stats: &'a PlanSummary,
}

struct CommonArgs {
    input_path: String,
    format: String,
    config: SimplifierConfig,
    strict: bool,
}

fn parse_common_args(args: &[String], allow_strict: bool) -> CommonArgs {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut config = SimplifierConfig::default();
    let mut strict = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(
                    args.get(i)
                        .cloned()
                        .unwrap_or_else(|| fail("--input requires a file path")),
                );
            }
            "--format" => {
                i += 1;
                format = args
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| fail("--format requires 'text' or 'json'"));
                if format != "text" && format != "json" {
                    fail(format!("unknown format '{}'", format));
                }
            }
            "--config" => {
                i += 1;
                let path = args
                    .get(i)
                    .unwrap_or_else(|| fail("--config requires a file path"));
                config = SimplifierConfig::from_json_file(path)
                    .unwrap_or_else(|e| fail(format!("config '{}': {}", path, e)));
            }
            "--strict" if allow_strict => strict = true,
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    CommonArgs {
        input_path: input_path.unwrap_or_else(|| fail("--input <FILE> is required")),
        format,
        config,
        strict,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));
    serde_json::from_str(&content).unwrap_or_else(|e| fail(format!("parsing JSON: {}", e)))
}

fn print_plan(
    balances: &[PersonBalance],
    plan: &[SimplifiedTransaction],
    config: &SimplifierConfig,
    format: &str,
) {
    let stats = PlanSummary::from_transactions(balances, plan, config.epsilon);
    let summary = debt_summary_with(plan, config);

    if format == "json" {
        let output = PlanOutput {
            transactions: plan,
            summary,
            stats: &stats,
        };
        let json = serde_json::to_string_pretty(&output)
            .unwrap_or_else(|e| fail(format!("serializing output: {}", e)));
        println!("{}", json);
    } else {
        if summary.is_empty() {
            println!("All settled up.");
        }
        for line in &summary {
            println!("{}", line);
        }
        println!();
        println!("{}", stats);
    }
}

fn cmd_settle(args: &[String]) {
    let args = parse_common_args(args, true);
    let file: BalancesFile = read_json(&args.input_path);

    let balances: Vec<PersonBalance> = file
        .balances
        .into_iter()
        .map(|b| {
            let name = b.name.unwrap_or_else(|| b.user_id.clone());
            PersonBalance::new(b.user_id, name, b.balance.parse())
        })
        .collect();
    info!("loaded {} balances from {}", balances.len(), args.input_path);

    if args.strict {
        if let Err(e) = validate_balances(&balances, args.config.epsilon) {
            fail(e);
        }
    }

    let simplifier = DebtSimplifier::new(args.config);
    let plan = simplifier.simplify(&balances);
    print_plan(&balances, &plan, simplifier.config(), &args.format);
}

fn build_ledger(file: LedgerFile, config: &SimplifierConfig) -> GroupLedger {
    let mut ledger = GroupLedger::new();
    for m in file.members {
        ledger.add_member(m.id, m.name).unwrap_or_else(|e| fail(e));
    }

    for e in file.expenses {
        let amount = e.amount.parse();
        let expense = if !e.splits.is_empty() {
            let splits = e
                .splits
                .iter()
                .map(|s| Split::new(s.user_id.as_str(), s.amount.parse()))
                .collect();
            Expense::new(e.description.as_str(), amount, e.paid_by.as_str(), splits)
        } else {
            let among: Vec<ParticipantId> = if e.split_among.is_empty() {
                ledger.members().iter().map(|m| m.id.clone()).collect()
            } else {
                e.split_among.iter().map(|s| ParticipantId::new(s.as_str())).collect()
            };
            Expense::split_equally(
                e.description.as_str(),
                amount,
                e.paid_by.as_str(),
                &among,
                config.decimal_places,
            )
        };
        let mut expense =
            expense.unwrap_or_else(|err| fail(format!("expense '{}': {}", e.description, err)));
        if let Some(category) = e.category {
            expense = expense.with_category(category);
        }
        ledger.add_expense(expense).unwrap_or_else(|err| fail(err));
    }

    for s in file.settlements {
        let settlement = Settlement::new(s.from.as_str(), s.to.as_str(), s.amount.parse())
            .unwrap_or_else(|err| fail(err));
        ledger.record_settlement(settlement).unwrap_or_else(|err| fail(err));
    }

    ledger
}

fn cmd_ledger(args: &[String]) {
    let args = parse_common_args(args, false);
    let file: LedgerFile = read_json(&args.input_path);
    let ledger = build_ledger(file, &args.config);
    info!(
        "ledger has {} members, {} expenses, {} settlements",
        ledger.members().len(),
        ledger.expenses().len(),
        ledger.settlements().len()
    );

    let balances = ledger.balances();
    let simplifier = DebtSimplifier::new(args.config);
    let plan = ledger.settlement_plan(&simplifier);
    print_plan(&balances, &plan, simplifier.config(), &args.format);
}

fn cmd_generate(args: &[String]) {
    let mut config = GroupConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                config.participant_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| fail("--participants requires a number"));
            }
            "--max-amount" => {
                i += 1;
                config.max_amount = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| fail("--max-amount requires a number"));
            }
            "--output" => {
                i += 1;
                output_path = Some(
                    args.get(i)
                        .cloned()
                        .unwrap_or_else(|| fail("--output requires a file path")),
                );
            }
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        balances: Vec<PersonBalance>,
    }

    let output = OutputFile {
        balances: generate_random_balances(&config).unwrap_or_else(|e| fail(e)),
    };
    let json = serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| fail(format!("serializing output: {}", e)));

    if let Some(path) = output_path {
        fs::write(&path, &json)
            .unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} balances → {}",
            output.balances.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "ledger" => cmd_ledger(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
