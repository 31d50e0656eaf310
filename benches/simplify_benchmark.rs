use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use debt_simplifier::core::expense::Expense;
use debt_simplifier::core::ledger::GroupLedger;
use debt_simplifier::core::participant::ParticipantId;
use debt_simplifier::optimization::simplify::{simplify, DebtSimplifier};
use debt_simplifier::simulation::generator::{generate_random_balances, GroupConfig};
use rust_decimal::Decimal;

fn bench_simplify_group_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify");
    for size in [10usize, 100, 1_000] {
        let config = GroupConfig {
            participant_count: size,
            ..Default::default()
        };
        let balances = generate_random_balances(&config).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &balances, |b, balances| {
            b.iter(|| simplify(black_box(balances)))
        });
    }
    group.finish();
}

fn bench_ledger_plan_20_members(c: &mut Criterion) {
    let members: Vec<ParticipantId> = (0..20)
        .map(|i| ParticipantId::new(format!("user-{:02}", i)))
        .collect();
    let mut ledger = GroupLedger::new();
    for m in &members {
        ledger.add_member(m.clone(), m.to_string()).unwrap();
    }
    for i in 0..200i64 {
        let payer = members[(i as usize * 7) % members.len()].clone();
        let amount = Decimal::new(1_000 + i * 137, 2);
        ledger
            .add_expense(Expense::split_equally("expense", amount, payer, &members, 2).unwrap())
            .unwrap();
    }
    let simplifier = DebtSimplifier::default();

    c.bench_function("ledger_plan_20_members_200_expenses", |b| {
        b.iter(|| black_box(&ledger).settlement_plan(&simplifier))
    });
}

criterion_group!(benches, bench_simplify_group_sizes, bench_ledger_plan_20_members);
criterion_main!(benches);
