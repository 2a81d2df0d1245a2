//! Solve benchmarks for the roster optimization engine.
//!
//! Measures the full pipeline (validation, variable build, rule
//! application, CBC solve, read-back) on representative month sizes.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::Weekday;
use std::collections::BTreeSet;

use roster_engine::config::EngineConfig;
use roster_engine::models::{
    AssignmentRule, DemandRule, Frequency, Hospital, RosterInput, ShiftKind, Worker,
};
use roster_engine::solve;

/// A month with `worker_count` workers covering nightly duty at two
/// hospitals plus weekday day duty at one.
fn build_input(worker_count: usize) -> RosterInput {
    let all_week = vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    let weekdays_only = vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    let hospitals = vec![
        Hospital {
            name: "Central".to_string(),
            is_remote: false,
            is_university: true,
            demand_rules: vec![
                DemandRule {
                    shift: ShiftKind::Night,
                    weekdays: all_week.clone(),
                    frequency: Frequency::Weekly,
                    dates: vec![],
                },
                DemandRule {
                    shift: ShiftKind::Day,
                    weekdays: weekdays_only.clone(),
                    frequency: Frequency::Weekly,
                    dates: vec![],
                },
            ],
        },
        Hospital {
            name: "North".to_string(),
            is_remote: true,
            is_university: false,
            demand_rules: vec![DemandRule {
                shift: ShiftKind::Night,
                weekdays: all_week.clone(),
                frequency: Frequency::Weekly,
                dates: vec![],
            }],
        },
    ];

    let workers = (0..worker_count)
        .map(|i| Worker {
            name: format!("worker_{i:02}"),
            is_specialist: i % 3 == 0,
            assignments: vec![
                AssignmentRule {
                    hospital: "Central".to_string(),
                    weekdays: all_week.clone(),
                    shift: ShiftKind::Night,
                },
                AssignmentRule {
                    hospital: "Central".to_string(),
                    weekdays: weekdays_only.clone(),
                    shift: ShiftKind::Day,
                },
                AssignmentRule {
                    hospital: "North".to_string(),
                    weekdays: all_week.clone(),
                    shift: ShiftKind::Night,
                },
            ],
        })
        .collect();

    RosterInput {
        year: 2025,
        month: 10,
        hospitals,
        workers,
        specified_days: vec![],
        preferences: Some(vec![]),
        caps: Some(vec![]),
        holidays: BTreeSet::from([chrono::NaiveDate::from_ymd_opt(2025, 10, 13).unwrap()]),
    }
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_month");
    group.sample_size(10);
    for worker_count in [6, 10] {
        let input = build_input(worker_count);
        let config = EngineConfig::default();
        group.bench_with_input(
            BenchmarkId::from_parameter(worker_count),
            &input,
            |b, input| {
                b.iter(|| solve(black_box(input), black_box(&config)).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
