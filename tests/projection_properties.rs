mod common;

use common::{bills, init_logging, reference_dates, schedule, schedule_sets, ymd};
use payperiod_model::{
    allocate, count_bill_occurrences, generate_period_history, generate_periods, project,
    Bill, Frequency, Period, PeriodIncome, ProjectionOptions, SemimonthlyDays,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;
use uuid::Uuid;

const COUNT: usize = 12;

#[test]
fn periods_are_contiguous_and_increasing() {
    init_logging();
    for schedules in schedule_sets() {
        for reference in reference_dates() {
            let periods = generate_periods(&schedules, COUNT, reference);

            assert_eq!(periods.len(), COUNT);
            assert!(periods[0].contains(reference), "first period misses {}", reference);
            for p in periods.iter() {
                assert!(p.start() < p.end());
                assert_eq!(p.payday(), p.end());
            }
            for pair in periods.windows(2) {
                assert_eq!(pair[0].end(), pair[1].start());
                assert!(pair[0].start() < pair[1].start());
            }
        }
    }
}

#[test]
fn paydays_carry_every_matching_income() {
    for schedules in schedule_sets() {
        for reference in reference_dates() {
            for p in generate_periods(&schedules, COUNT, reference) {
                let expected: Vec<Uuid> = schedules
                    .iter()
                    .filter(|s| s.occurs_on(p.payday()))
                    .map(|s| s.id())
                    .collect();
                let actual: Vec<Uuid> = p.incomes().iter().map(|i| i.source).collect();

                assert!(!actual.is_empty());
                assert_eq!(actual, expected);
            }
        }
    }
}

#[test]
fn history_joins_forward_grid() {
    for schedules in schedule_sets() {
        for reference in reference_dates() {
            let history = generate_period_history(&schedules, 6, reference);
            let forward = generate_periods(&schedules, 1, reference);

            assert_eq!(history.len(), 6);
            assert_eq!(history[5].end(), forward[0].start());
            for pair in history.windows(2) {
                assert_eq!(pair[0].end(), pair[1].start());
                assert!(pair[0].start() < pair[0].end());
            }
        }
    }
}

#[test]
fn bill_occurrences_respect_anchor_and_end_date() {
    for schedules in schedule_sets() {
        for reference in reference_dates() {
            for p in generate_periods(&schedules, COUNT, reference) {
                for bill in bills() {
                    let dates = bill.occurrences_between(p.start(), p.end());
                    assert_eq!(
                        dates.len() as u32,
                        count_bill_occurrences(&bill, p.start(), p.end())
                    );

                    for date in dates {
                        assert!(date >= bill.anchor_due_date());
                        assert!(p.contains(date));
                        if let Some(end) = bill.end_date() {
                            assert!(date <= end);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn end_date_ceiling_holds_for_any_window() {
    let loan = bills().into_iter().find(|b| b.name() == "Loan").unwrap();
    assert_eq!(count_bill_occurrences(&loan, ymd(2025, 6, 16), ymd(2030, 1, 1)), 0);
    assert_eq!(count_bill_occurrences(&loan, ymd(2020, 1, 1), ymd(2030, 1, 1)), 11);
}

#[test]
fn carry_over_is_conserved() {
    for schedules in schedule_sets() {
        for reference in reference_dates() {
            let periods = generate_periods(&schedules, COUNT, reference);
            let breakdowns = allocate(&bills(), &periods, true);

            assert_eq!(breakdowns[0].carry_in, Decimal::ZERO);
            for b in breakdowns.iter() {
                assert_eq!(b.leftover, b.income_total + b.carry_in - b.bills_total);
                assert_eq!(b.carry_out, b.leftover);
            }
            for pair in breakdowns.windows(2) {
                assert_eq!(pair[1].carry_in, pair[0].leftover);
            }
        }
    }
}

#[test]
fn carry_over_disabled_isolates_periods() {
    for schedules in schedule_sets() {
        for reference in reference_dates() {
            let periods = generate_periods(&schedules, COUNT, reference);
            for b in allocate(&bills(), &periods, false) {
                assert_eq!(b.carry_in, Decimal::ZERO);
                assert_eq!(b.leftover, b.income_total - b.bills_total);
            }
        }
    }
}

#[test]
fn projection_is_idempotent() {
    for schedules in schedule_sets() {
        for reference in reference_dates() {
            let options = ProjectionOptions {
                period_count: COUNT,
                history_count: 4,
                carry_over_enabled: true,
            };
            let first = project(&schedules, &bills(), reference, &options).unwrap();
            let second = project(&schedules, &bills(), reference, &options).unwrap();

            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }
}

#[test]
fn biweekly_grid_opens_on_previous_payday() {
    let pay = schedule(Frequency::Biweekly, ymd(2025, 1, 2), dec!(1000));
    let periods = generate_periods(&[pay], 3, ymd(2025, 1, 10));
    let bounds: Vec<_> = periods.iter().map(|p| (p.start(), p.end())).collect();

    assert_eq!(
        bounds,
        vec![
            (ymd(2025, 1, 2), ymd(2025, 1, 16)),
            (ymd(2025, 1, 16), ymd(2025, 1, 30)),
            (ymd(2025, 1, 30), ymd(2025, 2, 13)),
        ]
    );
}

#[test]
fn monthly_bill_on_31st_falls_on_28th() {
    let bill = Bill::new(
        "Insurance",
        dec!(90),
        "Insurance",
        Frequency::Monthly,
        ymd(2025, 1, 31),
        None,
    )
    .unwrap();
    assert_eq!(count_bill_occurrences(&bill, ymd(2025, 2, 1), ymd(2025, 3, 1)), 1);
    assert_eq!(
        bill.occurrences_between(ymd(2025, 2, 1), ymd(2025, 3, 1)),
        vec![ymd(2025, 2, 28)]
    );
}

#[test]
fn semimonthly_grid_has_two_paydays_a_month() {
    let pay = schedule(
        Frequency::Semimonthly(Some(SemimonthlyDays::new(1, 15))),
        ymd(2025, 1, 1),
        dec!(2000),
    );
    let periods = generate_periods(&[pay], 6, ymd(2025, 3, 1));
    let march: BTreeSet<_> = periods
        .iter()
        .flat_map(|p| vec![p.start(), p.end()])
        .filter(|d| *d >= ymd(2025, 3, 1) && *d < ymd(2025, 4, 1))
        .collect();

    let expected: BTreeSet<_> = [ymd(2025, 3, 1), ymd(2025, 3, 15)].iter().copied().collect();
    assert_eq!(march, expected);
    assert_eq!(periods[0].start(), ymd(2025, 3, 1));
}

#[test]
fn monthly_bill_stops_after_end_date() {
    let bill = Bill::new(
        "Lease",
        dec!(400),
        "Transport",
        Frequency::Monthly,
        ymd(2025, 1, 10),
        Some(ymd(2025, 6, 15)),
    )
    .unwrap();
    assert_eq!(count_bill_occurrences(&bill, ymd(2025, 6, 1), ymd(2025, 7, 1)), 1);
    assert_eq!(count_bill_occurrences(&bill, ymd(2025, 7, 1), ymd(2025, 8, 1)), 0);
}

#[test]
fn carried_debt_is_absorbed() {
    let periods = vec![
        Period::new(
            ymd(2025, 1, 1),
            ymd(2025, 1, 15),
            vec![PeriodIncome {
                source: Uuid::nil(),
                amount: dec!(1000),
            }],
        ),
        Period::new(
            ymd(2025, 1, 15),
            ymd(2025, 1, 29),
            vec![PeriodIncome {
                source: Uuid::nil(),
                amount: dec!(1000),
            }],
        ),
    ];
    let bills = vec![
        Bill::new("Car", dec!(1200), "Transport", Frequency::Once, ymd(2025, 1, 3), None).unwrap(),
        Bill::new("Power", dec!(800), "Utilities", Frequency::Once, ymd(2025, 1, 22), None)
            .unwrap(),
    ];

    let carried: Vec<_> = allocate(&bills, &periods, true)
        .iter()
        .map(|b| b.leftover)
        .collect();
    let isolated: Vec<_> = allocate(&bills, &periods, false)
        .iter()
        .map(|b| b.leftover)
        .collect();

    assert_eq!(carried, vec![dec!(-200), dec!(0)]);
    assert_eq!(isolated, vec![dec!(-200), dec!(200)]);
}
