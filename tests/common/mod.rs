#![allow(dead_code)]

use chrono::NaiveDate;
use payperiod_model::{Bill, Frequency, RecurrenceSchedule, SemimonthlyDays};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn schedule(frequency: Frequency, anchor: NaiveDate, amount: Decimal) -> RecurrenceSchedule {
    RecurrenceSchedule::new(Uuid::new_v4(), frequency, anchor, amount).unwrap()
}

/// Schedule sets covering both the single schedule and the merged grid
pub fn schedule_sets() -> Vec<Vec<RecurrenceSchedule>> {
    vec![
        vec![schedule(Frequency::Weekly, ymd(2025, 1, 3), dec!(450))],
        vec![schedule(Frequency::Biweekly, ymd(2025, 1, 2), dec!(1000))],
        vec![schedule(Frequency::Monthly, ymd(2024, 8, 31), dec!(3200))],
        vec![schedule(
            Frequency::Semimonthly(Some(SemimonthlyDays::new(15, 1))),
            ymd(2024, 1, 1),
            dec!(1600),
        )],
        vec![
            schedule(Frequency::Biweekly, ymd(2025, 1, 2), dec!(1000)),
            schedule(Frequency::Once, ymd(2025, 3, 13), dec!(250)),
        ],
        vec![
            schedule(Frequency::Biweekly, ymd(2025, 1, 3), dec!(800)),
            schedule(Frequency::Monthly, ymd(2025, 1, 8), dec!(300)),
        ],
        vec![
            schedule(Frequency::Weekly, ymd(2024, 12, 30), dec!(200)),
            schedule(Frequency::Semimonthly(None), ymd(2024, 6, 20), dec!(900)),
            schedule(Frequency::Once, ymd(2025, 2, 2), dec!(75)),
        ],
    ]
}

pub fn bills() -> Vec<Bill> {
    let mut gym = Bill::new(
        "Gym",
        dec!(25),
        "Health",
        Frequency::Weekly,
        ymd(2025, 2, 3),
        Some(ymd(2025, 4, 28)),
    )
    .unwrap();
    gym.set_active(true);

    vec![
        Bill::new("Rent", dec!(1450), "Housing", Frequency::Monthly, ymd(2024, 10, 31), None)
            .unwrap(),
        Bill::new("Groceries", dec!(120.40), "Food", Frequency::Weekly, ymd(2025, 1, 4), None)
            .unwrap(),
        Bill::new("Childcare", dec!(310), "Family", Frequency::Biweekly, ymd(2025, 1, 9), None)
            .unwrap(),
        Bill::new(
            "Loan",
            dec!(275.10),
            "Debt",
            Frequency::Semimonthly(None),
            ymd(2025, 1, 12),
            Some(ymd(2025, 6, 15)),
        )
        .unwrap(),
        Bill::new("Rego", dec!(820), "Transport", Frequency::Once, ymd(2025, 3, 1), None)
            .unwrap(),
        gym,
    ]
}

/// Reference dates spread over month ends, leap days and year boundaries
pub fn reference_dates() -> Vec<NaiveDate> {
    vec![
        ymd(2024, 2, 29),
        ymd(2024, 12, 31),
        ymd(2025, 1, 1),
        ymd(2025, 1, 10),
        ymd(2025, 1, 16),
        ymd(2025, 2, 28),
        ymd(2025, 3, 15),
        ymd(2025, 7, 4),
    ]
}
