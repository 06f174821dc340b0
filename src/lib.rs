mod allocation;
mod bill;
pub mod calendar;
mod frequency;
mod options;
mod period;
mod projection;
mod recurrence;
mod schedule;

use chrono::NaiveDate;

pub use allocation::{allocate, AllocatedBillLine, PeriodBreakdown};
pub use bill::{Bill, BillError};
pub use frequency::{Frequency, SemimonthlyDays};
pub use options::{OptionsError, ProjectionOptions, MAX_PERIODS};
pub use period::{Period, PeriodIncome};
pub use projection::{project, Projection};
pub use recurrence::Recurrence;
pub use schedule::{RecurrenceSchedule, ScheduleError};

/// Generate `count` contiguous pay periods, the first of which contains `reference`
pub fn generate_periods(
    schedules: &[RecurrenceSchedule],
    count: usize,
    reference: NaiveDate,
) -> Vec<Period> {
    period::build_periods(schedules, count, reference)
}

/// Generate the `count` pay periods that precede the period containing `reference`
pub fn generate_period_history(
    schedules: &[RecurrenceSchedule],
    count: usize,
    reference: NaiveDate,
) -> Vec<Period> {
    period::build_history(schedules, count, reference)
}

/// Count how many times `bill` falls due inside `[start, end)`
pub fn count_bill_occurrences(bill: &Bill, start: NaiveDate, end: NaiveDate) -> u32 {
    crate::bill::count_occurrences(bill, start, end)
}
