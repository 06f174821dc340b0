use crate::{
    allocation::{allocate, PeriodBreakdown},
    bill::Bill,
    options::{OptionsError, ProjectionOptions},
    period::{build_history, build_periods},
    schedule::RecurrenceSchedule,
};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Allocated periods around a reference date, oldest first
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    reference: NaiveDate,
    breakdowns: Vec<PeriodBreakdown>,
}

/// Build the history and forward grids for `reference` and allocate `bills` across
/// both in one pass, so that carry-over accumulated in past periods reaches the
/// current one.
pub fn project(
    schedules: &[RecurrenceSchedule],
    bills: &[Bill],
    reference: NaiveDate,
    options: &ProjectionOptions,
) -> Result<Projection, OptionsError> {
    options.validate()?;

    let mut periods = build_history(schedules, options.history_count, reference);
    periods.extend(build_periods(schedules, options.period_count, reference));

    debug!(
        "projecting {} bills over {} periods from {}",
        bills.len(),
        periods.len(),
        reference
    );

    Ok(Projection {
        reference,
        breakdowns: allocate(bills, &periods, options.carry_over_enabled),
    })
}

impl Projection {
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn breakdowns(&self) -> &[PeriodBreakdown] {
        &self.breakdowns
    }

    /// The breakdown for the period containing the reference date
    pub fn current(&self) -> Option<&PeriodBreakdown> {
        self.breakdowns
            .iter()
            .find(|b| b.period.contains(self.reference))
    }

    /// Leftover of the final period, or zero for an empty projection
    pub fn ending_balance(&self) -> Decimal {
        self.breakdowns
            .last()
            .map(|b| b.leftover)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_income(&self) -> Decimal {
        self.breakdowns.iter().map(|b| b.income_total).sum()
    }

    pub fn total_bills(&self) -> Decimal {
        self.breakdowns.iter().map(|b| b.bills_total).sum()
    }
}
