use crate::{frequency::Frequency, recurrence::Recurrence};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A source of income that pays a fixed amount on a recurring schedule.
///
/// Schedules drive the period grid: their paydays become period boundaries, and the
/// amount is attached to every period ending on one of those paydays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceSchedule {
    id: Uuid,
    frequency: Frequency,
    anchor_date: NaiveDate,
    source_amount: Decimal,
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    #[error("income amount {0} is negative")]
    NegativeAmount(Decimal),
}

impl RecurrenceSchedule {
    pub fn new(
        id: Uuid,
        frequency: Frequency,
        anchor_date: NaiveDate,
        source_amount: Decimal,
    ) -> Result<Self, ScheduleError> {
        if source_amount < Decimal::ZERO {
            return Err(ScheduleError::NegativeAmount(source_amount));
        }

        Ok(RecurrenceSchedule {
            id,
            frequency,
            anchor_date,
            source_amount,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    pub fn source_amount(&self) -> Decimal {
        self.source_amount
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency.is_recurring()
    }

    pub fn recurrence(&self) -> Recurrence {
        Recurrence::new(self.frequency, self.anchor_date)
    }

    pub fn next_occurrences(&self, after_or_at: NaiveDate, count: usize) -> Vec<NaiveDate> {
        self.recurrence().next_occurrences(after_or_at, count)
    }

    pub fn previous_occurrence(&self, at_or_before: NaiveDate) -> Option<NaiveDate> {
        self.recurrence().previous_occurrence(at_or_before)
    }

    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.recurrence().occurs_on(date)
    }
}
