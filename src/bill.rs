use crate::{calendar::day_after, frequency::Frequency, recurrence::Recurrence};
use chrono::NaiveDate;
use log::{trace, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recurring (or one-off) expense that is allocated into pay periods
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    name: String,
    amount: Decimal,
    category: String,
    recurrence: Frequency,
    anchor_due_date: NaiveDate,
    end_date: Option<NaiveDate>,
    active: Option<bool>,
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum BillError {
    #[error("bill amount {0} is negative")]
    NegativeAmount(Decimal),
    #[error("the end date '{1}' occurs before the first due date '{0}'")]
    EndBeforeAnchor(NaiveDate, NaiveDate), // anchor, end
}

impl Bill {
    pub fn new<S: Into<String>, C: Into<String>>(
        name: S,
        amount: Decimal,
        category: C,
        recurrence: Frequency,
        anchor_due_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, BillError> {
        if amount < Decimal::ZERO {
            return Err(BillError::NegativeAmount(amount));
        }

        if let Some(end) = end_date {
            if end < anchor_due_date {
                return Err(BillError::EndBeforeAnchor(anchor_due_date, end));
            }
        }

        Ok(Bill {
            name: name.into(),
            amount,
            category: category.into(),
            recurrence,
            anchor_due_date,
            end_date,
            active: None,
        })
    }

    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.active = Some(active);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn recurrence(&self) -> Frequency {
        self.recurrence
    }

    pub fn anchor_due_date(&self) -> NaiveDate {
        self.anchor_due_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Bills without an explicit flag are active
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    /// Returns the due dates of this bill inside `[window_start, window_end)`.
    ///
    /// The window is narrowed so that nothing before the first due date, or after the
    /// end date, is ever returned.
    pub fn occurrences_between(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Vec<NaiveDate> {
        if window_end <= window_start {
            warn!(
                "bill '{}': ignoring invalid window {} - {}",
                self.name, window_start, window_end
            );
            return Vec::new();
        }

        let lower = window_start.max(self.anchor_due_date);
        let upper = match self.end_date {
            // An end date on the last representable day imposes no ceiling
            Some(end) => day_after(end).map_or(window_end, |next| window_end.min(next)),
            None => window_end,
        };

        let dates = Recurrence::new(self.recurrence, self.anchor_due_date)
            .occurrences_between(lower, upper);

        trace!(
            "bill '{}' ({}) due in {} - {}: {:?}",
            self.name,
            self.recurrence,
            lower,
            upper,
            dates
        );

        dates
    }
}

/// Count how many times `bill` falls due inside `[window_start, window_end)`.
///
/// Returns 0 for an empty or inverted window.
pub fn count_occurrences(bill: &Bill, window_start: NaiveDate, window_end: NaiveDate) -> u32 {
    bill.occurrences_between(window_start, window_end).len() as u32
}
