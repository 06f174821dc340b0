use crate::{
    calendar::{add_days, clamped_date, shift_month},
    frequency::Frequency,
};
use chrono::{Datelike, Duration, NaiveDate};
use log::trace;

/// A frequency pinned to an anchor date.
///
/// Recurring frequencies extend indefinitely in both directions from the anchor: the
/// anchor fixes the phase (the weekday for strided frequencies, the days of the month
/// for month-based ones) rather than a first occurrence. Callers that need a floor,
/// such as bills, clamp the window themselves. `Once` occurs on the anchor only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recurrence {
    frequency: Frequency,
    anchor: NaiveDate,
}

impl Recurrence {
    pub fn new(frequency: Frequency, anchor: NaiveDate) -> Self {
        Recurrence { frequency, anchor }
    }

    /// Returns up to `count` ascending occurrences on or after `after_or_at`. Fewer are
    /// returned when the sequence runs past the last representable date.
    pub fn next_occurrences(&self, after_or_at: NaiveDate, count: usize) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        if count == 0 {
            return dates;
        }

        match self.frequency {
            Frequency::Once => {
                if self.anchor >= after_or_at {
                    dates.push(self.anchor);
                }
            }
            Frequency::Weekly | Frequency::Biweekly => {
                let stride = self.stride();
                let mut next = self.stride_ceil(after_or_at);

                while let Some(date) = next {
                    dates.push(date);
                    if dates.len() == count {
                        break;
                    }
                    next = date.checked_add_signed(stride);
                }
            }
            Frequency::Monthly | Frequency::Semimonthly(_) => {
                let days = self.frequency.month_days(self.anchor);
                let (mut year, mut month) = (after_or_at.year(), after_or_at.month());

                'months: while dates.len() < count {
                    for day in days.iter() {
                        let date = match clamped_date(year, month, *day) {
                            Some(d) => d,
                            None => break 'months,
                        };
                        if date >= after_or_at {
                            dates.push(date);
                            if dates.len() == count {
                                break 'months;
                            }
                        }
                    }

                    let (y, m) = shift_month(year, month, 1);
                    year = y;
                    month = m;
                }
            }
        }

        trace!(
            "{} anchored {}: next {} from {} = {:?}",
            self.frequency,
            self.anchor,
            count,
            after_or_at,
            dates
        );

        dates
    }

    /// Returns the latest occurrence on or before `at_or_before`
    pub fn previous_occurrence(&self, at_or_before: NaiveDate) -> Option<NaiveDate> {
        match self.frequency {
            Frequency::Once => Some(self.anchor).filter(|a| *a <= at_or_before),
            Frequency::Weekly | Frequency::Biweekly => self.stride_floor(at_or_before),
            Frequency::Monthly | Frequency::Semimonthly(_) => {
                let days = self.frequency.month_days(self.anchor);

                // Every month holds at least one day, so the answer is in this month or
                // the one before.
                for offset in 0..=1 {
                    let (year, month) =
                        shift_month(at_or_before.year(), at_or_before.month(), -offset);
                    for day in days.iter().rev() {
                        match clamped_date(year, month, *day) {
                            Some(date) if date <= at_or_before => return Some(date),
                            _ => {}
                        }
                    }
                }

                None
            }
        }
    }

    /// Tests whether `date` is an occurrence without enumerating the sequence
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match self.frequency {
            Frequency::Once => date == self.anchor,
            Frequency::Weekly | Frequency::Biweekly => {
                (date - self.anchor).num_days().rem_euclid(self.stride().num_days()) == 0
            }
            Frequency::Monthly | Frequency::Semimonthly(_) => self
                .frequency
                .month_days(self.anchor)
                .contains(&date.day()),
        }
    }

    /// Returns every occurrence inside the half-open window `[start, end)`
    pub fn occurrences_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if end <= start {
            return Vec::new();
        }

        match self.frequency {
            Frequency::Once => {
                if self.anchor >= start && self.anchor < end {
                    vec![self.anchor]
                } else {
                    Vec::new()
                }
            }
            Frequency::Weekly | Frequency::Biweekly => {
                match self.stride_ceil(start) {
                    Some(first) => get_dates_for_interval(self.stride(), first, end),
                    None => Vec::new(),
                }
            }
            Frequency::Monthly | Frequency::Semimonthly(_) => {
                let days = self.frequency.month_days(self.anchor);
                let mut dates = Vec::new();

                for (year, month) in get_months_for_interval(start, end) {
                    for day in days.iter() {
                        if let Some(date) = clamped_date(year, month, *day) {
                            if date >= start && date < end {
                                dates.push(date);
                            }
                        }
                    }
                }

                dates
            }
        }
    }

    // Only meaningful for strided frequencies. Anything else strides by a day, which
    // keeps the arithmetic total without affecting callers that match on frequency.
    fn stride(&self) -> Duration {
        Duration::days(self.frequency.stride_days().unwrap_or(1))
    }

    // The latest strided occurrence on or before `date`
    fn stride_floor(&self, date: NaiveDate) -> Option<NaiveDate> {
        let stride = self.stride().num_days();
        let steps = (date - self.anchor).num_days().div_euclid(stride);
        add_days(self.anchor, steps * stride)
    }

    // The earliest strided occurrence on or after `date`
    fn stride_ceil(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.stride_floor(date) {
            Some(floor) if floor < date => floor.checked_add_signed(self.stride()),
            floor => floor,
        }
    }
}

// Get dates at the given interval from `first` until (but excluding) `end`
fn get_dates_for_interval(interval: Duration, first: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut next = first;

    while next < end {
        dates.push(next);
        next = match next.checked_add_signed(interval) {
            Some(d) => d,
            None => break,
        };
    }

    dates
}

// Get every (year, month) pair touched by the window `[start, end)`
fn get_months_for_interval(start: NaiveDate, end: NaiveDate) -> Vec<(i32, u32)> {
    let last = end.pred_opt().unwrap_or(end);
    let (mut year, mut month) = (start.year(), start.month());
    let mut months = vec![(year, month)];

    while (year, month) < (last.year(), last.month()) {
        let (y, m) = shift_month(year, month, 1);
        year = y;
        month = m;
        months.push((year, month));
    }

    months
}
