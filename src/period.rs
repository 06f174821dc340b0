use crate::{
    calendar::{add_days, day_after},
    schedule::RecurrenceSchedule,
};
use chrono::NaiveDate;
use log::{debug, trace, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A pay period between two consecutive paydays.
///
/// Bills are allocated over the half-open window `[start, end)`: a bill due on a
/// payday belongs to the period that begins there. The period is funded by the
/// incomes paid on its payday, which is always `end`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
    incomes: Vec<PeriodIncome>,
}

/// An income paid on a period's payday
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodIncome {
    pub source: Uuid,
    pub amount: Decimal,
}

impl Period {
    /// Create a period. The payday is the end boundary. No validation is done here;
    /// allocation skips periods where `end <= start`.
    pub fn new(start: NaiveDate, end: NaiveDate, incomes: Vec<PeriodIncome>) -> Self {
        Period { start, end, incomes }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn payday(&self) -> NaiveDate {
        self.end
    }

    pub fn incomes(&self) -> &[PeriodIncome] {
        &self.incomes
    }

    pub fn income_total(&self) -> Decimal {
        self.incomes.iter().map(|i| i.amount).sum()
    }

    /// Whether `date` falls inside `[start, end)`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}

/// Build `count` contiguous pay periods, the first of which contains `reference`.
///
/// With a single recurring schedule, that schedule's paydays are the period
/// boundaries and every other schedule only contributes income on the paydays it
/// shares. With several recurring schedules, all paydays are merged into one grid.
/// Without any recurring schedule there is nothing to project and the result is empty.
pub fn build_periods(
    schedules: &[RecurrenceSchedule],
    count: usize,
    reference: NaiveDate,
) -> Vec<Period> {
    let boundaries = forward_boundaries(schedules, count, reference);
    let periods = periods_from_boundaries(schedules, &boundaries);

    if periods.len() < count && !boundaries.is_empty() {
        warn!(
            "only {} of {} periods could be generated from {}",
            periods.len(),
            count,
            reference
        );
    }

    periods
}

/// Build the `count` periods immediately preceding the period that contains
/// `reference`, in ascending order. The last returned period ends where the first
/// period of [`build_periods`] starts.
pub fn build_history(
    schedules: &[RecurrenceSchedule],
    count: usize,
    reference: NaiveDate,
) -> Vec<Period> {
    let first = match forward_boundaries(schedules, 1, reference).first() {
        Some(d) => *d,
        None => return Vec::new(),
    };

    // Walk back using the same schedules that produce the forward boundaries
    let recurring = recurring_schedules(schedules);
    let drivers = if recurring.len() == 1 {
        recurring
    } else {
        schedules.iter().collect()
    };

    let mut boundaries = vec![first];
    for _ in 0..count {
        let before = match boundaries.last().and_then(|last| add_days(*last, -1)) {
            Some(d) => d,
            None => break,
        };

        match drivers.iter().filter_map(|s| s.previous_occurrence(before)).max() {
            Some(prev) => boundaries.push(prev),
            None => break,
        }
    }
    boundaries.reverse();

    trace!("history boundaries before {}: {:?}", reference, boundaries);

    periods_from_boundaries(schedules, &boundaries)
}

fn recurring_schedules(schedules: &[RecurrenceSchedule]) -> Vec<&RecurrenceSchedule> {
    schedules.iter().filter(|s| s.is_recurring()).collect()
}

// Produce `count + 1` ascending boundaries, the first on or before `reference`
fn forward_boundaries(
    schedules: &[RecurrenceSchedule],
    count: usize,
    reference: NaiveDate,
) -> Vec<NaiveDate> {
    if count == 0 {
        return Vec::new();
    }

    match recurring_schedules(schedules).as_slice() {
        [] => {
            debug!("no recurring income schedules - nothing to project");
            Vec::new()
        }
        [primary] => {
            debug!(
                "single schedule grid: {} anchored {}",
                primary.frequency(),
                primary.anchor_date()
            );
            single_schedule_boundaries(primary, count, reference)
        }
        recurring => {
            debug!("merged grid across {} recurring schedules", recurring.len());
            merged_boundaries(schedules, count, reference)
        }
    }
}

fn single_schedule_boundaries(
    primary: &RecurrenceSchedule,
    count: usize,
    reference: NaiveDate,
) -> Vec<NaiveDate> {
    // A recurring schedule always has a previous payday. Starting there guarantees the
    // first period contains the reference date.
    let start = match primary.previous_occurrence(reference) {
        Some(d) => d,
        None => return Vec::new(),
    };

    let mut boundaries = vec![start];
    if let Some(next) = day_after(start) {
        boundaries.extend(primary.next_occurrences(next, count));
    }
    boundaries
}

fn merged_boundaries(
    schedules: &[RecurrenceSchedule],
    count: usize,
    reference: NaiveDate,
) -> Vec<NaiveDate> {
    let mut boundaries = BTreeSet::new();
    let target = count.saturating_add(1);

    // Open the grid on the most recent payday of any schedule so that the first period
    // contains the reference date.
    let floor = match schedules
        .iter()
        .filter_map(|s| s.previous_occurrence(reference))
        .max()
    {
        Some(start) => {
            boundaries.insert(start);
            match day_after(start) {
                Some(next) => next,
                None => return vec![start],
            }
        }
        None => reference,
    };

    for schedule in schedules {
        boundaries.extend(schedule.next_occurrences(floor, count));
    }

    // Keep extending from the tail until there are enough boundaries, or every
    // schedule is exhausted.
    while boundaries.len() < target {
        let tail = match boundaries.iter().next_back().and_then(|d| day_after(*d)) {
            Some(d) => d,
            None => break,
        };
        let needed = target - boundaries.len();
        let before = boundaries.len();

        for schedule in schedules {
            boundaries.extend(schedule.next_occurrences(tail, needed));
        }

        if boundaries.len() == before {
            break;
        }
    }

    boundaries.into_iter().take(target).collect()
}

// Pair consecutive boundaries into periods, attaching every schedule that pays on the
// closing boundary.
fn periods_from_boundaries(
    schedules: &[RecurrenceSchedule],
    boundaries: &[NaiveDate],
) -> Vec<Period> {
    boundaries
        .windows(2)
        .filter_map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            if end <= start {
                warn!("discarding non-increasing boundaries {} - {}", start, end);
                return None;
            }

            let incomes = incomes_on(schedules, end);
            trace!("period {} - {} with {} incomes", start, end, incomes.len());

            Some(Period::new(start, end, incomes))
        })
        .collect()
}

fn incomes_on(schedules: &[RecurrenceSchedule], payday: NaiveDate) -> Vec<PeriodIncome> {
    schedules
        .iter()
        .filter(|s| s.occurs_on(payday))
        .map(|s| PeriodIncome {
            source: s.id(),
            amount: s.source_amount(),
        })
        .collect()
}
