use crate::calendar::clamp_month_day;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// Semimonthly pairs derived from an anchor split the month at this day: anchors on or
// before it pay on the anchor day and late in the month, later anchors pay on the 1st
// and the anchor day.
const SEMIMONTHLY_SPLIT_DAY: u32 = 15;
const SEMIMONTHLY_LATE_DAY: u32 = 30;

/// Records the recurrence of an income schedule or a bill
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Once,
    Weekly,
    Biweekly,
    Monthly,
    // Twice a month. `None` derives the pair from the anchor day.
    Semimonthly(Option<SemimonthlyDays>),
}

/// The two days of the month a semimonthly recurrence falls on.
///
/// Days are clamped to `[1, 28]` and stored sorted, so `first` is always the earlier
/// occurrence in any month. Both days may be equal, in which case the recurrence
/// effectively becomes monthly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct SemimonthlyDays {
    first: u32,
    second: u32,
}

impl Frequency {
    /// Stride in days for fixed-length frequencies
    pub fn stride_days(&self) -> Option<i64> {
        match *self {
            Frequency::Weekly => Some(7),
            Frequency::Biweekly => Some(14),
            _ => None,
        }
    }

    /// Whether this frequency produces more than one occurrence
    pub fn is_recurring(&self) -> bool {
        !matches!(*self, Frequency::Once)
    }

    /// The sorted, de-duplicated days of the month that a month-based frequency falls on
    /// for the given anchor. Empty for frequencies that aren't month-based.
    pub fn month_days(&self, anchor: NaiveDate) -> Vec<u32> {
        match *self {
            Frequency::Monthly => vec![clamp_month_day(anchor.day())],
            Frequency::Semimonthly(days) => {
                let days = days.unwrap_or_else(|| SemimonthlyDays::implied_by(anchor));
                if days.first == days.second {
                    vec![days.first]
                } else {
                    vec![days.first, days.second]
                }
            }
            Frequency::Once | Frequency::Weekly | Frequency::Biweekly => Vec::new(),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Frequency::Once => write!(f, "once"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Biweekly => write!(f, "biweekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Semimonthly(Some(days)) => {
                write!(f, "semimonthly on days {} and {}", days.first, days.second)
            }
            Frequency::Semimonthly(None) => write!(f, "semimonthly"),
        }
    }
}

impl SemimonthlyDays {
    /// Create a day pair. Input order doesn't matter and out of range days are clamped.
    pub fn new(a: u32, b: u32) -> Self {
        let (a, b) = (clamp_month_day(a), clamp_month_day(b));
        SemimonthlyDays {
            first: a.min(b),
            second: a.max(b),
        }
    }

    /// Derive a day pair from an anchor date when none was stored. An anchor in the
    /// first half of the month pairs with the end of the month, a later anchor pairs
    /// with the 1st.
    pub fn implied_by(anchor: NaiveDate) -> Self {
        let day = anchor.day();
        if day <= SEMIMONTHLY_SPLIT_DAY {
            SemimonthlyDays::new(day, SEMIMONTHLY_LATE_DAY)
        } else {
            SemimonthlyDays::new(1, day)
        }
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn contains(&self, day: u32) -> bool {
        day == self.first || day == self.second
    }
}

impl From<(u32, u32)> for SemimonthlyDays {
    fn from((a, b): (u32, u32)) -> Self {
        SemimonthlyDays::new(a, b)
    }
}

impl From<SemimonthlyDays> for (u32, u32) {
    fn from(days: SemimonthlyDays) -> Self {
        (days.first, days.second)
    }
}
