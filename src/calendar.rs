use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// The latest day-of-month that exists in every month. Monthly and semimonthly anchors
/// are clamped to this so that every month has exactly one matching date.
pub const MAX_MONTH_DAY: u32 = 28;

// Days in each month for common and leap years
const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MONTH_LENGTHS_LEAP: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Truncate a timestamp to midnight of the same calendar day
pub fn start_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_time(NaiveTime::MIN)
}

/// The last representable instant of the same calendar day
pub fn end_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    start_of_day(instant) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Reduce a timestamp to the calendar day the engine works in
pub fn to_day(instant: NaiveDateTime) -> NaiveDate {
    instant.date()
}

/// Move `date` by `days`. Returns `None` past the range chrono can represent.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// The day after `date`. Used to turn inclusive end dates into exclusive bounds.
pub fn day_after(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}

/// Add (or subtract) calendar months, then clamp the day to the last day of the
/// resulting month. Jan 31 + 1 month is Feb 28 (or 29), never a date in March.
pub fn add_months_preserving_day(date: NaiveDate, months: i32) -> NaiveDate {
    let (year, month) = shift_month(date.year(), date.month(), months);
    let day = date.day().min(month_length(year, month));

    // The day has been clamped to the month length, so this cannot fail
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Number of days in the given month, accounting for leap years
pub fn month_length(year: i32, month: u32) -> u32 {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let idx = (month.clamp(1, 12) - 1) as usize;

    if leap {
        MONTH_LENGTHS_LEAP[idx]
    } else {
        MONTH_LENGTHS[idx]
    }
}

/// Clamp a day-of-month into `[1, MAX_MONTH_DAY]`
pub fn clamp_month_day(day: u32) -> u32 {
    day.clamp(1, MAX_MONTH_DAY)
}

/// Move a (year, month) pair by `months`, rolling the year as needed
pub fn shift_month(year: i32, month: u32, months: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + months;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Build a date in the given month on a day that has already been clamped with
/// [`clamp_month_day`]. Returns `None` only for years outside chrono's range.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, clamp_month_day(day))
}
