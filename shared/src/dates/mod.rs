// Date parsing, relative time and expiry classification.
//
// All functions work on local wall-clock time and compare calendar days, not
// 24-hour periods: something at 23:30 yesterday is "yesterday" at 00:10
// today. Each function that reads the clock has an `*_at` twin taking `now`
// explicitly.
//
// Like the number formatters, nothing here fails: unparsable input maps to a
// per-function default (`"Invalid date"`, `0`, `false`, `fresh`, `""`).

pub mod input;

pub use input::DateInput;

use crate::constants::{DateFormat, ExpiryStatus, EXPIRY_WARNING_DAYS, INVALID_DATE};
use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tracing::warn;

/// Inclusive range of local times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        self.start <= moment && moment <= self.end
    }
}

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

// --- Parsing ---

/// Parses any accepted input; `None` for missing or unparsable values.
pub fn parse_date_safe<'a>(input: impl Into<DateInput<'a>>) -> Option<NaiveDateTime> {
    input.into().resolve()
}

pub fn is_valid_date<'a>(input: impl Into<DateInput<'a>>) -> bool {
    parse_date_safe(input).is_some()
}

/// `YYYY-MM-DD`, or an empty string for invalid input.
pub fn to_iso_date_string<'a>(date: impl Into<DateInput<'a>>) -> String {
    parse_date_safe(date)
        .map(|d| d.format(DateFormat::Iso.pattern()).to_string())
        .unwrap_or_default()
}

pub fn get_today_iso() -> String {
    to_iso_date_string(now())
}

/// Strictly before; false when either side is invalid.
pub fn is_before_date<'a, 'b>(a: impl Into<DateInput<'a>>, b: impl Into<DateInput<'b>>) -> bool {
    match (parse_date_safe(a), parse_date_safe(b)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

/// Strictly after; false when either side is invalid.
pub fn is_after_date<'a, 'b>(a: impl Into<DateInput<'a>>, b: impl Into<DateInput<'b>>) -> bool {
    match (parse_date_safe(a), parse_date_safe(b)) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}

// --- Display ---

pub fn format_date<'a>(date: impl Into<DateInput<'a>>, format: DateFormat) -> String {
    match parse_date_safe(date) {
        Some(d) => d.format(format.pattern()).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Like [`format_date`] with the format given by name (`"short"`, `"FULL"`...).
/// Unknown names use the iso pattern.
pub fn format_date_tag<'a>(date: impl Into<DateInput<'a>>, tag: &str) -> String {
    let format = tag.parse::<DateFormat>().unwrap_or_else(|err| {
        warn!(error = %err, "Unknown date format, using iso");
        DateFormat::Iso
    });
    format_date(date, format)
}

pub fn get_relative_time<'a>(date: impl Into<DateInput<'a>>) -> String {
    relative_time_at(date, now())
}

/// Human phrase for `date` relative to `now`: "just now", "5 minutes ago",
/// "yesterday", "in 2 weeks", ...
pub fn relative_time_at<'a>(date: impl Into<DateInput<'a>>, now: NaiveDateTime) -> String {
    let Some(date) = parse_date_safe(date) else {
        return INVALID_DATE.to_string();
    };

    let today = now.date();
    if date.date() == today {
        // Positive when the date is in the past.
        let minutes = (now - date).num_minutes();
        if minutes == 0 {
            return "just now".to_string();
        }
        let future = minutes < 0;
        let minutes = minutes.abs();
        return if minutes < 60 {
            phrase(minutes, "minute", future)
        } else {
            phrase(minutes / 60, "hour", future)
        };
    }

    let days = calendar_days_between(today, date.date());
    match days {
        -1 => return "yesterday".to_string(),
        1 => return "tomorrow".to_string(),
        _ => {}
    }

    let future = days > 0;
    let days = days.abs();
    if days < 7 {
        phrase(days, "day", future)
    } else if days < 30 {
        phrase(days / 7, "week", future)
    } else if days < 365 {
        phrase(days / 30, "month", future)
    } else {
        phrase(days / 365, "year", future)
    }
}

fn phrase(count: i64, unit: &str, future: bool) -> String {
    let plural = if count == 1 { "" } else { "s" };
    if future {
        format!("in {} {}{}", count, unit, plural)
    } else {
        format!("{} {}{} ago", count, unit, plural)
    }
}

// --- Expiry ---

/// Classifies an expiry date with the default warning window.
pub fn get_expiry_status<'a>(date: impl Into<DateInput<'a>>) -> ExpiryStatus {
    expiry_status_at(date, now(), EXPIRY_WARNING_DAYS)
}

pub fn get_expiry_status_with_threshold<'a>(date: impl Into<DateInput<'a>>, warning_days: i64) -> ExpiryStatus {
    expiry_status_at(date, now(), warning_days)
}

/// Branches are checked in order: expired, expires today, expires soon
/// (1..=`warning_days` days away), fresh. Invalid dates are fresh so a typo
/// never raises an alarm.
pub fn expiry_status_at<'a>(date: impl Into<DateInput<'a>>, now: NaiveDateTime, warning_days: i64) -> ExpiryStatus {
    let Some(date) = parse_date_safe(date) else {
        return ExpiryStatus::Fresh;
    };

    let days = calendar_days_between(now.date(), date.date());
    if days < 0 {
        ExpiryStatus::Expired
    } else if days == 0 {
        ExpiryStatus::ExpiresToday
    } else if days <= warning_days {
        ExpiryStatus::ExpiresSoon
    } else {
        ExpiryStatus::Fresh
    }
}

/// Signed calendar days from today to `date`; 0 when invalid.
pub fn get_days_until_expiry<'a>(date: impl Into<DateInput<'a>>) -> i64 {
    days_until_expiry_at(date, now())
}

pub fn days_until_expiry_at<'a>(date: impl Into<DateInput<'a>>, now: NaiveDateTime) -> i64 {
    parse_date_safe(date)
        .map(|d| calendar_days_between(now.date(), d.date()))
        .unwrap_or(0)
}

fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

// --- Ranges ---

/// True when `date` lies strictly between `days` days ago and now.
pub fn is_within_last_days<'a>(date: impl Into<DateInput<'a>>, days: u32) -> bool {
    is_within_last_days_at(date, days, now())
}

pub fn is_within_last_days_at<'a>(date: impl Into<DateInput<'a>>, days: u32, now: NaiveDateTime) -> bool {
    let Some(date) = parse_date_safe(date) else {
        return false;
    };
    let start = now
        .checked_sub_signed(TimeDelta::days(i64::from(days)))
        .unwrap_or(NaiveDateTime::MIN);
    start < date && date < now
}

/// From the first instant of the current month to the last millisecond of it.
pub fn get_current_month_range() -> DateRange {
    current_month_range_at(now())
}

pub fn current_month_range_at(now: NaiveDateTime) -> DateRange {
    let first = now.date().with_day(1).unwrap_or(now.date());
    let end = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.and_time(NaiveTime::MIN).checked_sub_signed(TimeDelta::milliseconds(1)))
        .unwrap_or(NaiveDateTime::MAX);

    DateRange {
        start: first.and_time(NaiveTime::MIN),
        end,
    }
}

/// From the start of the day `days` days ago up to now.
pub fn get_last_n_days_range(days: u32) -> DateRange {
    last_n_days_range_at(days, now())
}

pub fn last_n_days_range_at(days: u32, now: NaiveDateTime) -> DateRange {
    let first = now
        .date()
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);

    DateRange {
        start: first.and_time(NaiveTime::MIN),
        end: now,
    }
}
