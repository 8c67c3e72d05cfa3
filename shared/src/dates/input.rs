// Accepted date inputs and their parsing into local wall-clock time.
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::borrow::Cow;
use tracing::debug;

// Naive layouts tried after RFC 3339, most specific first.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Anything the date utilities accept as a date.
///
/// Zoned values are converted to local time; strings are parsed as ISO-8601 /
/// RFC 3339; `None` is accepted and treated as invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput<'a> {
    Moment(NaiveDateTime),
    Text(Cow<'a, str>),
    Missing,
}

impl DateInput<'_> {
    /// The local wall-clock time this input denotes, if it is a valid date.
    pub fn resolve(&self) -> Option<NaiveDateTime> {
        match self {
            DateInput::Moment(moment) => Some(*moment),
            DateInput::Text(text) => parse_text(text),
            DateInput::Missing => None,
        }
    }
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(zoned.with_timezone(&Local).naive_local());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(moment) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(moment);
        }
    }

    // Date-only strings mean local midnight.
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    debug!(input = %trimmed, "Rejected unparsable date");
    None
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(text: &'a str) -> Self {
        DateInput::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(text: &'a String) -> Self {
        DateInput::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for DateInput<'_> {
    fn from(text: String) -> Self {
        DateInput::Text(Cow::Owned(text))
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(moment: NaiveDateTime) -> Self {
        DateInput::Moment(moment)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(date: NaiveDate) -> Self {
        DateInput::Moment(date.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput<'_> {
    fn from(moment: DateTime<Tz>) -> Self {
        DateInput::Moment(moment.with_timezone(&Local).naive_local())
    }
}

impl<'a, T: Into<DateInput<'a>>> From<Option<T>> for DateInput<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(DateInput::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn test_date_only_is_local_midnight() {
        assert_eq!(DateInput::from("2024-03-05").resolve(), Some(naive(2024, 3, 5, 0, 0, 0)));
    }

    #[test]
    fn test_naive_datetime_layouts() {
        assert_eq!(DateInput::from("2024-03-05T14:30:15").resolve(), Some(naive(2024, 3, 5, 14, 30, 15)));
        assert_eq!(DateInput::from("2024-03-05T14:30").resolve(), Some(naive(2024, 3, 5, 14, 30, 0)));
        assert_eq!(DateInput::from("2024-03-05 14:30:15.250").resolve().map(|d| d.and_utc().timestamp_subsec_millis()), Some(250));
        assert_eq!(DateInput::from(" 2024-03-05 14:30 ").resolve(), Some(naive(2024, 3, 5, 14, 30, 0)));
    }

    #[test]
    fn test_rfc3339_is_converted_to_local_time() {
        let expected = DateTime::parse_from_rfc3339("2024-03-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(DateInput::from("2024-03-05T10:00:00Z").resolve(), Some(expected));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(DateInput::from("").resolve(), None);
        assert_eq!(DateInput::from("   ").resolve(), None);
        assert_eq!(DateInput::from("not a date").resolve(), None);
        assert_eq!(DateInput::from("2024-02-30").resolve(), None);
        assert_eq!(DateInput::from("2024-13-01").resolve(), None);
    }

    #[test]
    fn test_optional_inputs() {
        let missing: Option<&str> = None;
        assert_eq!(DateInput::from(missing), DateInput::Missing);
        assert_eq!(DateInput::from(Some("2024-01-01")).resolve(), Some(naive(2024, 1, 1, 0, 0, 0)));
        let owned = Some("2024-01-01".to_string());
        assert!(DateInput::from(owned.as_ref()).resolve().is_some());
    }

    #[test]
    fn test_native_values() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(DateInput::from(date).resolve(), Some(naive(2023, 12, 31, 0, 0, 0)));
        let local = Local::now();
        assert_eq!(DateInput::from(local).resolve(), Some(local.naive_local()));
    }
}
