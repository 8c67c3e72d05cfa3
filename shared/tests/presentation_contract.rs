use chrono::{Days, NaiveDate, NaiveDateTime};
use shared::{
    expiry_status_at, format_compact_number, format_currency, format_duration, format_file_size, format_number,
    format_percentage, is_valid_date, parse_date_safe, relative_time_at, to_iso_date_string, Currency,
    CurrencyOptions, ExpiryStatus, EXPIRY_WARNING_DAYS,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

#[test]
fn non_finite_numbers_map_to_safe_defaults() {
    let options = CurrencyOptions::default();
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(format_currency(value, &options), "£0.00");
        assert_eq!(format_number(value, "en-GB"), "0");
        assert_eq!(format_percentage(value, 1), "0%");
        assert_eq!(format_compact_number(value, "en-GB"), "0");
        assert_eq!(format_duration(value), "0s");
        assert_eq!(format_file_size(value, 2), "0 Bytes");
    }
}

#[test]
fn documented_examples() {
    assert_eq!(format_currency(1234.56, &CurrencyOptions::new(Currency::Usd)), "$1,234.56");
    assert_eq!(format_file_size(1_048_576.0, 2), "1 MB");
    assert_eq!(format_duration(3_665_000.0), "1h 1m");
}

#[test]
fn parse_and_validity_agree() {
    let inputs = [
        "2024-06-15",
        "2024-06-15T08:30:00",
        "2024-06-15T08:30:00Z",
        "2024-02-30",
        "15/06/2024",
        "",
        "tomorrow",
    ];
    for input in inputs {
        assert_eq!(parse_date_safe(input).is_some(), is_valid_date(input), "input {:?}", input);
    }
}

#[test]
fn iso_dates_round_trip() {
    for input in ["2024-01-01", "2024-02-29", "1999-12-31", "2030-07-04"] {
        let parsed = parse_date_safe(input).unwrap();
        assert_eq!(to_iso_date_string(parsed), input);
    }
}

#[test]
fn expiry_states_partition_the_calendar() {
    let now = at(2024, 6, 15, 14, 45);
    assert_eq!(expiry_status_at(now, now, EXPIRY_WARNING_DAYS), ExpiryStatus::ExpiresToday);

    let mut seen = Vec::new();
    for offset in -3i64..=10 {
        let day = if offset < 0 {
            now - Days::new(offset.unsigned_abs())
        } else {
            now + Days::new(offset as u64)
        };
        let status = expiry_status_at(day, now, EXPIRY_WARNING_DAYS);
        let expected = match offset {
            o if o < 0 => ExpiryStatus::Expired,
            0 => ExpiryStatus::ExpiresToday,
            o if o <= EXPIRY_WARNING_DAYS => ExpiryStatus::ExpiresSoon,
            _ => ExpiryStatus::Fresh,
        };
        assert_eq!(status, expected, "offset {}", offset);
        seen.push(status);
    }
    for status in ExpiryStatus::ALL {
        assert!(seen.contains(&status));
    }
}

#[test]
fn warning_window_is_inclusive() {
    let now = at(2024, 6, 15, 9, 0);
    assert_eq!(expiry_status_at(now + Days::new(7), now, 7), ExpiryStatus::ExpiresSoon);
    assert_eq!(expiry_status_at(now + Days::new(8), now, 7), ExpiryStatus::Fresh);
}

#[test]
fn relative_time_uses_calendar_days() {
    let late = at(2024, 6, 15, 23, 30);
    assert_eq!(relative_time_at(at(2024, 6, 15, 0, 10), late), "23 hours ago");
    assert_eq!(relative_time_at(at(2024, 6, 13, 23, 30), late), "2 days ago");

    let early = at(2024, 6, 15, 0, 10);
    assert_eq!(relative_time_at(at(2024, 6, 14, 23, 50), early), "yesterday");
}

#[test]
fn relative_time_pluralization() {
    let now = at(2024, 6, 15, 12, 0);
    assert_eq!(relative_time_at(at(2024, 6, 15, 11, 59), now), "1 minute ago");
    assert_eq!(relative_time_at(at(2024, 6, 15, 11, 58), now), "2 minutes ago");
    assert_eq!(relative_time_at(at(2024, 6, 15, 11, 0), now), "1 hour ago");
    assert_eq!(relative_time_at(at(2024, 6, 8, 12, 0), now), "1 week ago");
    assert_eq!(relative_time_at(at(2024, 7, 1, 12, 0), now), "in 2 weeks");
    assert_eq!(relative_time_at(at(2023, 6, 1, 12, 0), now), "1 year ago");
}
