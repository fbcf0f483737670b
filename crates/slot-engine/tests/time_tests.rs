//! Tests for clock parsing/formatting, weekday ordering, and interval overlap.

use chrono::Weekday;
use slot_engine::time::{
    format_clock_12h, format_clock_24h, minutes_between, overlaps, parse_clock, DayOfWeek,
    TimeOfDay,
};
use slot_engine::SlotError;

fn t(minutes: u16) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes).unwrap()
}

// ── parse_clock ─────────────────────────────────────────────────────────────

#[test]
fn parses_padded_and_unpadded_24h() {
    assert_eq!(parse_clock("09:00").unwrap(), t(540));
    assert_eq!(parse_clock("9:00").unwrap(), t(540));
    assert_eq!(parse_clock("17:30").unwrap(), t(1050));
    assert_eq!(parse_clock("00:00").unwrap(), TimeOfDay::MIDNIGHT);
}

#[test]
fn parses_12h_with_meridiem() {
    assert_eq!(parse_clock("9:00 AM").unwrap(), t(540));
    assert_eq!(parse_clock("5:30 PM").unwrap(), t(1050));
    assert_eq!(parse_clock("12:00 PM").unwrap(), t(720));
    assert_eq!(parse_clock("12:15 AM").unwrap(), t(15));
    assert_eq!(parse_clock("5:30pm").unwrap(), t(1050));
}

#[test]
fn end_of_day_marker() {
    assert_eq!(parse_clock("24:00").unwrap(), TimeOfDay::END_OF_DAY);
    assert_eq!(TimeOfDay::END_OF_DAY.minutes(), 1440);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(parse_clock("  10:15 ").unwrap(), t(615));
}

#[test]
fn missing_separator_is_rejected() {
    let err = parse_clock("0900").unwrap_err();
    assert!(matches!(err, SlotError::InvalidFormat(_)), "got {:?}", err);
}

#[test]
fn out_of_range_hour_and_minute_are_rejected() {
    for bad in ["25:00", "24:30", "9:60", "-1:00", "13:00 PM"] {
        assert!(
            matches!(parse_clock(bad), Err(SlotError::InvalidFormat(_))),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn garbage_is_rejected() {
    for bad in ["", ":", "ab:cd", "9:00:00", "nine", "9:5", "9: 05", "7:3 pm", "123:00", "9:00 XM", "9:00  PM"] {
        assert!(parse_clock(bad).is_err(), "{:?} should be rejected", bad);
    }
}

#[test]
fn minute_must_be_two_digits() {
    // "9:5" is not read as 09:05 (nor as a typo for 09:50).
    for bad in ["9:5", "9: 05", "7:3 pm", "10:005"] {
        assert!(
            matches!(parse_clock(bad), Err(SlotError::InvalidFormat(_))),
            "{:?} should be rejected",
            bad
        );
    }
    assert_eq!(parse_clock("9:05").unwrap(), t(545));
    assert_eq!(parse_clock("7:03 pm").unwrap(), t(1143));
}

#[test]
fn from_str_delegates_to_parse_clock() {
    let parsed: TimeOfDay = "10:45".parse().unwrap();
    assert_eq!(parsed, t(645));
}

// ── constructors ────────────────────────────────────────────────────────────

#[test]
fn from_minutes_bounds() {
    assert!(TimeOfDay::from_minutes(1440).is_ok());
    assert!(TimeOfDay::from_minutes(1441).is_err());
}

#[test]
fn from_hm_bounds() {
    assert_eq!(TimeOfDay::from_hm(9, 30).unwrap(), t(570));
    assert_eq!(TimeOfDay::from_hm(24, 0).unwrap(), TimeOfDay::END_OF_DAY);
    assert!(TimeOfDay::from_hm(24, 1).is_err());
    assert!(TimeOfDay::from_hm(10, 60).is_err());
}

#[test]
fn checked_add_stops_at_end_of_day() {
    assert_eq!(t(1380).checked_add(60), Some(TimeOfDay::END_OF_DAY));
    assert_eq!(t(1400).checked_add(60), None);
}

// ── formatting ──────────────────────────────────────────────────────────────

#[test]
fn formats_24h_zero_padded() {
    assert_eq!(format_clock_24h(t(540)), "09:00");
    assert_eq!(format_clock_24h(t(1050)), "17:30");
    assert_eq!(format_clock_24h(TimeOfDay::END_OF_DAY), "24:00");
    assert_eq!(t(65).to_string(), "01:05");
}

#[test]
fn formats_12h() {
    assert_eq!(format_clock_12h(TimeOfDay::MIDNIGHT), "12:00 AM");
    assert_eq!(format_clock_12h(t(540)), "9:00 AM");
    assert_eq!(format_clock_12h(t(720)), "12:00 PM");
    assert_eq!(format_clock_12h(t(765)), "12:45 PM");
    assert_eq!(format_clock_12h(t(1050)), "5:30 PM");
    assert_eq!(format_clock_12h(TimeOfDay::END_OF_DAY), "24:00");
}

#[test]
fn formatted_12h_parses_back() {
    for m in [0u16, 59, 540, 719, 720, 1439, 1440] {
        assert_eq!(parse_clock(&format_clock_12h(t(m))).unwrap(), t(m));
    }
}

// ── minutes_between / overlaps ──────────────────────────────────────────────

#[test]
fn minutes_between_is_signed() {
    assert_eq!(minutes_between(t(540), t(600)), 60);
    assert_eq!(minutes_between(t(600), t(540)), -60);
    assert_eq!(minutes_between(t(600), t(600)), 0);
}

#[test]
fn abutting_intervals_do_not_overlap() {
    assert!(!overlaps(t(540), t(600), t(600), t(660)));
    assert!(!overlaps(t(600), t(660), t(540), t(600)));
}

#[test]
fn one_minute_of_shared_time_overlaps() {
    assert!(overlaps(t(540), t(600), t(599), t(660)));
}

#[test]
fn containment_overlaps() {
    assert!(overlaps(t(540), t(720), t(600), t(660)));
    assert!(overlaps(t(600), t(660), t(540), t(720)));
}

// ── DayOfWeek ───────────────────────────────────────────────────────────────

#[test]
fn canonical_order_is_monday_first() {
    let mut days = vec![DayOfWeek::Sunday, DayOfWeek::Wednesday, DayOfWeek::Monday];
    days.sort();
    assert_eq!(
        days,
        vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Sunday]
    );
    assert_eq!(DayOfWeek::ALL[0], DayOfWeek::Monday);
    assert_eq!(DayOfWeek::ALL[6], DayOfWeek::Sunday);
}

#[test]
fn day_names_parse_case_insensitively() {
    assert_eq!("monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
    assert_eq!("Tue".parse::<DayOfWeek>().unwrap(), DayOfWeek::Tuesday);
    assert_eq!("SUNDAY".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
    assert!("funday".parse::<DayOfWeek>().is_err());
}

#[test]
fn converts_to_and_from_chrono_weekday() {
    for day in DayOfWeek::ALL {
        let weekday: Weekday = day.into();
        assert_eq!(DayOfWeek::from(weekday), day);
    }
    assert_eq!(DayOfWeek::from(Weekday::Sat), DayOfWeek::Saturday);
}
