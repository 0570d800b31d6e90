use chrono::{DateTime, Duration, FixedOffset, Utc};
use chrono_tz::Asia::Tokyo;
use todolimit::deadline::{format_stored, local_input_value, remaining_time, to_stored_instant};
use todolimit::{DeadlineError, DeadlineFormatter, RemainingTime};

fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

#[test]
fn test_future_deadlines_always_break_down() {
    let fmt = DeadlineFormatter::new(Utc);
    let now = at("2024-01-01T00:00:00Z");
    let offsets = [1, 999, 60_000, 61_000, 3_599_999, 3_600_000, 86_399_999, 86_400_000, 90_061_001, 864_000_000];
    for ms in offsets {
        let deadline = format_stored(now + Duration::milliseconds(ms));
        match fmt.remaining_time(Some(&deadline), now).unwrap() {
            RemainingTime::Left { days, hours, minutes } => {
                assert!(days >= 0 && hours >= 0, "{ms}ms");
                assert!((1..60).contains(&minutes), "{ms}ms gave {minutes} minutes");
                assert!(hours < 24);
            }
            other => panic!("{ms}ms ahead gave {other:?}"),
        }
    }
}

#[test]
fn test_past_deadlines_are_expired() {
    let fmt = DeadlineFormatter::new(Utc);
    let now = at("2024-01-01T00:00:00Z");
    for ms in [0, 1, 59_999, 86_400_000] {
        let deadline = format_stored(now - Duration::milliseconds(ms));
        assert_eq!(fmt.remaining_time(Some(&deadline), now).unwrap(), RemainingTime::Expired);
    }
}

#[test]
fn test_documented_examples() {
    let fmt = DeadlineFormatter::new(Utc);
    let now = at("2024-01-01T00:00:00Z");
    let label = |d: &str| fmt.remaining_time(Some(d), now).unwrap().to_string();

    assert_eq!(label("2024-01-03T05:30:00Z"), "2日 5時間 30分");
    assert_eq!(label("2023-12-31T23:59:59Z"), "期限切れ");
    assert_eq!(label("2024-01-01T00:01:01Z"), "0日 0時間 1分");
    assert_eq!(label("2024-01-02T00:00:00Z"), "1日 0時間 1分");
}

#[test]
fn test_offset_instants_are_normalised() {
    let fmt = DeadlineFormatter::new(Utc);
    let now = at("2024-01-01T00:00:00Z");
    // 09:00+09:00 is midnight UTC
    assert!(fmt.remaining_time(Some("2024-01-01T09:00:00+09:00"), now).unwrap().is_expired());
}

#[test]
fn test_round_trip_with_fixed_offset() {
    let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    let fmt = DeadlineFormatter::new(ist);
    let mut instant = at("2023-12-31T18:29:00Z");
    for _ in 0..200 {
        let stored = format_stored(instant);
        let local = fmt.local_input_value(Some(&stored)).unwrap();
        assert_eq!(fmt.to_stored_instant(&local).unwrap(), Some(stored));
        instant += Duration::minutes(997);
    }
}

#[test]
fn test_seconds_are_dropped_in_edit_value() {
    let fmt = DeadlineFormatter::new(Tokyo);
    let local = fmt.local_input_value(Some("2024-06-01T15:30:59.999Z")).unwrap();
    assert_eq!(local, "2024-06-02T00:30");
    assert_eq!(fmt.to_stored_instant(&local).unwrap().as_deref(), Some("2024-06-01T15:30:00.000Z"));
}

#[test]
fn test_invalid_input_reports_the_value() {
    let fmt = DeadlineFormatter::new(Tokyo);
    let err = fmt.to_stored_instant("2024-02-30T10:00").unwrap_err();
    let DeadlineError::InvalidDeadline { input, .. } = &err;
    assert_eq!(input, "2024-02-30T10:00");
    assert!(err.to_string().starts_with("invalid deadline '2024-02-30T10:00'"));
}

#[test]
fn test_system_timezone_helpers() {
    let now = at("2024-01-01T00:00:00Z");
    assert_eq!(remaining_time(None, now).unwrap(), RemainingTime::NoDeadline);
    assert_eq!(remaining_time(Some("2024-01-01T00:30:00.000Z"), now).unwrap().to_string(), "0日 0時間 30分");
    assert_eq!(local_input_value(None).unwrap(), "");
    assert_eq!(to_stored_instant("").unwrap(), None);
    assert!(to_stored_instant("soon").is_err());
}
