use chrono::{DateTime, Duration, Utc};

/// Start of a trailing window ending at `now`.
///
/// The window is measured in whole days of 24 hours, independent of the
/// calendar (no DST or month-boundary adjustments).
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

/// Returns true when `instant` lies in the closed interval `[start, ..)`.
pub fn is_within_window(instant: DateTime<Utc>, start: DateTime<Utc>) -> bool {
    instant >= start
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_start_is_exactly_168_hours_back() {
        let now = Utc.with_ymd_and_hms(2024, 3, 12, 6, 30, 0).unwrap();
        let start = window_start(now, 7);
        assert_eq!(now - start, Duration::hours(168));
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 5, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_is_within_window_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        let start = window_start(now, 7);
        assert!(is_within_window(start, start));
        assert!(!is_within_window(start - Duration::seconds(1), start));
    }
}
