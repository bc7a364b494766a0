use chrono::{DateTime, NaiveDate, Utc};

/// An event is upcoming iff its occurs-at date, ignoring time of day, is on
/// or after `today`. Every view that hides past events goes through this one
/// function so the cutoff cannot drift between them.
pub fn is_upcoming(occurs_at: DateTime<Utc>, today: NaiveDate) -> bool {
    occurs_at.date_naive() >= today
}

/// Calendar-date equality, not a range: two events on the same day at
/// different times both match.
pub fn same_calendar_day(occurs_at: DateTime<Utc>, day: NaiveDate) -> bool {
    occurs_at.date_naive() == day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_day_matches_regardless_of_time() {
        let late = Utc.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap();
        assert!(same_calendar_day(late, d(2025, 3, 10)));
    }

    #[test]
    fn next_midnight_is_a_different_day() {
        let midnight = Utc.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap();
        assert!(!same_calendar_day(midnight, d(2025, 3, 10)));
    }

    #[test]
    fn today_counts_as_upcoming() {
        let this_evening = Utc.with_ymd_and_hms(2025, 3, 10, 21, 30, 0).unwrap();
        assert!(is_upcoming(this_evening, d(2025, 3, 10)));
        assert!(!is_upcoming(this_evening, d(2025, 3, 11)));
    }
}
