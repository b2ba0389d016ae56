use chrono::{DateTime, NaiveDate};

/// Length of a bucketing day in milliseconds. Every piece of day math in
/// waterlog floors timestamps to this fixed 24-hour boundary; there is no
/// timezone normalization, so the store's day files, the summary buckets and
/// the history keys always agree on which day an event belongs to.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Floors a timestamp to the start of its day.
pub fn day_start_ms(timestamp_ms: i64) -> i64 {
    timestamp_ms - timestamp_ms.rem_euclid(DAY_MS)
}

/// Calendar day a timestamp falls into, matching [day_start_ms] boundaries.
pub fn day_of(timestamp_ms: i64) -> NaiveDate {
    DateTime::from_timestamp_millis(day_start_ms(timestamp_ms))
        .expect("day start always stays within the representable range")
        .date_naive()
}

/// This is the standard way of converting a date to a string in waterlog.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{date_to_record_name, day_of, day_start_ms, DAY_MS};

    #[test]
    fn test_day_floor() {
        assert_eq!(day_start_ms(0), 0);
        assert_eq!(day_start_ms(DAY_MS - 1), 0);
        assert_eq!(day_start_ms(DAY_MS), DAY_MS);
        assert_eq!(day_start_ms(DAY_MS + 125), DAY_MS);
    }

    #[test]
    fn test_day_floor_before_epoch() {
        assert_eq!(day_start_ms(-1), -DAY_MS);
        assert_eq!(day_start_ms(-DAY_MS), -DAY_MS);
    }

    #[test]
    fn test_day_of_matches_record_name() {
        let day = day_of(1712318400000); // 2024-04-05 12:00:00 UTC
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 4, 5).unwrap());
        assert_eq!(date_to_record_name(day), "2024-04-05");
    }
}
