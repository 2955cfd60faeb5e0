use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::HistoryError;

/// Inclusive calendar-date window, both endpoints at local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The previous civil day in `tz` as of `now`.
///
/// The instant is resolved into the timezone's calendar first and only then
/// shifted back a day, so the result stays correct around offset changes
/// where the civil date and the UTC date disagree.
#[must_use]
pub fn yesterday_in(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive() - Duration::days(1)
}

/// Window of `n` days ending yesterday in `tz`.
pub fn last_n_days(n: u32, tz: Tz) -> Result<DateRange, HistoryError> {
    last_n_days_at(Utc::now(), n, tz)
}

/// Clock-seeded variant of [`last_n_days`] for deterministic tests.
pub fn last_n_days_at(now: DateTime<Utc>, n: u32, tz: Tz) -> Result<DateRange, HistoryError> {
    if n < 1 {
        return Err(HistoryError::InvalidArgument(
            "lookback must span at least 1 day".to_string(),
        ));
    }

    let end = yesterday_in(now, tz);
    let start = end - Duration::days(i64::from(n) - 1);
    Ok(DateRange { start, end })
}

/// `YYYY-MM-DD` from the date's own calendar fields.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::{Europe, Pacific};

    use super::*;

    fn noon_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn range_ends_yesterday_with_correct_start() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        let range = last_n_days_at(now, 7, Europe::London).unwrap();
        assert_eq!(format_date(range.end), "2024-06-14");
        assert_eq!(format_date(range.start), "2024-06-08");
    }

    #[test]
    fn single_day_range_collapses_to_yesterday() {
        let range = last_n_days_at(noon_utc(2024, 6, 15), 1, Europe::London).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn zero_days_is_an_invalid_argument() {
        let err = last_n_days_at(noon_utc(2024, 6, 15), 0, Europe::London).unwrap_err();
        assert!(matches!(err, HistoryError::InvalidArgument(_)));
    }

    #[test]
    fn civil_date_wins_over_utc_date_near_midnight() {
        // 23:30 UTC during BST is already the next civil day in London.
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 23, 30, 0).unwrap();
        let range = last_n_days_at(now, 7, Europe::London).unwrap();
        assert_eq!(format_date(range.end), "2024-06-15");
    }

    #[test]
    fn far_ahead_timezone_sees_a_later_yesterday() {
        // 13:00 UTC is 01:00 the next day in Auckland (NZST, +12).
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 13, 0, 0).unwrap();
        assert_eq!(
            format_date(yesterday_in(now, Pacific::Auckland)),
            "2024-06-15"
        );
        assert_eq!(format_date(yesterday_in(now, Europe::London)), "2024-06-14");
    }

    #[test]
    fn range_spans_a_dst_transition() {
        // London moved to BST on 2024-03-31; the window is pure calendar
        // arithmetic and must not gain or lose a day.
        let now = Utc.with_ymd_and_hms(2024, 4, 2, 12, 0, 0).unwrap();
        let range = last_n_days_at(now, 7, Europe::London).unwrap();
        assert_eq!(format_date(range.start), "2024-03-26");
        assert_eq!(format_date(range.end), "2024-04-01");
    }

    #[test]
    fn formatted_date_round_trips() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let formatted = format_date(date);
        let parsed = NaiveDate::parse_from_str(&formatted, "%Y-%m-%d").unwrap();
        assert_eq!(parsed, date);
    }
}
