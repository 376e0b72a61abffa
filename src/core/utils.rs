use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Weekday};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn datetime_to_string(datetime: DateTime<FixedOffset>) -> String {
    datetime.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}

pub fn datetime_to_string_opt(datetime: Option<DateTime<FixedOffset>>) -> Option<String> {
    datetime.map(datetime_to_string)
}

pub fn date_to_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("{} must be a date formatted as YYYY-MM-DD, got {}", field, value))
}

/// Count of Monday–Friday dates in the inclusive range `start..=end`.
///
/// Display-only estimate, unrelated to the stored `days_requested`.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u32
}

/// Whole calendar years between the start year and `today`'s year.
///
/// Month and day are ignored; a start date in the future counts as zero.
pub fn years_of_service(start_date: NaiveDate, today: NaiveDate) -> i32 {
    (today.year() - start_date.year()).max(0)
}
