use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};

/// Format used for every date that ends up in a file name.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Format of the timestamp prefix of an activity log line.
pub const ENTRY_TIMESTAMP_FORMAT: &str = "%c";

/// This is the standard way of converting a date to a string in screenlog.
pub fn date_to_day_name(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parses a date entered by the operator. `YYYY-MM-DD` is tried first, then anything
/// chrono-english understands ("today", "yesterday", "15/03/2025"). Bare numbers are rejected,
/// chrono-english would read them as years.
pub fn parse_day(input: &str, now: DateTime<Local>) -> Result<NaiveDate> {
    let input = input.trim();
    if input.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Can't parse \"{input}\" as a date"));
    }
    let date = match NaiveDate::parse_from_str(input, DAY_FORMAT) {
        Ok(date) => date,
        Err(_) => parse_date_string(input, now, Dialect::Uk)
            .map(|v| v.date_naive())
            .map_err(|e| anyhow!("Can't parse \"{input}\" as a date: {e}"))?,
    };
    if !(1..=9999).contains(&date.year()) {
        return Err(anyhow!("Year of \"{input}\" is out of range"));
    }
    Ok(date)
}
