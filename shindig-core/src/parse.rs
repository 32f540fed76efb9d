//! Field parsing for conversational input.
//!
//! Each field type the dialogues collect gets its own parse function
//! returning a `ShindigResult`, so callers can re-ask the same question on
//! bad input instead of unwinding.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{ShindigError, ShindigResult};

/// Parse an event name. Must be non-empty after trimming.
pub fn parse_event_name(input: &str) -> ShindigResult<String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ShindigError::EmptyName);
    }
    Ok(name.to_string())
}

/// Parse YYYY-MM-DD into a calendar date.
pub fn parse_event_date(input: &str) -> ShindigResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ShindigError::InvalidDate(input.to_string()))
}

/// Parse HH:MM into a time of day.
pub fn parse_event_time(input: &str) -> ShindigResult<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| ShindigError::InvalidTime(input.to_string()))
}
