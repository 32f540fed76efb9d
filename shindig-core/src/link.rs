//! Google Calendar deep links.

use chrono::{Duration, NaiveDateTime};

/// Timestamp layout Google Calendar expects in the `dates` parameter.
const GCAL_TIMESTAMP: &str = "%Y%m%dT%H%M%SZ";

/// Prefilled "create this event" link for Google Calendar.
///
/// The window is a fixed hour from the start instant, and the name goes
/// into the query string verbatim. Chat clients linkify the result as-is,
/// so the contract is the exact layout, not URL correctness.
pub fn event_link(name: &str, start: NaiveDateTime) -> String {
    // The window end saturates at the last representable instant.
    let end = start
        .checked_add_signed(Duration::hours(1))
        .unwrap_or(NaiveDateTime::MAX);
    format!(
        "https://calendar.google.com/calendar/r/eventedit?text={}&dates={}/{}",
        name,
        start.format(GCAL_TIMESTAMP),
        end.format(GCAL_TIMESTAMP)
    )
}
