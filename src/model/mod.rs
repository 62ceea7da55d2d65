//! Wire types for the MicroBank REST services.
//!
//! These are thin mirrors of the JSON the services return (camelCase on the
//! wire). The client never persists them beyond the current command.

pub mod account;
pub mod audit;
pub mod client;
pub mod transaction;

pub use account::*;
pub use audit::*;
pub use client::*;
pub use transaction::*;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a server timestamp.
///
/// The services emit either RFC 3339 (`2024-03-01T10:15:30Z`) or a bare
/// local date-time (`2024-03-01T10:15:30.123`), depending on the field.
/// Bare timestamps are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2024-03-01T10:15:30Z").unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 3);
    }

    #[test]
    fn test_parse_timestamp_naive() {
        let ts = parse_timestamp("2024-03-01T10:15:30").unwrap();
        assert_eq!(ts.day(), 1);

        let with_millis = parse_timestamp("2024-03-01T10:15:30.123");
        assert!(with_millis.is_some());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
