//! `value_parser` functions for domain enums and dates.
//!
//! The enums live in `tcc-core`, which has no clap dependency, so they are
//! parsed through their serde names instead of `ValueEnum`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tcc_core::enums::{ConsignmentStatus, EntityType, Role};

fn parse_serde_name<T: DeserializeOwned>(value: &str, expected: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_ascii_lowercase()))
        .map_err(|_| format!("invalid value '{value}', expected one of: {expected}"))
}

pub fn status(value: &str) -> Result<ConsignmentStatus, String> {
    parse_serde_name(value, "pending, dispatched, delivered")
}

pub fn role(value: &str) -> Result<Role, String> {
    parse_serde_name(value, "admin, user")
}

pub fn entity(value: &str) -> Result<EntityType, String> {
    parse_serde_name(value, "user, branch, truck, consignment, dispatch")
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as midnight UTC.
pub fn timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date '{value}', expected YYYY-MM-DD or RFC 3339"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(status("Delivered").unwrap(), ConsignmentStatus::Delivered);
        assert_eq!(role(" ADMIN ").unwrap(), Role::Admin);
        assert_eq!(entity("truck").unwrap(), EntityType::Truck);
        assert!(status("lost").unwrap_err().contains("pending, dispatched"));
    }

    #[test]
    fn timestamps_accept_dates_and_rfc3339() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(timestamp("2024-03-01").unwrap(), midnight);
        assert_eq!(timestamp("2024-03-01T05:30:00+05:30").unwrap(), midnight);
        assert!(timestamp("yesterday").is_err());
    }
}
