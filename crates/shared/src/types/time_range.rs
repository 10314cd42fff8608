//! Analytics time ranges.
//!
//! The admin UI offers four fixed windows. Upstream endpoints take the window
//! as a pair of ISO-8601 timestamps (`{startDate, endDate}`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::AppError;

/// A UI-selected analytics window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last 7 days.
    #[serde(rename = "7d")]
    Week,
    /// Last 30 days.
    #[default]
    #[serde(rename = "30d")]
    Month,
    /// Last 90 days.
    #[serde(rename = "90d")]
    Quarter,
    /// Last 365 days.
    #[serde(rename = "365d")]
    Year,
}

impl TimeRange {
    /// All selectable ranges, shortest first.
    pub const ALL: [Self; 4] = [Self::Week, Self::Month, Self::Quarter, Self::Year];

    /// Length of the window in days.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Wire form (`7d`, `30d`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "365d",
        }
    }

    /// Human label for range pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::Quarter => "Last 90 days",
            Self::Year => "Last 12 months",
        }
    }

    /// The window ending at `now`.
    #[must_use]
    pub fn date_range(self, now: DateTime<Utc>) -> DateRange {
        DateRange {
            start_date: now - Duration::days(self.days()),
            end_date: now,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            "90d" => Ok(Self::Quarter),
            "365d" => Ok(Self::Year),
            _ => Err(AppError::Validation(format!("Unknown time range: {s}"))),
        }
    }
}

/// Request body for the analytics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Inclusive start of the window.
    #[serde(serialize_with = "to_iso", deserialize_with = "from_iso")]
    pub start_date: DateTime<Utc>,
    /// Inclusive end of the window.
    #[serde(serialize_with = "to_iso", deserialize_with = "from_iso")]
    pub end_date: DateTime<Utc>,
}

impl DateRange {
    /// Creates a range, rejecting an end before the start.
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Result<Self, AppError> {
        if end_date < start_date {
            return Err(AppError::Validation(
                "End date must be after start date".to_string(),
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// True if `date` falls inside the window (inclusive on both calendar days).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date.date_naive() && date <= self.end_date.date_naive()
    }

    /// The window of the same length ending the day before this one starts.
    ///
    /// `contains` counts whole calendar days, so the two windows share no day.
    #[must_use]
    pub fn previous(&self) -> Self {
        let length = self.end_date - self.start_date;
        let end_date = self.start_date - Duration::days(1);
        Self {
            start_date: end_date - length,
            end_date,
        }
    }

    /// Length of the window in whole days.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// ISO-8601 form of the start, as sent upstream.
    #[must_use]
    pub fn start_iso(&self) -> String {
        self.start_date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// ISO-8601 form of the end, as sent upstream.
    #[must_use]
    pub fn end_iso(&self) -> String {
        self.end_date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn to_iso<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn from_iso<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case("7d", TimeRange::Week, 7)]
    #[case("30d", TimeRange::Month, 30)]
    #[case("90D", TimeRange::Quarter, 90)]
    #[case("365d", TimeRange::Year, 365)]
    fn test_parse_time_range(#[case] input: &str, #[case] expected: TimeRange, #[case] days: i64) {
        let parsed: TimeRange = input.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.days(), days);
    }

    #[test]
    fn test_parse_unknown_range_is_validation_error() {
        let err = "14d".parse::<TimeRange>().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_date_range_window() {
        let range = TimeRange::Week.date_range(noon());
        assert_eq!(range.days(), 7);
        assert_eq!(range.start_iso(), "2026-03-24T12:00:00.000Z");
        assert_eq!(range.end_iso(), "2026-03-31T12:00:00.000Z");
    }

    #[test]
    fn test_date_range_serializes_camel_case_iso() {
        let range = TimeRange::Week.date_range(noon());
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(json["startDate"], "2026-03-24T12:00:00.000Z");
        assert_eq!(json["endDate"], "2026-03-31T12:00:00.000Z");

        let back: DateRange = serde_json::from_value(json).unwrap();
        assert_eq!(back, range);
    }

    #[test]
    fn test_contains_is_inclusive_on_calendar_days() {
        let range = TimeRange::Week.date_range(noon());
        assert!(range.contains(NaiveDate::from_ymd_opt(2026, 3, 24).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2026, 3, 23).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    }

    #[test]
    fn test_previous_window_shares_no_day_with_current() {
        let range = TimeRange::Week.date_range(noon());
        let previous = range.previous();
        assert_eq!(previous.days(), 7);

        let boundary = range.start_date.date_naive();
        assert!(range.contains(boundary));
        assert!(!previous.contains(boundary));
        assert!(previous.contains(boundary.pred_opt().unwrap()));
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        assert!(DateRange::new(noon(), noon() - Duration::days(1)).is_err());
        assert!(DateRange::new(noon(), noon()).is_ok());
    }
}
