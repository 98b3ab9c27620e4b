//! Core shared types for the course planner.
//!
//! This file consolidates the domain types used across the schedule engine,
//! the repository layer, and the HTTP API. All types derive
//! Serialize/Deserialize for JSON serialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Course section identifier (repository-assigned primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CourseId(pub i64);

impl CourseId {
    pub fn new(value: i64) -> Self {
        CourseId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Weekday codes used by the catalog time encoding.
///
/// Two-letter abbreviations, `Mo` through `Su`, matching the day tokens that
/// appear in raw time-encoding strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl Weekday {
    /// All weekdays in calendar order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mo,
        Weekday::Tu,
        Weekday::We,
        Weekday::Th,
        Weekday::Fr,
        Weekday::Sa,
        Weekday::Su,
    ];

    /// Two-letter code for this weekday.
    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Mo => "Mo",
            Weekday::Tu => "Tu",
            Weekday::We => "We",
            Weekday::Th => "Th",
            Weekday::Fr => "Fr",
            Weekday::Sa => "Sa",
            Weekday::Su => "Su",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mo" => Ok(Weekday::Mo),
            "Tu" => Ok(Weekday::Tu),
            "We" => Ok(Weekday::We),
            "Th" => Ok(Weekday::Th),
            "Fr" => Ok(Weekday::Fr),
            "Sa" => Ok(Weekday::Sa),
            "Su" => Ok(Weekday::Su),
            other => Err(format!("Unknown weekday code: {}", other)),
        }
    }
}

/// One weekly recurring time block derived from a course time encoding.
///
/// Sessions are derived values: they are recomputed on demand from a course's
/// raw `time` string and never stored independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Day of the week this block recurs on.
    pub day: Weekday,
    /// Start of the block, minutes since midnight.
    pub start_minutes: u32,
    /// End of the block, minutes since midnight.
    pub end_minutes: u32,
    /// De-duplicated, insertion-ordered, comma-joined room string; `"-"` if
    /// no room was supplied.
    pub location: String,
}

impl Session {
    /// Half-open interval overlap test against another session.
    ///
    /// Sessions on different days never overlap. On the same day, a session
    /// ending exactly when another starts does not overlap.
    pub fn overlaps(&self, other: &Session) -> bool {
        self.day == other.day
            && self.start_minutes < other.end_minutes
            && self.end_minutes > other.start_minutes
    }

    /// Format the time window as `H:MM - H:MM` (hour unpadded, minute
    /// zero-padded).
    pub fn format_time_range(&self) -> String {
        format!(
            "{}:{:02} - {}:{:02}",
            self.start_minutes / 60,
            self.start_minutes % 60,
            self.end_minutes / 60,
            self.end_minutes % 60
        )
    }
}

/// A course section as listed in the catalog.
///
/// `time` is the raw, free-form time encoding; the schedule engine decodes it
/// into zero or more [`Session`]s. A course whose encoding is empty or a
/// sentinel value has no sessions and can never conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identity of this catalog entry. `None` until assigned by the
    /// repository.
    #[serde(default)]
    pub id: Option<CourseId>,
    /// Course code, e.g. `"CS101"`. Multiple sections may share a code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Credit count.
    #[serde(default)]
    pub credit: u32,
    /// Raw time encoding, e.g. `"Mo09:00-12:00 SC45"`.
    #[serde(default = "Course::no_time")]
    pub time: String,
}

impl Course {
    /// Sentinel encoding meaning "no scheduled time".
    pub fn no_time() -> String {
        "-".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_roundtrip() {
        for day in Weekday::ALL {
            assert_eq!(day.code().parse::<Weekday>().unwrap(), day);
        }
    }

    #[test]
    fn test_weekday_rejects_unknown_code() {
        assert!("Xx".parse::<Weekday>().is_err());
        assert!("mo".parse::<Weekday>().is_err());
        assert!("".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_session_time_range_formatting() {
        let session = Session {
            day: Weekday::Mo,
            start_minutes: 9 * 60,
            end_minutes: 12 * 60 + 5,
            location: "-".to_string(),
        };
        assert_eq!(session.format_time_range(), "9:00 - 12:05");
    }

    #[test]
    fn test_course_deserializes_with_defaults() {
        let course: Course =
            serde_json::from_str(r#"{"code": "CS101", "name": "Intro"}"#).unwrap();
        assert_eq!(course.id, None);
        assert_eq!(course.credit, 0);
        assert_eq!(course.time, "-");
    }
}
