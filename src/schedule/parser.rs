//! Time-encoding parser.
//!
//! A catalog entry carries its weekly meeting times as one free-form string
//! containing zero or more session tokens of the form
//! `<Day><HH><sep><MM>-<HH><sep><MM>[ <Location>]`, e.g.
//! `"Mo09:00-12:00 SC45 We13.00-15.00 SC45"`. The parser scans the string for
//! non-overlapping token matches, ignores anything that does not match, and
//! merges duplicate time ranges (one row per lecture sub-section sharing a
//! slot) into a single session, accumulating every distinct room seen.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::api::{Session, Weekday};

/// Sentinel encodings meaning "no scheduled time".
const NO_TIME_SENTINELS: [&str; 3] = ["-", "N", "N/A"];

/// Session token pattern: a two-letter day code, an `HH:MM-HH:MM` range with
/// `:` or `.` as the separator, and an optional whitespace-delimited room.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(Mo|Tu|We|Th|Fr|Sa|Su)(\d{2})[:.](\d{2})-(\d{2})[:.](\d{2})(?:\s+(\S+))?")
            .expect("session token pattern is valid")
    })
}

/// Accumulator for one distinct (day, start, end) time range.
struct SessionGroup {
    day: Weekday,
    start_minutes: u32,
    end_minutes: u32,
    rooms: Vec<String>,
}

impl SessionGroup {
    fn into_session(self) -> Session {
        // De-duplicate rooms while preserving first-seen order.
        let mut rooms: Vec<String> = Vec::with_capacity(self.rooms.len());
        for room in self.rooms {
            if !rooms.contains(&room) {
                rooms.push(room);
            }
        }

        let location = if rooms.is_empty() {
            "-".to_string()
        } else {
            rooms.join(", ")
        };

        Session {
            day: self.day,
            start_minutes: self.start_minutes,
            end_minutes: self.end_minutes,
            location,
        }
    }
}

/// Parse a raw time encoding into weekly sessions.
///
/// Sessions are returned in the order their time range first appeared in the
/// input, not day-sorted. A missing, sentinel (`"-"`, `"N"`, `"N/A"`) or
/// entirely unparseable encoding yields an empty list; malformed fragments
/// are silently skipped rather than reported.
///
/// Inverted ranges (computed end not after start) are passed through
/// unrejected; such a session never satisfies the overlap predicate.
pub fn parse_time_encoding(encoding: &str) -> Vec<Session> {
    let trimmed = encoding.trim();
    if trimmed.is_empty() || NO_TIME_SENTINELS.contains(&trimmed) {
        return Vec::new();
    }

    let mut groups: Vec<SessionGroup> = Vec::new();

    for caps in token_pattern().captures_iter(encoding) {
        let Ok(day) = Weekday::from_str(&caps[1]) else {
            continue;
        };
        let start_minutes = minutes_since_midnight(&caps[2], &caps[3]);
        let end_minutes = minutes_since_midnight(&caps[4], &caps[5]);
        let room = caps.get(6).map(|m| m.as_str().to_string());

        let existing = groups.iter_mut().find(|g| {
            g.day == day && g.start_minutes == start_minutes && g.end_minutes == end_minutes
        });

        match existing {
            Some(group) => {
                if let Some(room) = room {
                    group.rooms.push(room);
                }
            }
            None => groups.push(SessionGroup {
                day,
                start_minutes,
                end_minutes,
                rooms: room.into_iter().collect(),
            }),
        }
    }

    groups.into_iter().map(SessionGroup::into_session).collect()
}

fn minutes_since_midnight(hours: &str, minutes: &str) -> u32 {
    // Both captures are exactly two ASCII digits by construction.
    let h: u32 = hours.parse().unwrap_or(0);
    let m: u32 = minutes.parse().unwrap_or(0);
    h * 60 + m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Weekday;

    #[test]
    fn test_single_token_with_room() {
        let sessions = parse_time_encoding("Mo09:00-12:00 Room101");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].day, Weekday::Mo);
        assert_eq!(sessions[0].start_minutes, 540);
        assert_eq!(sessions[0].end_minutes, 720);
        assert_eq!(sessions[0].location, "Room101");
    }

    #[test]
    fn test_token_without_room_uses_dash() {
        let sessions = parse_time_encoding("Tu13:30-15:00");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].location, "-");
    }

    #[test]
    fn test_dot_separator_accepted() {
        let sessions = parse_time_encoding("We08.00-09.30");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].start_minutes, 480);
        assert_eq!(sessions[0].end_minutes, 570);
    }

    #[test]
    fn test_sentinels_yield_no_sessions() {
        for encoding in ["", "-", "N", "N/A", "   "] {
            assert!(
                parse_time_encoding(encoding).is_empty(),
                "expected no sessions for {:?}",
                encoding
            );
        }
    }

    #[test]
    fn test_malformed_fragments_are_skipped() {
        assert!(parse_time_encoding("TBA").is_empty());
        assert!(parse_time_encoding("Mo9:00-12:00").is_empty()); // single-digit hour
        assert!(parse_time_encoding("Xy09:00-12:00").is_empty()); // unknown day
    }

    #[test]
    fn test_duplicate_ranges_merge_rooms() {
        let sessions = parse_time_encoding("Mo09:00-12:00 SC45 Mo09:00-12:00 SC46");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].location, "SC45, SC46");
    }

    #[test]
    fn test_duplicate_rooms_deduplicated() {
        let sessions = parse_time_encoding("Mo09:00-12:00 SC45 Mo09:00-12:00 SC45");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].location, "SC45");
    }

    #[test]
    fn test_group_discovery_order_preserved() {
        let sessions = parse_time_encoding("Fr10:00-11:00 A1 Mo08:00-09:00 B2");
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].day, Weekday::Fr);
        assert_eq!(sessions[1].day, Weekday::Mo);
    }

    #[test]
    fn test_inverted_range_passes_through() {
        let sessions = parse_time_encoding("Mo12:00-09:00");
        assert_eq!(sessions.len(), 1);
        assert!(sessions[0].start_minutes > sessions[0].end_minutes);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let encoding = "Mo09:00-12:00 SC45 We13.00-15.00 SC45";
        assert_eq!(parse_time_encoding(encoding), parse_time_encoding(encoding));
    }
}
