//! Conflict detection between a candidate course and an existing selection.
//!
//! Pure pairwise search: the candidate's sessions are parsed once, then every
//! (candidate session, existing session) pair sharing a day is tested with
//! the half-open overlap predicate. The first overlapping pair wins; there is
//! no attempt to enumerate all conflicts.

use serde::{Deserialize, Serialize};

use super::parser::parse_time_encoding;
use crate::api::{Course, Weekday};

/// Description of the first overlapping session pair found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDetail {
    /// Code of the colliding course already in the cart.
    pub course_code: String,
    /// Name of the colliding course.
    pub course_name: String,
    /// Day shared by the overlapping sessions.
    pub day: Weekday,
    /// The existing session's formatted time window.
    pub time_range: String,
}

impl ConflictDetail {
    /// Human-readable description of the collision.
    pub fn message(&self) -> String {
        format!(
            "Conflicts with {} ({}) on {} at {}",
            self.course_code, self.course_name, self.day, self.time_range
        )
    }
}

/// Outcome of a conflict check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictOutcome {
    /// No session pair overlaps.
    Clear,
    /// The first overlapping pair found.
    Conflict(ConflictDetail),
}

impl ConflictOutcome {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ConflictOutcome::Conflict(_))
    }
}

/// Check a candidate course against the courses already selected.
///
/// Iterates in cart order, then candidate-session order, then
/// existing-session order; the first overlapping pair is reported. Courses
/// without parseable sessions can never conflict.
pub fn check_conflict(candidate: &Course, cart: &[Course]) -> ConflictOutcome {
    let candidate_sessions = parse_time_encoding(&candidate.time);
    if candidate_sessions.is_empty() {
        return ConflictOutcome::Clear;
    }

    for entry in cart {
        let existing_sessions = parse_time_encoding(&entry.time);
        for candidate_session in &candidate_sessions {
            for existing_session in &existing_sessions {
                if candidate_session.overlaps(existing_session) {
                    return ConflictOutcome::Conflict(ConflictDetail {
                        course_code: entry.code.clone(),
                        course_name: entry.name.clone(),
                        day: candidate_session.day,
                        time_range: existing_session.format_time_range(),
                    });
                }
            }
        }
    }

    ConflictOutcome::Clear
}
