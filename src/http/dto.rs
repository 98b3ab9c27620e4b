//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Core types (courses, sessions, conflict details) already derive
//! Serialize/Deserialize and are re-exported here.

use serde::{Deserialize, Serialize};

// Re-export core types that appear directly in API payloads.
pub use crate::api::{Course, CourseId, Session, Weekday};
pub use crate::schedule::ConflictDetail;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Catalog listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
    pub total: usize,
}

/// Request body for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Response for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Request body for login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    /// The user's persisted schedule (cart).
    pub schedule: Vec<Course>,
}

impl From<crate::db::UserRecord> for UserDto {
    fn from(record: crate::db::UserRecord) -> Self {
        Self {
            id: record.id.to_string(),
            username: record.username,
            schedule: record.schedule,
        }
    }
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}

/// The persisted schedule, as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<Course>,
    pub total_credits: u32,
}

impl ScheduleResponse {
    pub fn new(schedule: Vec<Course>) -> Self {
        let total_credits = schedule.iter().map(|c| c.credit).sum();
        Self {
            schedule,
            total_credits,
        }
    }
}

/// Request body for replacing the persisted schedule wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveScheduleRequest {
    pub cart: Vec<Course>,
}

/// Request body for adding a catalog course through the admission gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCourseRequest {
    pub course_id: CourseId,
}

/// Request body for a pure admission check.
///
/// When `cart` is omitted the authenticated user's stored schedule is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCheckRequest {
    pub candidate: Course,
    #[serde(default)]
    pub cart: Option<Vec<Course>>,
}

/// Outcome of a pure admission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCheckResponse {
    /// Whether the candidate would be admitted.
    pub admitted: bool,
    /// Machine-readable rejection code, when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable rejection reason, when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Conflict description, when the rejection is a time conflict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ConflictDetail>,
}

impl CartCheckResponse {
    pub fn admitted() -> Self {
        Self {
            admitted: true,
            code: None,
            reason: None,
            conflict: None,
        }
    }

    pub fn rejected(err: crate::services::AdmissionError) -> Self {
        let conflict = match &err {
            crate::services::AdmissionError::TimeConflict(detail) => Some(detail.clone()),
            _ => None,
        };
        Self {
            admitted: false,
            code: Some(err.code().to_string()),
            reason: Some(err.to_string()),
            conflict,
        }
    }
}
