//! Storage-facing record types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::Course;

/// Stored user account with the persisted course selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    /// Salted password digest, never the password itself.
    pub password_hash: String,
    /// The user's saved cart, ordered as selected.
    #[serde(default)]
    pub schedule: Vec<Course>,
}
