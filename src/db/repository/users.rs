//! User repository trait for accounts and persisted schedules.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::RepositoryResult;
use crate::api::Course;
use crate::db::models::UserRecord;

/// Mutation applied to a stored schedule while the backing store is locked.
///
/// The closure receives the current schedule and returns the schedule to
/// store, or `None` to abort and leave the stored schedule untouched.
pub type ScheduleUpdate<'a> = Box<dyn FnOnce(Vec<Course>) -> Option<Vec<Course>> + Send + 'a>;

/// Repository trait for user accounts.
///
/// A user's persisted schedule is an ordered list of course snapshots,
/// replaced wholesale on save; there is no partial cart mutation at the
/// storage level.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user with a unique username.
    ///
    /// # Returns
    /// * `Ok(UserRecord)` - The stored record with its assigned id
    /// * `Err(RepositoryError::AlreadyExists)` - If the username is taken
    async fn create_user(&self, username: &str, password_hash: &str)
        -> RepositoryResult<UserRecord>;

    /// Look up a user by username.
    async fn find_user_by_username(&self, username: &str)
        -> RepositoryResult<Option<UserRecord>>;

    /// Look up a user by id.
    async fn find_user(&self, id: Uuid) -> RepositoryResult<Option<UserRecord>>;

    /// Replace a user's persisted schedule.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the user does not exist
    async fn save_schedule(&self, user_id: Uuid, schedule: Vec<Course>) -> RepositoryResult<()>;

    /// Fetch a user's persisted schedule.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the user does not exist
    async fn fetch_schedule(&self, user_id: Uuid) -> RepositoryResult<Vec<Course>>;

    /// Atomically read, transform, and write back a user's schedule.
    ///
    /// The closure runs while the store is exclusively locked, so no other
    /// schedule mutation for any user can interleave with the
    /// read-modify-write.
    ///
    /// # Returns
    /// * `Ok(Some(schedule))` - The committed schedule
    /// * `Ok(None)` - The closure aborted; nothing was written
    /// * `Err(RepositoryError::NotFound)` - If the user does not exist
    async fn update_schedule(
        &self,
        user_id: Uuid,
        update: ScheduleUpdate<'_>,
    ) -> RepositoryResult<Option<Vec<Course>>>;
}
