//! Course repository trait for catalog operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Course, CourseId};

/// Repository trait for the course catalog.
///
/// The catalog is replaced wholesale at seed time and read-only afterwards.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Replace the entire catalog.
    ///
    /// Entries without an id are assigned one; entries carrying an id keep
    /// it. Listing order is the order given.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of catalog entries stored
    /// * `Err(RepositoryError)` - If the operation fails
    async fn replace_catalog(&self, courses: Vec<Course>) -> RepositoryResult<usize>;

    /// List the full catalog in stored order.
    async fn list_courses(&self) -> RepositoryResult<Vec<Course>>;

    /// Fetch a single catalog entry by id.
    ///
    /// # Returns
    /// * `Ok(Course)` - The catalog entry
    /// * `Err(RepositoryError::NotFound)` - If no entry has this id
    async fn get_course(&self, id: CourseId) -> RepositoryResult<Course>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
