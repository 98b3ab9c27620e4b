//! Repository trait definitions and error types.

pub mod courses;
pub mod error;
pub mod users;

pub use courses::CourseRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use users::{ScheduleUpdate, UserRepository};

/// Combined repository surface required by the application.
pub trait FullRepository: CourseRepository + UserRepository {}

impl<T: CourseRepository + UserRepository> FullRepository for T {}
