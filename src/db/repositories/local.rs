//! In-memory repository for unit testing and local development.
//!
//! All state lives behind a single `parking_lot::RwLock`; lock scopes never
//! span an await point.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::super::models::UserRecord;
use super::super::repository::{
    CourseRepository, ErrorContext, RepositoryError, RepositoryResult, ScheduleUpdate,
    UserRepository,
};
use crate::api::{Course, CourseId};

#[derive(Default)]
struct Store {
    /// Catalog in listing order.
    courses: Vec<Course>,
    next_course_id: i64,
    users: HashMap<Uuid, UserRecord>,
    /// Username -> user id index.
    usernames: HashMap<String, Uuid>,
}

/// In-memory repository backend.
#[derive(Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with a catalog.
    pub fn with_catalog(courses: Vec<Course>) -> Self {
        let repo = Self::new();
        repo.store_catalog(courses);
        repo
    }

    fn store_catalog(&self, courses: Vec<Course>) -> usize {
        let mut store = self.store.write();

        // Keep id assignment monotonic across reseeds.
        let max_given = courses
            .iter()
            .filter_map(|c| c.id.map(|id| id.value()))
            .max()
            .unwrap_or(0);
        store.next_course_id = store.next_course_id.max(max_given);

        let mut stored = Vec::with_capacity(courses.len());
        for mut course in courses {
            if course.id.is_none() {
                store.next_course_id += 1;
                course.id = Some(CourseId::new(store.next_course_id));
            }
            stored.push(course);
        }

        let count = stored.len();
        store.courses = stored;
        count
    }
}

#[async_trait]
impl CourseRepository for LocalRepository {
    async fn replace_catalog(&self, courses: Vec<Course>) -> RepositoryResult<usize> {
        Ok(self.store_catalog(courses))
    }

    async fn list_courses(&self) -> RepositoryResult<Vec<Course>> {
        Ok(self.store.read().courses.clone())
    }

    async fn get_course(&self, id: CourseId) -> RepositoryResult<Course> {
        self.store
            .read()
            .courses
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("No course with id {}", id.value()),
                    ErrorContext::new("get_course")
                        .with_entity("course")
                        .with_entity_id(id.value()),
                )
            })
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> RepositoryResult<UserRecord> {
        let mut store = self.store.write();

        if store.usernames.contains_key(username) {
            return Err(RepositoryError::already_exists_with_context(
                format!("Username '{}' is taken", username),
                ErrorContext::new("create_user").with_entity("user"),
            ));
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            schedule: Vec::new(),
        };

        store.usernames.insert(username.to_string(), record.id);
        store.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<UserRecord>> {
        let store = self.store.read();
        Ok(store
            .usernames
            .get(username)
            .and_then(|id| store.users.get(id))
            .cloned())
    }

    async fn find_user(&self, id: Uuid) -> RepositoryResult<Option<UserRecord>> {
        Ok(self.store.read().users.get(&id).cloned())
    }

    async fn save_schedule(&self, user_id: Uuid, schedule: Vec<Course>) -> RepositoryResult<()> {
        let mut store = self.store.write();
        match store.users.get_mut(&user_id) {
            Some(user) => {
                user.schedule = schedule;
                Ok(())
            }
            None => Err(RepositoryError::not_found_with_context(
                format!("No user with id {}", user_id),
                ErrorContext::new("save_schedule")
                    .with_entity("user")
                    .with_entity_id(user_id),
            )),
        }
    }

    async fn fetch_schedule(&self, user_id: Uuid) -> RepositoryResult<Vec<Course>> {
        self.store
            .read()
            .users
            .get(&user_id)
            .map(|user| user.schedule.clone())
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("No user with id {}", user_id),
                    ErrorContext::new("fetch_schedule")
                        .with_entity("user")
                        .with_entity_id(user_id),
                )
            })
    }

    async fn update_schedule(
        &self,
        user_id: Uuid,
        update: ScheduleUpdate<'_>,
    ) -> RepositoryResult<Option<Vec<Course>>> {
        // The closure runs inside the write-lock scope: the read, the
        // decision, and the write cannot interleave with other mutations.
        let mut store = self.store.write();
        let user = store.users.get_mut(&user_id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("No user with id {}", user_id),
                ErrorContext::new("update_schedule")
                    .with_entity("user")
                    .with_entity_id(user_id),
            )
        })?;

        match update(user.schedule.clone()) {
            Some(next) => {
                user.schedule = next.clone();
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }
}
