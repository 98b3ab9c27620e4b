//! Account service: registration, login, and schedule persistence.
//!
//! Orchestrates the repository and the authentication primitives. Mirrors
//! the upstream account semantics: usernames are unique, unknown-username and
//! wrong-password failures are distinct, and a successful login returns a
//! fresh access token together with the user's persisted schedule.

use uuid::Uuid;

use super::auth::{self, AuthError};
use super::cart::{AdmissionError, CartPolicy};
use crate::api::{Course, CourseId};
use crate::db::repository::RepositoryError;
use crate::db::{FullRepository, UserRecord};

/// Error type for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Registration with a username that is already taken.
    #[error("username is already taken")]
    UsernameTaken,

    /// Login with a username that does not exist.
    #[error("unknown username")]
    UnknownUsername,

    /// Login with a wrong password.
    #[error("wrong password")]
    WrongPassword,

    /// Empty or otherwise unusable credentials.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Cart admission rejection from a gated schedule mutation.
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    /// Token or digest failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A successful login: the issued token plus the stored user record.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserRecord,
}

fn validate_credentials(username: &str, password: &str) -> Result<(), AccountError> {
    if username.trim().is_empty() {
        return Err(AccountError::InvalidInput("username is empty".to_string()));
    }
    if password.is_empty() {
        return Err(AccountError::InvalidInput("password is empty".to_string()));
    }
    Ok(())
}

/// Register a new user with an empty schedule.
pub async fn register(
    repo: &dyn FullRepository,
    username: &str,
    password: &str,
) -> Result<UserRecord, AccountError> {
    validate_credentials(username, password)?;

    let username = username.trim();
    if repo.find_user_by_username(username).await?.is_some() {
        return Err(AccountError::UsernameTaken);
    }

    let record = repo
        .create_user(username, &auth::hash_password(password))
        .await
        .map_err(|err| match err {
            RepositoryError::AlreadyExists { .. } => AccountError::UsernameTaken,
            other => AccountError::Repository(other),
        })?;

    log::info!("Registered user '{}'", record.username);
    Ok(record)
}

/// Verify credentials and issue an access token.
pub async fn login(
    repo: &dyn FullRepository,
    jwt_secret: &str,
    username: &str,
    password: &str,
) -> Result<LoginOutcome, AccountError> {
    validate_credentials(username, password)?;

    let user = repo
        .find_user_by_username(username.trim())
        .await?
        .ok_or(AccountError::UnknownUsername)?;

    if !auth::verify_password(password, &user.password_hash)? {
        return Err(AccountError::WrongPassword);
    }

    let token = auth::issue_token(jwt_secret, &user.id.to_string(), &user.username)?;
    log::info!("User '{}' logged in", user.username);

    Ok(LoginOutcome { token, user })
}

/// Replace a user's persisted schedule wholesale.
pub async fn save_schedule(
    repo: &dyn FullRepository,
    user_id: Uuid,
    schedule: Vec<Course>,
) -> Result<(), AccountError> {
    repo.save_schedule(user_id, schedule).await?;
    Ok(())
}

/// Fetch a user's persisted schedule.
pub async fn fetch_schedule(
    repo: &dyn FullRepository,
    user_id: Uuid,
) -> Result<Vec<Course>, AccountError> {
    Ok(repo.fetch_schedule(user_id).await?)
}

/// Add a course to a user's stored schedule through the admission gate.
///
/// The fetch-gate-save sequence runs inside the repository's locked schedule
/// update, so concurrent adds for the same user serialize instead of racing
/// a stale cart. Rejection leaves the stored schedule unmodified.
pub async fn add_course(
    repo: &dyn FullRepository,
    policy: &CartPolicy,
    user_id: Uuid,
    candidate: &Course,
) -> Result<Vec<Course>, AccountError> {
    let mut rejection: Option<AdmissionError> = None;
    let committed = {
        let rejection = &mut rejection;
        repo.update_schedule(
            user_id,
            Box::new(move |cart| match policy.add(candidate, &cart) {
                Ok(next) => Some(next),
                Err(err) => {
                    *rejection = Some(err);
                    None
                }
            }),
        )
        .await?
    };

    if let Some(err) = rejection {
        return Err(AccountError::Admission(err));
    }
    committed.ok_or_else(|| {
        AccountError::Repository(RepositoryError::internal(
            "schedule update aborted without a rejection",
        ))
    })
}

/// Remove a course from a user's stored schedule. Removal is unconditional.
pub async fn remove_course(
    repo: &dyn FullRepository,
    policy: &CartPolicy,
    user_id: Uuid,
    course_id: CourseId,
) -> Result<Vec<Course>, AccountError> {
    let committed = repo
        .update_schedule(
            user_id,
            Box::new(move |cart| Some(policy.remove(&cart, course_id))),
        )
        .await?;

    committed.ok_or_else(|| {
        AccountError::Repository(RepositoryError::internal(
            "unconditional schedule update did not commit",
        ))
    })
}
