//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::FullRepository;
use crate::services::CartPolicy;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Cart admission policy (credit ceiling)
    pub policy: CartPolicy,
    /// Secret used to sign and verify access tokens
    pub jwt_secret: Arc<str>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        repository: Arc<dyn FullRepository>,
        policy: CartPolicy,
        jwt_secret: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            repository,
            policy,
            jwt_secret: jwt_secret.into(),
        }
    }
}
