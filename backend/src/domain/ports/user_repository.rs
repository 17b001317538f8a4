//! Port onto the user profile store.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
    }
}

/// Existence checks against registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether a user with this id is registered.
    async fn exists(&self, id: &UserId) -> Result<bool, UserRepositoryError>;
}
