//! Domain service for user accounts.
//!
//! Registration, credential checks, partial updates and deletion.

use thiserror::Error;

use crate::db::User;

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Deliberately carries no detail: unknown email and wrong password look the same.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Registration input; the password is plaintext until hashed by the service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

/// Domain service trait for user accounts.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates a user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Conflict`] if the email or the name is already taken,
    /// whether caught by the pre-check or by the storage uniqueness constraint.
    async fn register(&self, input: NewUser) -> Result<User, UserError>;

    /// Checks an email/password pair and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidCredentials`] for an unknown email and for a
    /// wrong password alike.
    async fn login(&self, email: &str, password: &str) -> Result<User, UserError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] for an unknown id and
    /// [`UserError::Conflict`] when the new name or email belongs to another user.
    async fn update(&self, id: i32, changes: UserUpdate) -> Result<User, UserError>;

    /// Hard-deletes a user.
    async fn delete(&self, id: i32) -> Result<(), UserError>;
}
