//! `SeaORM` implementation of the `UserService` trait.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tokio::task;
use tracing::{info, warn};

use crate::db::{self, ConstraintViolation, Store, UpdateOutcome, User, UserChanges};
use crate::services::credentials::CredentialHasher;
use crate::services::user_service::{NewUser, UserError, UserService, UserUpdate};

const DUPLICATE_USER: &str = "User already exists (email or name)";

pub struct SeaOrmUserService {
    store: Store,
    hasher: Arc<CredentialHasher>,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, hasher: Arc<CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    /// Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = Arc::clone(&self.hasher);
        let hash = task::spawn_blocking(move || hasher.hash(&password))
            .await
            .context("Password hashing task panicked")??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, stored: Option<String>) -> bool {
        let hasher = Arc::clone(&self.hasher);
        task::spawn_blocking(move || match stored {
            Some(stored) => hasher.verify(&password, &stored),
            None => {
                hasher.verify_decoy(&password);
                false
            }
        })
        .await
        .unwrap_or(false)
    }
}

fn storage_error(err: anyhow::Error, conflict_message: &str) -> UserError {
    match db::constraint_violation(&err) {
        Some(ConstraintViolation::Unique) => {
            let detail = format!("{err:#}");
            warn!(error = %detail, "Uniqueness constraint rejected user write");
            UserError::Conflict(conflict_message.to_string())
        }
        _ => UserError::Database(format!("{err:#}")),
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register(&self, input: NewUser) -> Result<User, UserError> {
        // Fast path only; the unique constraints decide races.
        if self
            .store
            .user_exists(&input.email, &input.name)
            .await
            .map_err(|e| storage_error(e, DUPLICATE_USER))?
        {
            return Err(UserError::Conflict(DUPLICATE_USER.to_string()));
        }

        let password_hash = self.hash_password(input.password).await?;

        let user = self
            .store
            .insert_user(&input.name, &input.email, &password_hash)
            .await
            .map_err(|e| storage_error(e, DUPLICATE_USER))?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, UserError> {
        let found = self
            .store
            .get_user_by_email_with_password(email)
            .await
            .map_err(|e| UserError::Database(format!("{e:#}")))?;

        let (user, stored) = match found {
            Some((user, hash)) => (Some(user), Some(hash)),
            None => (None, None),
        };

        let verified = self.verify_password(password.to_string(), stored).await;

        match user {
            Some(user) if verified => Ok(user),
            _ => Err(UserError::InvalidCredentials),
        }
    }

    async fn update(&self, id: i32, changes: UserUpdate) -> Result<User, UserError> {
        let password_hash = match changes.password {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let outcome = self
            .store
            .update_user(
                id,
                UserChanges {
                    name: changes.name,
                    email: changes.email,
                    is_active: changes.is_active,
                    password_hash,
                },
            )
            .await
            .map_err(|e| storage_error(e, "Email or name already in use"))?;

        match outcome {
            UpdateOutcome::Updated(user) => {
                info!(user_id = user.id, "User updated");
                Ok(user)
            }
            UpdateOutcome::NotFound => Err(UserError::NotFound(id)),
            UpdateOutcome::EmailTaken => Err(UserError::Conflict("Email already in use".to_string())),
            UpdateOutcome::NameTaken => Err(UserError::Conflict("Name already in use".to_string())),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), UserError> {
        let deleted = self
            .store
            .delete_user(id)
            .await
            .map_err(|e| UserError::Database(format!("{e:#}")))?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversions_work() {
        let db_err = sea_orm::DbErr::Custom("test".to_string());
        let user_err: UserError = db_err.into();
        assert!(matches!(user_err, UserError::Database(_)));

        let other: UserError = anyhow::anyhow!("boom").into();
        assert!(matches!(other, UserError::Internal(_)));
    }

    #[test]
    fn non_constraint_storage_errors_are_database_errors() {
        let err = anyhow::Error::new(sea_orm::DbErr::Custom("connection reset".to_string()))
            .context("Failed to insert user");
        assert!(matches!(
            storage_error(err, DUPLICATE_USER),
            UserError::Database(_)
        ));
    }
}
