use axum::{
    Form, Json,
    extract::{
        Path, State,
        rejection::{FormRejection, JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, UserCreate, UserPatch, UserRead};
use crate::api::validation::{validate_email, validate_password, validate_user_name};
use crate::services::{NewUser, UserError, UserUpdate};

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidCredentials => Self::invalid_credentials(),
            UserError::NotFound(id) => Self::user_not_found(id),
            UserError::Conflict(msg) => Self::conflict(msg),
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Internal(msg) => Self::internal(msg),
        }
    }
}

fn validate_new_user(payload: &UserCreate) -> Result<(), ApiError> {
    validate_user_name(&payload.name)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    Ok(())
}

async fn register(state: &AppState, payload: UserCreate) -> Result<UserRead, ApiError> {
    validate_new_user(&payload)?;

    let user = state
        .user_service()
        .register(NewUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(UserRead::from(user))
}

/// `POST /users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<UserRead>), ApiError> {
    let Json(payload) = payload?;
    let user = register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /users-form`
pub async fn create_user_form(
    State(state): State<Arc<AppState>>,
    payload: Result<Form<UserCreate>, FormRejection>,
) -> Result<(StatusCode, Json<UserRead>), ApiError> {
    let Form(payload) = payload?;
    let user = register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PATCH /users/{id}`
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<UserRead>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    if let Some(name) = &payload.name {
        validate_user_name(name)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }
    if let Some(password) = &payload.password {
        validate_password(password)?;
    }

    let user = state
        .user_service()
        .update(
            id,
            UserUpdate {
                name: payload.name,
                email: payload.email,
                is_active: payload.is_active,
                password: payload.password,
            },
        )
        .await?;

    Ok(Json(UserRead::from(user)))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.user_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
