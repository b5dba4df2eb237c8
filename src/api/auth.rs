use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, JsonFormOrQuery, LoginRequest, UserRead};

/// `POST /login`
///
/// Accepts JSON, form or query-string credentials. Unknown email and wrong password produce the
/// same 401. No session or token is issued.
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonFormOrQuery(payload): JsonFormOrQuery<LoginRequest>,
) -> Result<Json<UserRead>, ApiError> {
    let user = state
        .user_service()
        .login(&payload.email, &payload.password)
        .await?;

    tracing::debug!(user_id = user.id, "Login succeeded");

    Ok(Json(UserRead::from(user)))
}
