use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::ChangePasswordCommand;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::Username;
use crate::identity::errors::IdentityError;
use crate::inbound::http::router::AppState;

pub async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let current_password = Password::new(body.current_password).map_err(IdentityError::from)?;
    let new_password = Password::new(body.new_password).map_err(IdentityError::from)?;

    state
        .identity_service
        .change_password(ChangePasswordCommand::new(
            username,
            current_password,
            new_password,
        ))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

/// HTTP request body for a password change (raw JSON).
///
/// No Debug derive: the body carries two plaintext passwords.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    username: String,
    current_password: String,
    new_password: String,
}
