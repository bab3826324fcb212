use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::AuthenticateCommand;
use crate::domain::identity::models::IdentityClaims;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::Username;
use crate::identity::errors::IdentityError;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    // A username that cannot exist gets the same generic outcome as one
    // that does not exist.
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    // Out-of-bounds passwords are a validation error at login exactly as
    // at registration; nothing is silently truncated.
    let password = Password::new(body.password).map_err(IdentityError::from)?;

    state
        .identity_service
        .authenticate(AuthenticateCommand::new(username, password))
        .await
        .map_err(ApiError::from)
        .map(|ref claims| ApiSuccess::new(StatusCode::OK, claims.into()))
}

/// HTTP request body for authentication (raw JSON).
///
/// No Debug derive: the body carries the plaintext password.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    username: String,
    password: String,
}

/// Minimal identity claims for the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub id: String,
    pub username: String,
    pub name: String,
}

impl From<&IdentityClaims> for AuthenticateResponseData {
    fn from(claims: &IdentityClaims) -> Self {
        Self {
            id: claims.id.clone(),
            username: claims.username.clone(),
            name: claims.name.clone(),
        }
    }
}
