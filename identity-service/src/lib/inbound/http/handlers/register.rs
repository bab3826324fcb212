use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::PersonName;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::Username;
use crate::identity::errors::PasswordError;
use crate::identity::errors::PersonNameError;
use crate::identity::errors::UsernameError;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .identity_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::CREATED, identity.into()))
}

/// HTTP request body for registering an identity (raw JSON).
///
/// No Debug derive: the body carries the plaintext password.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: String,
    surname: String,
    username: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid name: {0}")]
    Name(#[from] PersonNameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let name = PersonName::new(self.name)?;
        let surname = PersonName::new(self.surname)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(name, surname, username, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Registration confirmation; carries no secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for RegisterResponseData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            username: identity.username.as_str().to_string(),
            name: identity.name.as_str().to_string(),
            surname: identity.surname.as_str().to_string(),
            created_at: identity.created_at,
        }
    }
}
