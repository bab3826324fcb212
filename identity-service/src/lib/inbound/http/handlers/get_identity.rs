use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::IdentityClaims;
use crate::domain::identity::models::Username;
use crate::identity::errors::IdentityError;
use crate::inbound::http::router::AppState;

pub async fn get_identity(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<GetIdentityResponseData>, ApiError> {
    let username = Username::new(username).map_err(IdentityError::from)?;

    state
        .identity_service
        .get_identity(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref claims| ApiSuccess::new(StatusCode::OK, claims.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetIdentityResponseData {
    pub id: String,
    pub username: String,
    pub name: String,
}

impl From<&IdentityClaims> for GetIdentityResponseData {
    fn from(claims: &IdentityClaims) -> Self {
        Self {
            id: claims.id.clone(),
            username: claims.username.clone(),
            name: claims.name.clone(),
        }
    }
}
