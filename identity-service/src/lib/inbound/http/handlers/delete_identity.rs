use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::identity::models::Username;
use crate::identity::errors::IdentityError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_identity(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let username = Username::new(username).map_err(IdentityError::from)?;

    // Delete is not idempotent: deleting an absent username is NotFound.
    state
        .identity_service
        .delete_identity(&username)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
