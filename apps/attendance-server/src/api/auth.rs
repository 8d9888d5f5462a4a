//! Authentication API endpoints.

use std::sync::Arc;

use api_types::{CurrentUserResponse, LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use axum::{Extension, Json, extract::State, http::StatusCode};
use record_store::RecordStore;

use super::ApiJson;
use crate::error::{ServerError, ServerResult};
use crate::middleware::AuthenticatedUser;
use crate::services::accounts;
use crate::state::AppState;

/// Registers a new account.
pub async fn register<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ServerResult<(StatusCode, Json<MessageResponse>)> {
    accounts::register(&state.store, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Exchanges a username or email and password for a bearer token.
pub async fn login<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ServerResult<Json<TokenResponse>> {
    let (_, token) = accounts::login(&state.store, &state.jwt_manager, request).await?;

    Ok(Json(TokenResponse {
        token,
        expires_in: state.jwt_manager.expiration_seconds(),
    }))
}

/// Gets the current user.
pub async fn get_current_user<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<CurrentUserResponse>> {
    let db_user = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(CurrentUserResponse::from(&db_user)))
}
