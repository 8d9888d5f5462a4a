//! Authentication middleware.

use std::sync::Arc;

use auth::{Claims, JwtManager};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use record_store::RecordStore;
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

/// Identity of the caller, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// User email.
    pub email: String,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = auth::AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.user_id()?,
            username: claims.username,
            email: claims.email,
        })
    }
}

/// Extracts the JWT token from the Authorization header.
fn extract_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Validates a token and resolves the caller.
fn authenticate(jwt_manager: &JwtManager, token: &str) -> Result<AuthenticatedUser, ServerError> {
    let claims = jwt_manager.validate_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        ServerError::InvalidCredential
    })?;
    AuthenticatedUser::try_from(claims).map_err(|_| ServerError::InvalidCredential)
}

/// Authentication middleware.
///
/// Rejects the request with 401 when no bearer token is present and with 403
/// when the token is invalid or expired. On success the caller is stored in
/// the request extensions as an [`AuthenticatedUser`].
pub async fn auth_middleware<S: RecordStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match extract_token(&request) {
        Some(token) => authenticate(&state.jwt_manager, token),
        None => Err(ServerError::AuthenticationRequired),
    };

    match user {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtConfig;
    use axum::body::Body;

    use super::*;

    fn request_with_header(value: &str) -> Request {
        axum::http::Request::builder()
            .uri("/data")
            .header(AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_authenticated_user_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(
            user_id,
            "asha".to_string(),
            "asha@example.com".to_string(),
            auth::DEFAULT_JWT_ISSUER,
            1,
        );

        let user = AuthenticatedUser::try_from(claims).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "asha");
        assert_eq!(user.email, "asha@example.com");
    }

    #[test]
    fn test_extract_token_valid() {
        let request = request_with_header("Bearer test-token-123");
        assert_eq!(extract_token(&request), Some("test-token-123"));
    }

    #[test]
    fn test_extract_token_missing_bearer() {
        let request = request_with_header("Basic credentials");
        assert_eq!(extract_token(&request), None);

        let request = request_with_header("Bearer ");
        assert_eq!(extract_token(&request), None);
    }

    #[test]
    fn test_authenticate_rejects_garbage() {
        let manager = JwtManager::new(JwtConfig::new("secret-key-for-middleware-tests"));
        assert!(matches!(
            authenticate(&manager, "not-a-jwt"),
            Err(ServerError::InvalidCredential)
        ));
    }
}
