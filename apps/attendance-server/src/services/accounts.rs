//! Registration and login.

use api_types::{LoginRequest, RegisterRequest};
use auth::JwtManager;
use entities::User;
use record_store::{RecordStore, RecordStoreError};

use crate::error::{ServerError, ServerResult};

/// Registers a new account.
pub async fn register<S: RecordStore>(store: &S, request: RegisterRequest) -> ServerResult<User> {
    let username = request.username.trim().to_string();
    let email = request.email.trim().to_lowercase();

    if username.is_empty() {
        return Err(ServerError::Validation("username is required".to_string()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ServerError::Validation("A valid email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(ServerError::Validation("password is required".to_string()));
    }

    if store.get_user_by_username(&username).await?.is_some() {
        return Err(ServerError::Conflict("Username already taken".to_string()));
    }
    if store.get_user_by_email(&email).await?.is_some() {
        return Err(ServerError::Conflict("Email already registered".to_string()));
    }

    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    let user = store
        .create_user(User::new(username, email, password_hash))
        .await
        .map_err(|e| match e {
            RecordStoreError::AlreadyExists { .. } => {
                ServerError::Conflict("Username or email already taken".to_string())
            }
            other => ServerError::Database(other),
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(user)
}

/// Checks credentials and issues a bearer token.
pub async fn login<S: RecordStore>(
    store: &S,
    jwt_manager: &JwtManager,
    request: LoginRequest,
) -> ServerResult<(User, String)> {
    let identifier = request.username_or_email.trim();
    if identifier.is_empty() || request.password.is_empty() {
        return Err(ServerError::Validation(
            "usernameOrEmail and password are required".to_string(),
        ));
    }

    let user = match store.get_user_by_username(identifier).await? {
        Some(user) => Some(user),
        None => store.get_user_by_email(&identifier.to_lowercase()).await?,
    };
    let Some(user) = user else {
        tracing::debug!("Login for unknown account");
        return Err(ServerError::InvalidLogin);
    };

    let password = request.password;
    let stored_hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || auth::verify_password(&password, &stored_hash))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;
    if !verified {
        tracing::debug!(user_id = %user.id, "Login with wrong password");
        return Err(ServerError::InvalidLogin);
    }

    let token = jwt_manager.generate_token(user.id, &user.username, &user.email)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((user, token))
}
