use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, MessageResponse, PublicUser, RegisterRequest, TokenResponse},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password_blocking, verify_password_blocking},
    },
    error::ApiError,
    extract::ValidatedJson,
    state::AppState,
    store::{NewUser, StoreError},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// Emails are stored and looked up trimmed and lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(mut payload): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.email = normalize_email(&payload.email);
    let hash = match hash_password_blocking(payload.password, state.config.password.clone()).await
    {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err(ApiError::Internal("Error registering user".into()));
        }
    };

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password_hash: hash,
    };
    let user = match state.users.create_user(new_user).await {
        Ok(u) => u,
        Err(StoreError::Duplicate(_)) => {
            warn!("email already registered");
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(ApiError::Internal("Error registering user".into()));
        }
    };

    info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(mut payload): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = normalize_email(&payload.email);
    let user = match state.users.find_user_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!("login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "find_user_by_email failed");
            return Err(ApiError::Internal("Error logging in".into()));
        }
    };

    if !verify_password_blocking(payload.password, user.password_hash.clone()).await {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::Internal("Error logging in".into())
    })?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .users
        .find_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "find_user_by_id failed");
            ApiError::Internal("Error loading user".into())
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(PublicUser {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}
