use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::Response,
};

use super::jwt::{authenticate, JwtKeys};
use crate::{error::ApiError, state::AppState};

/// Gate for protected route trees: rejects the request or attaches
/// [`AuthUser`](super::jwt::AuthUser) to its extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let user = authenticate(request.headers(), &keys)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
