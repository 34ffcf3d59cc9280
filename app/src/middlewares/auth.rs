use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    core::state::AppState,
    repos::users::UsersRepo,
    utils::{jwt::verify_jwt, response::APIError},
};

/// Authenticate the bearer token and attach the caller's user row to the
/// request. Membership is NOT resolved here: workspace-scoped handlers do
/// that per request against the slug they were given.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(tok) if tok.starts_with("Bearer ") => &tok[7..],
        _ => {
            error!("Auth failed, missing or invalid authorization header");
            return APIError::Unauthorized("No auth token provided.".to_string()).into_response();
        }
    };

    let claims = match verify_jwt(token, &state.config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            error!("Auth failed, invalid token: {}", e);
            return APIError::Unauthorized("Invalid auth token.".to_string()).into_response();
        }
    };

    let users_repo = UsersRepo::new(state.database.clone());
    let user = match users_repo.get_by_id(&claims.sub).await {
        Ok(u) => u,
        Err(e) => {
            error!("Authenticated user not found: {}", e);
            return APIError::Unauthorized("Invalid auth token.".to_string()).into_response();
        }
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}
