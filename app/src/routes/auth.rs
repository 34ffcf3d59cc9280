use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    core::state::AppState,
    handlers::auth::{authenticate_with_password, create_account, get_profile},
};

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_account))
        .route("/sessions/password", post(authenticate_with_password))
}

pub fn protected_auth_routes() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(get_profile))
}
