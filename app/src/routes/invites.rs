use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    core::state::AppState,
    handlers::invites::{accept_invite, get_invite, list_pending_invites, reject_invite},
};

/// Invite preview is addressable by its opaque id without authentication
pub fn public_invite_routes() -> Router<Arc<AppState>> {
    Router::new().route("/invites/:invite_id", get(get_invite))
}

pub fn invite_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/invites/pending", get(list_pending_invites))
        .route("/invites/:invite_id/accept", post(accept_invite))
        .route("/invites/:invite_id/reject", post(reject_invite))
}
