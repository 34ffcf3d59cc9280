use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{
    core::state::AppState,
    handlers::{
        invites::{create_invite, list_workspace_invites, revoke_invite},
        members::{get_members, remove_member, update_member_role},
        workspaces::{create_workspace, list_workspaces},
    },
};

pub fn workspace_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workspaces", post(create_workspace).get(list_workspaces))
        // Invite lifecycle, workspace side
        .route(
            "/workspaces/:slug/invites",
            post(create_invite).get(list_workspace_invites),
        )
        .route("/workspaces/:slug/invites/:invite_id", delete(revoke_invite))
        // Member administration
        .route("/workspaces/:slug/members", get(get_members))
        .route(
            "/workspaces/:slug/members/:member_id",
            patch(update_member_role).delete(remove_member),
        )
}
