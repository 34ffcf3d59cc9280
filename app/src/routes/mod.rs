pub mod auth;
pub mod invites;
pub mod workspaces;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;

use crate::{
    core::state::AppState,
    middlewares::auth::require_auth,
    routes::{
        auth::{auth_routes, protected_auth_routes},
        invites::{invite_routes, public_invite_routes},
        workspaces::workspace_routes,
    },
    utils::global_error_handler::global_error_handler,
};

pub fn create_routers(state: Arc<AppState>) -> Router<()> {
    let public_routes = Router::new()
        .merge(auth_routes())
        .merge(public_invite_routes());

    let protected_routes = Router::new()
        .merge(protected_auth_routes())
        .merge(workspace_routes())
        .merge(invite_routes())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(CorsLayer::permissive())
        .fallback(global_error_handler)
        .with_state(state)
}
