use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::state::AppState,
    models::{user::Model as User, workspace::Model as Workspace},
    repos::workspaces::WorkspacesRepo,
    utils::{response::APIError, slug::create_slug},
};

#[derive(Debug, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateWorkspaceResponse {
    pub workspace: Workspace,
}

/// Create a workspace; the caller becomes its first ADMIN member
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateWorkspaceRequest>,
) -> Result<(StatusCode, Json<CreateWorkspaceResponse>), APIError> {
    let slug = create_slug(&payload.name);

    if slug.is_empty() {
        return Err(APIError::BadRequest(
            "Workspace name must contain at least one alphanumeric character.".to_string(),
        ));
    }

    let workspaces_repo = WorkspacesRepo::new(state.database.clone());

    if workspaces_repo.find_by_slug(&slug).await?.is_some() {
        return Err(APIError::Conflict(
            "A workspace with this slug already exists.".to_string(),
        ));
    }

    let workspace = workspaces_repo
        .create_with_owner(payload.name, slug, &user.id)
        .await?;

    info!("Workspace {} created by {}", workspace.slug, user.email);

    Ok((
        StatusCode::CREATED,
        Json(CreateWorkspaceResponse { workspace }),
    ))
}

#[derive(Debug, Serialize)]
pub struct ListWorkspacesResponse {
    pub workspaces: Vec<Workspace>,
}

pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<ListWorkspacesResponse>, APIError> {
    let workspaces = WorkspacesRepo::new(state.database.clone())
        .list_for_user(&user.id)
        .await?;

    Ok(Json(ListWorkspacesResponse { workspaces }))
}
