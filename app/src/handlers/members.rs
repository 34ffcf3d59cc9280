use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::state::AppState,
    models::{member::Model as Member, role::Role, user::Model as User},
    repos::members::MembersRepo,
    services::membership::resolve_membership,
    utils::response::APIError,
};

#[derive(Debug, Serialize)]
pub struct MemberInfo {
    pub id: String,
    pub user_id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListMembersResponse {
    pub members: Vec<MemberInfo>,
}

/// GET /api/workspaces/:slug/members, open to any member
pub async fn get_members(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
) -> Result<Json<ListMembersResponse>, APIError> {
    let ctx = resolve_membership(&state.database, &user.id, &slug).await?;

    let members = MembersRepo::new(state.database.clone())
        .list_with_users(&ctx.workspace.id)
        .await?;

    let members = members
        .into_iter()
        .filter_map(|(member, user)| user.map(|u| (member, u)))
        .map(|(member, user)| MemberInfo {
            id: member.id,
            user_id: member.user_id,
            role: member.role,
            name: user.name,
            email: user.email,
            avatar_url: user.avatar_url,
        })
        .collect();

    Ok(Json(ListMembersResponse { members }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    pub role: Role,
}

/// Look up a member and check it belongs to the given workspace. A miss on
/// either is reported as the same NotFound so a member id from another
/// tenant is indistinguishable from a nonexistent one.
async fn find_member_in_workspace(
    members_repo: &MembersRepo,
    member_id: &str,
    workspace_id: &str,
) -> Result<Member, APIError> {
    members_repo
        .find_by_id(member_id)
        .await?
        .filter(|member| member.workspace_id == workspace_id)
        .ok_or_else(|| APIError::NotFound("Member not found in this workspace.".to_string()))
}

/// PATCH /api/workspaces/:slug/members/:member_id
///
/// ADMIN-only. An ADMIN may change any member's role, including its own;
/// nothing stops a workspace from ending up with zero ADMINs.
pub async fn update_member_role(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path((slug, member_id)): Path<(String, String)>,
    Json(payload): Json<UpdateMemberRequest>,
) -> Result<StatusCode, APIError> {
    let ctx = resolve_membership(&state.database, &user.id, &slug).await?;
    ctx.require_admin("update member roles")?;

    let members_repo = MembersRepo::new(state.database.clone());
    let member = find_member_in_workspace(&members_repo, &member_id, &ctx.workspace.id).await?;

    info!(
        "Member {} in workspace {} set to {:?} by {}",
        member.id, ctx.workspace.slug, payload.role, user.email
    );

    members_repo.update_role(member, payload.role).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/workspaces/:slug/members/:member_id
///
/// Permitted for the member itself (leave workspace) or any ADMIN. The
/// departed user's financial records stay behind, keyed to their user id.
pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path((slug, member_id)): Path<(String, String)>,
) -> Result<StatusCode, APIError> {
    let ctx = resolve_membership(&state.database, &user.id, &slug).await?;

    let members_repo = MembersRepo::new(state.database.clone());
    let member = find_member_in_workspace(&members_repo, &member_id, &ctx.workspace.id).await?;

    let is_self = member.user_id == user.id;

    if !is_self && !ctx.is_admin() {
        return Err(APIError::Unauthorized(
            "Only admins or the member themselves can remove a member.".to_string(),
        ));
    }

    info!(
        "Member {} removed from workspace {} by {}",
        member.id, ctx.workspace.slug, user.email
    );

    members_repo.remove(member).await?;

    Ok(StatusCode::NO_CONTENT)
}
