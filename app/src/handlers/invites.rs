use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    core::state::AppState,
    models::{invite::Model as Invite, role::Role, user::Model as User},
    repos::{
        invites::InvitesRepo, members::MembersRepo, users::UsersRepo, workspaces::WorkspacesRepo,
    },
    services::membership::resolve_membership,
    utils::response::APIError,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteRequest {
    #[validate(email)]
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct CreateInviteResponse {
    pub invite_id: String,
}

/// POST /api/workspaces/:slug/invites
///
/// Precondition: caller is an ADMIN of the workspace; no outstanding invite
/// and no existing member for the target email. The invited email does not
/// have to belong to a registered user yet; the match is checked at accept
/// time against the accepting caller's own email.
pub async fn create_invite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
    Json(payload): Json<CreateInviteRequest>,
) -> Result<(StatusCode, Json<CreateInviteResponse>), APIError> {
    payload
        .validate()
        .map_err(|e| APIError::BadRequest(e.to_string()))?;

    let ctx = resolve_membership(&state.database, &user.id, &slug).await?;
    ctx.require_admin("create new invites")?;

    let invites_repo = InvitesRepo::new(state.database.clone());

    if invites_repo
        .find_outstanding(&payload.email, &ctx.workspace.id)
        .await?
        .is_some()
    {
        return Err(APIError::Conflict(
            "Another invite with same email already exists.".to_string(),
        ));
    }

    let members_repo = MembersRepo::new(state.database.clone());

    if members_repo
        .find_by_email_in_workspace(&payload.email, &ctx.workspace.id)
        .await?
        .is_some()
    {
        return Err(APIError::Conflict(
            "A member with this email already belongs to this workspace.".to_string(),
        ));
    }

    let invite = invites_repo
        .create(payload.email, payload.role, ctx.workspace.id, user.id)
        .await?;

    info!(
        "Invite {} created for {} in workspace {}",
        invite.id, invite.email, ctx.workspace.slug
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateInviteResponse {
            invite_id: invite.id,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct InviteAuthorInfo {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InviteWorkspaceInfo {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct InviteDetails {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub author: Option<InviteAuthorInfo>,
    pub workspace: InviteWorkspaceInfo,
}

#[derive(Debug, Serialize)]
pub struct GetInviteResponse {
    pub invite: InviteDetails,
}

/// GET /api/invites/:invite_id
///
/// Deliberately unauthenticated: the opaque invite id is the capability, so
/// a prospective member can preview the workspace name and inviter before
/// registering.
pub async fn get_invite(
    State(state): State<Arc<AppState>>,
    Path(invite_id): Path<String>,
) -> Result<Json<GetInviteResponse>, APIError> {
    let invite = InvitesRepo::new(state.database.clone())
        .find_by_id(&invite_id)
        .await?
        .ok_or_else(|| APIError::NotFound("Invite not found.".to_string()))?;

    let workspace = WorkspacesRepo::new(state.database.clone())
        .find_by_id(&invite.workspace_id)
        .await?
        .ok_or_else(|| APIError::NotFound("Invite not found.".to_string()))?;

    let users_repo = UsersRepo::new(state.database.clone());
    let author = match &invite.author_id {
        Some(author_id) => users_repo.get_by_id(author_id).await.ok(),
        None => None,
    };

    Ok(Json(GetInviteResponse {
        invite: InviteDetails {
            id: invite.id,
            email: invite.email,
            role: invite.role,
            created_at: invite.created_at,
            author: author.map(|a| InviteAuthorInfo {
                id: a.id,
                name: a.name,
                avatar_url: a.avatar_url,
            }),
            workspace: InviteWorkspaceInfo {
                name: workspace.name,
            },
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct ListInvitesResponse {
    pub invites: Vec<Invite>,
}

/// GET /api/workspaces/:slug/invites, open to any member
pub async fn list_workspace_invites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
) -> Result<Json<ListInvitesResponse>, APIError> {
    let ctx = resolve_membership(&state.database, &user.id, &slug).await?;

    let invites = InvitesRepo::new(state.database.clone())
        .list_for_workspace(&ctx.workspace.id)
        .await?;

    Ok(Json(ListInvitesResponse { invites }))
}

#[derive(Debug, Serialize)]
pub struct PendingInviteDetails {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub workspace: Option<PendingInviteWorkspaceInfo>,
}

#[derive(Debug, Serialize)]
pub struct PendingInviteWorkspaceInfo {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct ListPendingInvitesResponse {
    pub invites: Vec<PendingInviteDetails>,
}

/// GET /api/invites/pending: invites addressed to the caller's own email,
/// across all workspaces
pub async fn list_pending_invites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<ListPendingInvitesResponse>, APIError> {
    let invites = InvitesRepo::new(state.database.clone())
        .list_pending_for_email(&user.email)
        .await?;

    let invites = invites
        .into_iter()
        .map(|(invite, workspace)| PendingInviteDetails {
            id: invite.id,
            email: invite.email,
            role: invite.role,
            created_at: invite.created_at,
            workspace: workspace.map(|w| PendingInviteWorkspaceInfo {
                name: w.name,
                slug: w.slug,
            }),
        })
        .collect();

    Ok(Json(ListPendingInvitesResponse { invites }))
}

/// POST /api/invites/:invite_id/accept
///
/// Precondition: the invite's target email equals the caller's own email
/// and the caller is not yet a member. Postcondition: exactly one new
/// membership row with the invited role and the invite row gone, both or
/// neither.
pub async fn accept_invite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(invite_id): Path<String>,
) -> Result<StatusCode, APIError> {
    let invites_repo = InvitesRepo::new(state.database.clone());

    let invite = invites_repo
        .find_by_id(&invite_id)
        .await?
        .ok_or_else(|| APIError::NotFound("Invite not found.".to_string()))?;

    if invite.email != user.email {
        return Err(APIError::BadRequest(
            "This invite belongs to another email.".to_string(),
        ));
    }

    let members_repo = MembersRepo::new(state.database.clone());

    if members_repo
        .find_for_user_in_workspace(&user.id, &invite.workspace_id)
        .await?
        .is_some()
    {
        return Err(APIError::Conflict(
            "You're already a member of this workspace.".to_string(),
        ));
    }

    let workspace_id = invite.workspace_id.clone();
    invites_repo.accept(invite, &user.id).await?;

    info!("User {} joined workspace {}", user.email, workspace_id);

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/invites/:invite_id/reject
///
/// Same email precondition as accept; removes the invite without touching
/// the membership store.
pub async fn reject_invite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(invite_id): Path<String>,
) -> Result<StatusCode, APIError> {
    let invites_repo = InvitesRepo::new(state.database.clone());

    let invite = invites_repo
        .find_by_id(&invite_id)
        .await?
        .ok_or_else(|| APIError::NotFound("Invite not found.".to_string()))?;

    if invite.email != user.email {
        return Err(APIError::BadRequest(
            "This invite belongs to another email.".to_string(),
        ));
    }

    info!("User {} rejected invite {}", user.email, invite.id);

    invites_repo.delete(invite).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/workspaces/:slug/invites/:invite_id
///
/// ADMIN-only. An invite id belonging to a different workspace is reported
/// as not found, never as a cross-tenant hint.
pub async fn revoke_invite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path((slug, invite_id)): Path<(String, String)>,
) -> Result<StatusCode, APIError> {
    let ctx = resolve_membership(&state.database, &user.id, &slug).await?;
    ctx.require_admin("revoke an invite")?;

    let invites_repo = InvitesRepo::new(state.database.clone());

    let invite = invites_repo
        .find_by_id(&invite_id)
        .await?
        .filter(|invite| invite.workspace_id == ctx.workspace.id)
        .ok_or_else(|| APIError::NotFound("Invite not found.".to_string()))?;

    info!(
        "Invite {} for {} revoked by {}",
        invite.id, invite.email, user.email
    );

    invites_repo.delete(invite).await?;

    Ok(StatusCode::NO_CONTENT)
}
