use sea_orm::DatabaseConnection;

use crate::{
    models::{member, workspace},
    repos::{members::MembersRepo, workspaces::WorkspacesRepo},
    utils::response::APIError,
};

/// The caller's resolved context inside one workspace: the workspace row
/// plus the caller's own membership row. Resolved fresh on every request so
/// a concurrent demotion is always seen.
#[derive(Debug)]
pub struct MembershipContext {
    pub workspace: workspace::Model,
    pub membership: member::Model,
}

impl MembershipContext {
    pub fn is_admin(&self) -> bool {
        self.membership.role.is_admin()
    }

    /// Gate for ADMIN-only operations
    pub fn require_admin(&self, action: &str) -> Result<(), APIError> {
        if !self.is_admin() {
            return Err(APIError::Unauthorized(format!(
                "You're not allowed to {}.",
                action
            )));
        }

        Ok(())
    }
}

/// Resolve the workspace addressed by slug and the caller's membership in
/// it. Fails with NotFound when the slug resolves to nothing and with
/// Unauthorized when the caller holds no membership row; a non-member
/// learns that the workspace exists but nothing more.
pub async fn resolve_membership(
    db: &DatabaseConnection,
    user_id: &str,
    slug: &str,
) -> Result<MembershipContext, APIError> {
    let workspace = WorkspacesRepo::new(db.clone())
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| APIError::NotFound("Workspace not found.".to_string()))?;

    let membership = MembersRepo::new(db.clone())
        .find_for_user_in_workspace(user_id, &workspace.id)
        .await?
        .ok_or_else(|| {
            APIError::Unauthorized("You're not a member of this workspace.".to_string())
        })?;

    Ok(MembershipContext {
        workspace,
        membership,
    })
}
