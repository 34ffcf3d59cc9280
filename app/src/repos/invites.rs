use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, TransactionTrait,
};

use crate::{
    models::{
        invite::{self, ActiveModel, Entity as InviteEntity, Model as Invite},
        member,
        role::Role,
        workspace,
    },
    utils::crypto::generate_uuid,
};

/// The invite ledger. An invite exists exactly while it is outstanding:
/// create inserts the row, accept/reject/revoke remove it. There is no
/// status column to reset, so "already consumed" and "never existed" both
/// surface as an absent row.
pub struct InvitesRepo {
    db: DatabaseConnection,
}

impl InvitesRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, invite_id: &str) -> Result<Option<Invite>, DbErr> {
        InviteEntity::find_by_id(invite_id).one(&self.db).await
    }

    /// The outstanding invite for (email, workspace), if one exists
    pub async fn find_outstanding(
        &self,
        email: &str,
        workspace_id: &str,
    ) -> Result<Option<Invite>, DbErr> {
        InviteEntity::find()
            .filter(invite::Column::Email.eq(email))
            .filter(invite::Column::WorkspaceId.eq(workspace_id))
            .one(&self.db)
            .await
    }

    /// Insert a new outstanding invite. Precondition: no outstanding invite
    /// for (email, workspace); the unique index rejects a racing duplicate.
    pub async fn create(
        &self,
        email: String,
        role: Role,
        workspace_id: String,
        author_id: String,
    ) -> Result<Invite, DbErr> {
        let invite_model = ActiveModel {
            id: Set(generate_uuid()),
            email: Set(email),
            role: Set(role),
            workspace_id: Set(workspace_id),
            author_id: Set(Some(author_id)),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };

        invite_model.insert(&self.db).await
    }

    pub async fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Invite>, DbErr> {
        InviteEntity::find()
            .filter(invite::Column::WorkspaceId.eq(workspace_id))
            .all(&self.db)
            .await
    }

    /// Outstanding invites addressed to this email across all workspaces,
    /// each joined with its workspace
    pub async fn list_pending_for_email(
        &self,
        email: &str,
    ) -> Result<Vec<(Invite, Option<workspace::Model>)>, DbErr> {
        InviteEntity::find()
            .filter(invite::Column::Email.eq(email))
            .find_also_related(workspace::Entity)
            .all(&self.db)
            .await
    }

    /// Consume the invite by acceptance: insert the membership row with the
    /// invited role and delete the invite in one transaction. Postcondition:
    /// either both writes are visible or neither is.
    pub async fn accept(&self, invite: Invite, user_id: &str) -> Result<member::Model, DbErr> {
        let txn = self.db.begin().await?;

        let member = member::ActiveModel {
            id: Set(generate_uuid()),
            user_id: Set(user_id.to_string()),
            workspace_id: Set(invite.workspace_id.clone()),
            role: Set(invite.role.clone()),
            created_at: Set(chrono::Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;

        invite.delete(&txn).await?;

        txn.commit().await?;

        Ok(member)
    }

    /// Consume the invite without creating a membership (reject or revoke)
    pub async fn delete(&self, invite: Invite) -> Result<(), DbErr> {
        invite.delete(&self.db).await?;

        Ok(())
    }
}
