use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, QueryFilter, QuerySelect, RelationTrait, TransactionTrait,
};

use crate::{
    models::{
        member,
        role::Role,
        workspace::{self, ActiveModel, Entity as WorkspaceEntity, Model as Workspace},
    },
    utils::crypto::generate_uuid,
};

pub struct WorkspacesRepo {
    db: DatabaseConnection,
}

impl WorkspacesRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Workspace>, DbErr> {
        WorkspaceEntity::find()
            .filter(workspace::Column::Slug.eq(slug))
            .one(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Workspace>, DbErr> {
        WorkspaceEntity::find_by_id(id).one(&self.db).await
    }

    /// Create a workspace and its first ADMIN membership for the owner.
    /// Both rows are written in one transaction so a workspace can never
    /// exist without an ADMIN.
    pub async fn create_with_owner(
        &self,
        name: String,
        slug: String,
        owner_id: &str,
    ) -> Result<Workspace, DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().naive_utc();

        let workspace = ActiveModel {
            id: Set(generate_uuid()),
            name: Set(name),
            slug: Set(slug),
            avatar_url: Set(None),
            owner_id: Set(owner_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        member::ActiveModel {
            id: Set(generate_uuid()),
            user_id: Set(owner_id.to_string()),
            workspace_id: Set(workspace.id.clone()),
            role: Set(Role::Admin),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(workspace)
    }

    /// Workspaces where the user has a membership row
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Workspace>, DbErr> {
        WorkspaceEntity::find()
            .join(JoinType::InnerJoin, workspace::Relation::Member.def())
            .filter(member::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
    }
}
