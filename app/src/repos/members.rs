use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, ModelTrait, QueryFilter, QuerySelect, RelationTrait,
};

use crate::models::{
    member::{self, ActiveModel, Entity as MemberEntity, Model as Member},
    role::Role,
    user,
};

pub struct MembersRepo {
    db: DatabaseConnection,
}

impl MembersRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, member_id: &str) -> Result<Option<Member>, DbErr> {
        MemberEntity::find_by_id(member_id).one(&self.db).await
    }

    /// The unique membership row for (user, workspace), if any
    pub async fn find_for_user_in_workspace(
        &self,
        user_id: &str,
        workspace_id: &str,
    ) -> Result<Option<Member>, DbErr> {
        MemberEntity::find()
            .filter(member::Column::UserId.eq(user_id))
            .filter(member::Column::WorkspaceId.eq(workspace_id))
            .one(&self.db)
            .await
    }

    /// Membership row for whichever user holds this email, if that user
    /// already belongs to the workspace
    pub async fn find_by_email_in_workspace(
        &self,
        email: &str,
        workspace_id: &str,
    ) -> Result<Option<Member>, DbErr> {
        MemberEntity::find()
            .filter(member::Column::WorkspaceId.eq(workspace_id))
            .join(JoinType::InnerJoin, member::Relation::User.def())
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// All members of a workspace joined with their user display fields
    pub async fn list_with_users(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<(Member, Option<user::Model>)>, DbErr> {
        MemberEntity::find()
            .filter(member::Column::WorkspaceId.eq(workspace_id))
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
    }

    pub async fn update_role(&self, member: Member, role: Role) -> Result<Member, DbErr> {
        let mut member_model: ActiveModel = member.into();
        member_model.role = Set(role);

        member_model.update(&self.db).await
    }

    pub async fn remove(&self, member: Member) -> Result<(), DbErr> {
        member.delete(&self.db).await?;

        Ok(())
    }
}
