use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::{
    models::user::{self, ActiveModel, Entity as UserEntity, Model as User},
    utils::crypto::generate_uuid,
};

pub struct UsersRepo {
    db: DatabaseConnection,
}

impl UsersRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DbErr> {
        let now = chrono::Utc::now().naive_utc();

        let user_model = ActiveModel {
            id: Set(generate_uuid()),
            name: Set(name),
            email: Set(email),
            password_hash: Set(Some(password_hash)),
            avatar_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        user_model.insert(&self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, DbErr> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))
    }

    /// Stamp the login timestamp, returning the refreshed row
    pub async fn touch_last_login(&self, user: User) -> Result<User, DbErr> {
        let now = chrono::Utc::now().naive_utc();

        let mut user_model: ActiveModel = user.into();
        user_model.last_login_at = Set(Some(now));
        user_model.updated_at = Set(now);

        user_model.update(&self.db).await
    }
}
