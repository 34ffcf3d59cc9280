use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use moneybox::{
    config::config::Config,
    core::state::AppState,
    models::{user, workspace},
    repos::{users::UsersRepo, workspaces::WorkspacesRepo},
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with the real migrations applied. A single
/// pooled connection keeps the database alive for the whole test.
pub async fn setup_state() -> Arc<AppState> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1);

    let db = Database::connect(opt)
        .await
        .expect("connect to in-memory sqlite");

    Migrator::up(&db, None).await.expect("run migrations");

    Arc::new(AppState {
        database: db,
        config: test_config(),
    })
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        server_ip: "127.0.0.1".to_string(),
        max_connections: 1,
        min_connections: 1,
        jwt_secret: "test-secret".to_string(),
        jwt_expiry_hours: 1,
    }
}

pub async fn create_user(db: &DatabaseConnection, name: &str, email: &str) -> user::Model {
    UsersRepo::new(db.clone())
        .create(name.to_string(), email.to_string(), "hash".to_string())
        .await
        .expect("create user")
}

pub async fn create_workspace(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
    owner: &user::Model,
) -> workspace::Model {
    WorkspacesRepo::new(db.clone())
        .create_with_owner(name.to_string(), slug.to_string(), &owner.id)
        .await
        .expect("create workspace")
}
