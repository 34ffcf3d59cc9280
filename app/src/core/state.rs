use sea_orm::DatabaseConnection;

use crate::config::config::Config;

/// Shared per-process state: the connection pool and the loaded config.
/// No request-scoped or role data lives here; membership is re-resolved
/// from the database on every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub database: DatabaseConnection,
    pub config: Config,
}
