pub mod auth;
pub mod invites;
pub mod members;
pub mod workspaces;
