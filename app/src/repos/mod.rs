pub mod invites;
pub mod members;
pub mod users;
pub mod workspaces;
