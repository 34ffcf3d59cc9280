use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string(Users::Id).primary_key())
                    .col(string(Users::Name))
                    .col(string(Users::Email))
                    .col(string_null(Users::PasswordHash))
                    .col(string_null(Users::AvatarUrl))
                    .col(timestamp(Users::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Users::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(Users::LastLoginAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        // workspaces
        manager
            .create_table(
                Table::create()
                    .table(Workspaces::Table)
                    .if_not_exists()
                    .col(string(Workspaces::Id).primary_key())
                    .col(string(Workspaces::Name))
                    .col(string(Workspaces::Slug))
                    .col(string_null(Workspaces::AvatarUrl))
                    .col(string(Workspaces::OwnerId))
                    .col(timestamp(Workspaces::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Workspaces::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workspaces_owner")
                            .from(Workspaces::Table, Workspaces::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_workspaces_slug")
                    .table(Workspaces::Table)
                    .col(Workspaces::Slug)
                    .to_owned(),
            )
            .await?;

        // members
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(string(Members::Id).primary_key())
                    .col(string(Members::UserId))
                    .col(string(Members::WorkspaceId))
                    .col(string(Members::Role))
                    .col(timestamp(Members::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_user")
                            .from(Members::Table, Members::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_workspace")
                            .from(Members::Table, Members::WorkspaceId)
                            .to(Workspaces::Table, Workspaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One membership row per (user, workspace)
        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_members_user_workspace")
                    .table(Members::Table)
                    .col(Members::UserId)
                    .col(Members::WorkspaceId)
                    .to_owned(),
            )
            .await?;

        // invites
        manager
            .create_table(
                Table::create()
                    .table(Invites::Table)
                    .if_not_exists()
                    .col(string(Invites::Id).primary_key())
                    .col(string(Invites::Email))
                    .col(string(Invites::Role))
                    .col(string(Invites::WorkspaceId))
                    .col(string_null(Invites::AuthorId))
                    .col(timestamp(Invites::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invites_workspace")
                            .from(Invites::Table, Invites::WorkspaceId)
                            .to(Workspaces::Table, Workspaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invites_author")
                            .from(Invites::Table, Invites::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One outstanding invite per (email, workspace); rows are deleted
        // on accept/reject/revoke, so plain uniqueness is enough
        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_invites_email_workspace")
                    .table(Invites::Table)
                    .col(Invites::Email)
                    .col(Invites::WorkspaceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workspaces::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    AvatarUrl,
    CreatedAt,
    UpdatedAt,
    LastLoginAt,
}

#[derive(DeriveIden)]
enum Workspaces {
    Table,
    Id,
    Name,
    Slug,
    AvatarUrl,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
    UserId,
    WorkspaceId,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Invites {
    Table,
    Id,
    Email,
    Role,
    WorkspaceId,
    AuthorId,
    CreatedAt,
}
