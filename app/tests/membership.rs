mod common;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use common::{create_user, create_workspace, setup_state};
use moneybox::{
    handlers::{
        invites::{accept_invite, create_invite, CreateInviteRequest},
        members::{get_members, remove_member, update_member_role, UpdateMemberRequest},
        workspaces::{create_workspace as create_workspace_handler, CreateWorkspaceRequest},
    },
    models::role::Role,
    repos::{members::MembersRepo, users::UsersRepo},
    services::membership::resolve_membership,
    utils::response::APIError,
};

/// Invite `email` into `slug` and accept as `joiner`
async fn join_workspace(
    state: &std::sync::Arc<moneybox::core::state::AppState>,
    admin: &moneybox::models::user::Model,
    joiner: &moneybox::models::user::Model,
    slug: &str,
    role: Role,
) {
    let (_, Json(created)) = create_invite(
        State(state.clone()),
        Extension(admin.clone()),
        Path(slug.to_string()),
        Json(CreateInviteRequest {
            email: joiner.email.clone(),
            role,
        }),
    )
    .await
    .expect("create invite");

    accept_invite(
        State(state.clone()),
        Extension(joiner.clone()),
        Path(created.invite_id),
    )
    .await
    .expect("accept invite");
}

async fn member_id_of(
    state: &std::sync::Arc<moneybox::core::state::AppState>,
    user_id: &str,
    workspace_id: &str,
) -> String {
    MembersRepo::new(state.database.clone())
        .find_for_user_in_workspace(user_id, workspace_id)
        .await
        .unwrap()
        .expect("membership exists")
        .id
}

#[tokio::test]
async fn creating_a_workspace_bootstraps_an_admin_membership() {
    let state = setup_state().await;
    let alice = create_user(&state.database, "Alice", "alice@example.com").await;

    let (status, Json(created)) = create_workspace_handler(
        State(state.clone()),
        Extension(alice.clone()),
        Json(CreateWorkspaceRequest {
            name: "Acme Inc".to_string(),
        }),
    )
    .await
    .expect("create workspace");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.workspace.slug, "acme-inc");

    let membership = MembersRepo::new(state.database.clone())
        .find_for_user_in_workspace(&alice.id, &created.workspace.id)
        .await
        .unwrap()
        .expect("owner membership");
    assert_eq!(membership.role, Role::Admin);

    // Slug collision is a conflict
    let err = create_workspace_handler(
        State(state.clone()),
        Extension(alice.clone()),
        Json(CreateWorkspaceRequest {
            name: "Acme, Inc".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, APIError::Conflict(_)));
}

#[tokio::test]
async fn guard_splits_missing_workspace_and_missing_membership() {
    let state = setup_state().await;
    let alice = create_user(&state.database, "Alice", "alice@example.com").await;
    let mallory = create_user(&state.database, "Mallory", "mallory@example.com").await;
    create_workspace(&state.database, "Acme", "acme", &alice).await;

    let err = resolve_membership(&state.database, &alice.id, "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, APIError::NotFound(_)));

    let err = resolve_membership(&state.database, &mallory.id, "acme")
        .await
        .unwrap_err();
    assert!(matches!(err, APIError::Unauthorized(_)));

    let ctx = resolve_membership(&state.database, &alice.id, "acme")
        .await
        .expect("admin resolves");
    assert!(ctx.is_admin());
}

#[tokio::test]
async fn role_update_requires_admin_in_the_same_workspace() {
    let state = setup_state().await;
    let alice = create_user(&state.database, "Alice", "alice@example.com").await;
    let bob = create_user(&state.database, "Bob", "bob@example.com").await;
    let acme = create_workspace(&state.database, "Acme", "acme", &alice).await;
    let beta = create_workspace(&state.database, "Beta", "beta", &bob).await;

    join_workspace(&state, &alice, &bob, "acme", Role::Member).await;

    let alice_member_id = member_id_of(&state, &alice.id, &acme.id).await;
    let bob_member_id = member_id_of(&state, &bob.id, &acme.id).await;
    let beta_member_id = member_id_of(&state, &bob.id, &beta.id).await;

    // Non-admin caller
    let err = update_member_role(
        State(state.clone()),
        Extension(bob.clone()),
        Path(("acme".to_string(), alice_member_id.clone())),
        Json(UpdateMemberRequest { role: Role::Member }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, APIError::Unauthorized(_)));

    // Admin, but the target member belongs to another workspace
    let err = update_member_role(
        State(state.clone()),
        Extension(alice.clone()),
        Path(("acme".to_string(), beta_member_id)),
        Json(UpdateMemberRequest { role: Role::Member }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, APIError::NotFound(_)));

    // Admin promotes bob
    let status = update_member_role(
        State(state.clone()),
        Extension(alice.clone()),
        Path(("acme".to_string(), bob_member_id.clone())),
        Json(UpdateMemberRequest { role: Role::Admin }),
    )
    .await
    .expect("promote");
    assert_eq!(status, StatusCode::NO_CONTENT);

    let bob_membership = MembersRepo::new(state.database.clone())
        .find_by_id(&bob_member_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bob_membership.role, Role::Admin);
}

#[tokio::test]
async fn sole_admin_may_demote_itself() {
    // Nothing guards the last ADMIN; the workspace is left without one
    let state = setup_state().await;
    let alice = create_user(&state.database, "Alice", "alice@example.com").await;
    let acme = create_workspace(&state.database, "Acme", "acme", &alice).await;

    let alice_member_id = member_id_of(&state, &alice.id, &acme.id).await;

    let status = update_member_role(
        State(state.clone()),
        Extension(alice.clone()),
        Path(("acme".to_string(), alice_member_id.clone())),
        Json(UpdateMemberRequest { role: Role::Member }),
    )
    .await
    .expect("self-demote");
    assert_eq!(status, StatusCode::NO_CONTENT);

    let ctx = resolve_membership(&state.database, &alice.id, "acme")
        .await
        .unwrap();
    assert!(!ctx.is_admin());
}

#[tokio::test]
async fn member_removal_matrix() {
    let state = setup_state().await;
    let alice = create_user(&state.database, "Alice", "alice@example.com").await;
    let bob = create_user(&state.database, "Bob", "bob@example.com").await;
    let carol = create_user(&state.database, "Carol", "carol@example.com").await;
    let acme = create_workspace(&state.database, "Acme", "acme", &alice).await;

    join_workspace(&state, &alice, &bob, "acme", Role::Member).await;
    join_workspace(&state, &alice, &carol, "acme", Role::Member).await;

    let bob_member_id = member_id_of(&state, &bob.id, &acme.id).await;
    let carol_member_id = member_id_of(&state, &carol.id, &acme.id).await;

    // A non-admin cannot remove someone else
    let err = remove_member(
        State(state.clone()),
        Extension(bob.clone()),
        Path(("acme".to_string(), carol_member_id.clone())),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, APIError::Unauthorized(_)));

    // Self-removal works for a non-admin
    let status = remove_member(
        State(state.clone()),
        Extension(bob.clone()),
        Path(("acme".to_string(), bob_member_id.clone())),
    )
    .await
    .expect("bob leaves");
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The membership is gone but the account survives
    let members_repo = MembersRepo::new(state.database.clone());
    assert!(members_repo
        .find_by_id(&bob_member_id)
        .await
        .unwrap()
        .is_none());
    assert!(UsersRepo::new(state.database.clone())
        .get_by_id(&bob.id)
        .await
        .is_ok());

    let err = resolve_membership(&state.database, &bob.id, "acme")
        .await
        .unwrap_err();
    assert!(matches!(err, APIError::Unauthorized(_)));

    // An admin removes another member
    let status = remove_member(
        State(state.clone()),
        Extension(alice.clone()),
        Path(("acme".to_string(), carol_member_id.clone())),
    )
    .await
    .expect("admin removes carol");
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(members_repo
        .find_by_id(&carol_member_id)
        .await
        .unwrap()
        .is_none());

    // Removing a member of another workspace reports NotFound
    let beta = create_workspace(&state.database, "Beta", "beta", &bob).await;
    let beta_member_id = member_id_of(&state, &bob.id, &beta.id).await;
    let err = remove_member(
        State(state.clone()),
        Extension(alice.clone()),
        Path(("acme".to_string(), beta_member_id)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, APIError::NotFound(_)));
}

#[tokio::test]
async fn members_are_listed_with_user_fields() {
    let state = setup_state().await;
    let alice = create_user(&state.database, "Alice", "alice@example.com").await;
    let bob = create_user(&state.database, "Bob", "bob@example.com").await;
    create_workspace(&state.database, "Acme", "acme", &alice).await;

    join_workspace(&state, &alice, &bob, "acme", Role::Member).await;

    let Json(res) = get_members(
        State(state.clone()),
        Extension(bob.clone()),
        Path("acme".to_string()),
    )
    .await
    .expect("any member may list");
    assert_eq!(res.members.len(), 2);

    let alice_entry = res
        .members
        .iter()
        .find(|m| m.email == "alice@example.com")
        .expect("alice listed");
    assert_eq!(alice_entry.role, Role::Admin);
    assert_eq!(alice_entry.name, "Alice");

    let outsider = create_user(&state.database, "Mallory", "mallory@example.com").await;
    let err = get_members(
        State(state.clone()),
        Extension(outsider),
        Path("acme".to_string()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, APIError::Unauthorized(_)));
}
