//! Default-role and role-lifecycle invariants: exactly one default at all
//! times, and no deletion of roles that are still load-bearing.

use axum::Json;
use axum::extract::{Path, State};
use langhub_server::auth::Principal;
use langhub_server::{AppState, api, db};
use shared::models::{RoleCreate, RoleUpdate};
use shared::permissions::ALL_PERMISSIONS;
use shared::{AppError, Permission};

async fn setup() -> AppState {
    AppState::connect_in_memory().await.unwrap()
}

fn role_create(title: &str, is_default: bool) -> RoleCreate {
    RoleCreate {
        title: title.into(),
        is_default,
        permissions: vec![],
    }
}

#[tokio::test]
async fn seed_creates_admin_and_a_single_default_member() {
    let state = setup().await;

    let roles = db::roles::find_all(&state.pool).await.unwrap();
    assert_eq!(roles.len(), 2);

    let default = db::roles::find_default(&state.pool).await.unwrap().unwrap();
    assert_eq!(default.title, "member");

    let admin = db::roles::find_by_title(&state.pool, "admin")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.permissions.len(), ALL_PERMISSIONS.len());

    // Seeding is idempotent.
    db::roles::ensure_seed(&state.pool).await.unwrap();
    assert_eq!(db::roles::find_all(&state.pool).await.unwrap().len(), 2);
}

#[tokio::test]
async fn a_second_default_role_is_rejected() {
    let state = setup().await;

    let create_err = db::roles::create(&state.pool, role_create("other-default", true))
        .await
        .unwrap_err();
    assert!(matches!(create_err, AppError::BusinessRule { .. }), "{create_err:?}");

    // Promoting an existing role while a default exists is also rejected.
    let role = db::roles::create(&state.pool, role_create("curator", false))
        .await
        .unwrap();
    let promote_err = db::roles::update(
        &state.pool,
        role.id,
        RoleUpdate {
            title: None,
            is_default: Some(true),
            permissions: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(promote_err, AppError::BusinessRule { .. }), "{promote_err:?}");

    // Every path into the invariant reports the same policy.
    assert_eq!(create_err.to_string(), promote_err.to_string());
}

#[tokio::test]
async fn the_default_role_cannot_be_unset_or_deleted() {
    let state = setup().await;
    let default = db::roles::find_default(&state.pool).await.unwrap().unwrap();

    let unset_err = db::roles::update(
        &state.pool,
        default.id,
        RoleUpdate {
            title: None,
            is_default: Some(false),
            permissions: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(unset_err, AppError::BusinessRule { .. }), "{unset_err:?}");

    // Un-setting reports the same fixed-default policy as promotion; the two
    // rejections must not point at each other as the way out.
    let promote_err = db::roles::create(&state.pool, role_create("other-default", true))
        .await
        .unwrap_err();
    assert_eq!(unset_err.to_string(), promote_err.to_string());

    let err = db::roles::delete(&state.pool, default.id).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule { .. }), "{err:?}");
}

#[tokio::test]
async fn a_role_with_users_cannot_be_deleted() {
    let state = setup().await;
    let role = db::roles::create(&state.pool, role_create("curator", false))
        .await
        .unwrap();

    let hash = langhub_server::auth::password::hash_password("correct horse battery").unwrap();
    let user = db::users::create(
        &state.pool,
        db::users::NewUser {
            name: "Grace",
            username: "grace",
            email: "grace@example.com",
            password_hash: &hash,
            role_id: role.id,
            image_id: None,
        },
    )
    .await
    .unwrap();

    let err = db::roles::delete(&state.pool, role.id).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule { .. }), "{err:?}");

    // Once the last holder is gone, deletion succeeds.
    db::users::delete(&state.pool, user.id).await.unwrap();
    db::roles::delete(&state.pool, role.id).await.unwrap();
    assert!(
        db::roles::find_by_id(&state.pool, role.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn duplicate_titles_are_rejected_as_400() {
    let state = setup().await;

    let err = db::roles::create(&state.pool, role_create("member", false))
        .await
        .unwrap_err();
    assert_eq!(
        err.error_code().status_code(),
        http::StatusCode::BAD_REQUEST
    );
    match err {
        AppError::Duplicate { resource, field } => {
            assert_eq!(resource, "role");
            assert_eq!(field, "title");
        }
        other => panic!("expected duplicate title, got {other:?}"),
    }
}

#[tokio::test]
async fn role_administration_requires_roles_manage() {
    let state = setup().await;

    let admin_role = db::roles::find_by_title(&state.pool, "admin")
        .await
        .unwrap()
        .unwrap();
    let member_role = db::roles::find_default(&state.pool).await.unwrap().unwrap();

    let admin = Principal::new(1, admin_role.id, admin_role.permissions.iter().copied());
    let member = Principal::new(2, member_role.id, member_role.permissions.iter().copied());
    assert!(admin.has_permission(Permission::RolesManage));

    let err = api::roles::list(State(state.clone()), member.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotEnoughPermission { .. }), "{err:?}");

    let roles = api::roles::list(State(state.clone()), admin.clone())
        .await
        .unwrap()
        .0
        .data
        .unwrap();
    assert_eq!(roles.len(), 2);

    let created = api::roles::create(
        State(state.clone()),
        admin.clone(),
        Json(RoleCreate {
            title: "curator".into(),
            is_default: false,
            permissions: vec![Permission::LanguageViewByState],
        }),
    )
    .await
    .unwrap()
    .0
    .data
    .unwrap();
    assert_eq!(created.permissions, vec![Permission::LanguageViewByState]);

    api::roles::delete(State(state.clone()), admin, Path(created.id))
        .await
        .unwrap();
}
