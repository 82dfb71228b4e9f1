//! End-to-end authentication flow against an in-memory database: register,
//! login, refresh, and principal resolution.

use axum::Json;
use axum::extract::{FromRequestParts, State};
use axum::http::HeaderMap;
use langhub_server::auth::{Principal, TokenKind};
use langhub_server::{AppState, api, db};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
use shared::permissions::DEFAULT_MEMBER_PERMISSIONS;
use shared::{AppError, Permission};

async fn setup() -> AppState {
    AppState::connect_in_memory().await.unwrap()
}

fn register_request(email: &str, username: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Ada Lovelace".into(),
        username: username.into(),
        email: email.into(),
        password: "correct horse battery".into(),
        image_id: None,
    }
}

async fn register(state: &AppState, email: &str, username: &str) {
    api::auth::register(
        State(state.clone()),
        Json(register_request(email, username)),
    )
    .await
    .unwrap();
}

async fn login(state: &AppState, email: &str, password: &str) -> Result<LoginResponse, AppError> {
    let response = api::auth::login(
        State(state.clone()),
        Json(LoginRequest {
            email: email.into(),
            password: password.into(),
        }),
    )
    .await?;
    Ok(response.0.data.unwrap())
}

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    headers
}

async fn resolve_principal(state: &AppState, token: &str) -> Result<Principal, AppError> {
    let request = http::Request::builder()
        .uri("/api/auth/me")
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();
    Principal::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn register_assigns_default_role_and_normalizes_email() {
    let state = setup().await;

    let response = api::auth::register(
        State(state.clone()),
        Json(register_request("  Ada@Example.COM ", "ada")),
    )
    .await
    .unwrap();
    let info = response.0.data.unwrap();

    assert_eq!(info.email, "ada@example.com");
    assert_eq!(info.role.title, "member");
    assert!(info.role.is_default);

    // Login works with a differently-cased email.
    let session = login(&state, "ADA@example.com", "correct horse battery")
        .await
        .unwrap();
    assert_eq!(session.role.title, "member");
}

#[tokio::test]
async fn register_rejects_bad_input_and_duplicates() {
    let state = setup().await;

    let mut bad_email = register_request("nope", "ada");
    bad_email.email = "nope".into();
    let err = api::auth::register(State(state.clone()), Json(bad_email))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }), "{err:?}");

    let mut short_password = register_request("ada@example.com", "ada");
    short_password.password = "short".into();
    let err = api::auth::register(State(state.clone()), Json(short_password))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }), "{err:?}");

    register(&state, "ada@example.com", "ada").await;
    let err = api::auth::register(
        State(state.clone()),
        Json(register_request("ada@example.com", "ada2")),
    )
    .await
    .unwrap_err();
    match err {
        AppError::Duplicate { resource, field } => {
            assert_eq!(resource, "user");
            assert_eq!(field, "email");
        }
        other => panic!("expected duplicate email, got {other:?}"),
    }
}

#[tokio::test]
async fn register_resolves_the_referenced_image() {
    let state = setup().await;

    let image = db::images::create(&state.pool, "avatars/ada.png").await.unwrap();

    let mut request = register_request("ada@example.com", "ada");
    request.image_id = Some(image.id);
    let info = api::auth::register(State(state.clone()), Json(request))
        .await
        .unwrap()
        .0
        .data
        .unwrap();
    let resolved = info.image.unwrap();
    assert_eq!(resolved.id, image.id);
    assert_eq!(resolved.path, "avatars/ada.png");

    // A dangling image id is rejected before the user row is written.
    let mut request = register_request("grace@example.com", "grace");
    request.image_id = Some(image.id + 1);
    let err = api::auth::register(State(state.clone()), Json(request))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }), "{err:?}");
    assert!(
        db::users::find_by_email(&state.pool, "grace@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn login_distinguishes_unknown_email_from_wrong_password() {
    let state = setup().await;
    register(&state, "ada@example.com", "ada").await;

    let err = login(&state, "nobody@example.com", "correct horse battery")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmailWrong), "{err:?}");

    let err = login(&state, "ada@example.com", "wrong password!").await.unwrap_err();
    assert!(matches!(err, AppError::PasswordWrong), "{err:?}");

    let session = login(&state, "ada@example.com", "correct horse battery")
        .await
        .unwrap();
    assert!(session.access_token_expires < session.refresh_token_expires);
}

#[tokio::test]
async fn refresh_accepts_only_the_refresh_token() {
    let state = setup().await;
    register(&state, "ada@example.com", "ada").await;
    let session = login(&state, "ada@example.com", "correct horse battery")
        .await
        .unwrap();

    let refreshed = api::auth::refresh(
        State(state.clone()),
        bearer_headers(&session.refresh_token),
    )
    .await
    .unwrap()
    .0
    .data
    .unwrap();
    state
        .jwt
        .verify(&refreshed.access_token, TokenKind::Access)
        .unwrap();

    // An access token presented to refresh is the wrong kind.
    let err = api::auth::refresh(
        State(state.clone()),
        bearer_headers(&session.access_token),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::WrongTokenType), "{err:?}");
}

#[tokio::test]
async fn disabled_account_cannot_login_or_refresh() {
    let state = setup().await;
    register(&state, "ada@example.com", "ada").await;
    let session = login(&state, "ada@example.com", "correct horse battery")
        .await
        .unwrap();

    let user = db::users::find_by_email(&state.pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    db::users::set_enabled(&state.pool, user.id, false).await.unwrap();

    let err = login(&state, "ada@example.com", "correct horse battery")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccountDisabled { .. }), "{err:?}");

    let err = api::auth::refresh(
        State(state.clone()),
        bearer_headers(&session.refresh_token),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::AccountDisabled { .. }), "{err:?}");
}

#[tokio::test]
async fn principal_carries_the_default_member_permissions() {
    let state = setup().await;
    register(&state, "ada@example.com", "ada").await;
    let session = login(&state, "ada@example.com", "correct horse battery")
        .await
        .unwrap();

    let principal = resolve_principal(&state, &session.access_token).await.unwrap();
    for p in DEFAULT_MEMBER_PERMISSIONS {
        assert!(principal.has_permission(*p), "missing {p}");
    }
    assert!(!principal.has_permission(Permission::RolesManage));

    // A refresh token is not a valid access credential.
    let err = resolve_principal(&state, &session.refresh_token).await.unwrap_err();
    assert!(matches!(err, AppError::WrongTokenType), "{err:?}");
}

#[tokio::test]
async fn token_for_a_deleted_role_is_rejected() {
    let state = setup().await;
    register(&state, "ada@example.com", "ada").await;
    let user = db::users::find_by_email(&state.pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();

    // Mint a pair bound to a role id that does not exist.
    let pair = state.jwt.issue_pair(user.id, 9999).unwrap();
    let err = resolve_principal(&state, &pair.access_token).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }), "{err:?}");
}

#[tokio::test]
async fn permission_changes_apply_on_the_next_request() {
    let state = setup().await;

    let role = db::roles::create(
        &state.pool,
        shared::models::RoleCreate {
            title: "curator".into(),
            is_default: false,
            permissions: vec![Permission::LanguageViewByState],
        },
    )
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

    let pair = state.jwt.issue_pair(user.id, role.id).unwrap();
    let principal = resolve_principal(&state, &pair.access_token).await.unwrap();
    assert!(principal.has_permission(Permission::LanguageViewByState));

    // Strip the role's permissions; the same token must lose the capability
    // on its next use.
    db::roles::update(
        &state.pool,
        role.id,
        shared::models::RoleUpdate {
            title: None,
            is_default: None,
            permissions: Some(vec![]),
        },
    )
    .await
    .unwrap();

    let principal = resolve_principal(&state, &pair.access_token).await.unwrap();
    assert!(!principal.has_permission(Permission::LanguageViewByState));
}

#[tokio::test]
async fn file_backed_database_boots_and_migrates() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("langhub-test.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = db::connect(&url).await.unwrap();
    db::migrate(&pool).await.unwrap();
    db::roles::ensure_seed(&pool).await.unwrap();

    let default = db::roles::find_default(&pool).await.unwrap().unwrap();
    assert_eq!(default.title, "member");
}
