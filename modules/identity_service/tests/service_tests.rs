//! Integration tests for the identity domain service

mod common;

use chrono::Utc;
use common::{create_test_context, print_test_header};
use identity_service::contract::{IdentityError, User, UserFilter};
use identity_service::domain::repository::UserRepository;
use idgm_kit::{PageRequest, Role};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[tokio::test]
async fn test_register_then_login_opens_session() {
    print_test_header(
        "test_register_then_login_opens_session",
        "A registered customer can log in and the token resolves back to them.",
    );
    let ctx = create_test_context(None);

    let user = ctx
        .service
        .register("Ada@Example.com", "Ada Lovelace", "analytical-engine")
        .await
        .expect("registration should succeed");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, Role::Customer);
    assert!(user.password_hash.is_some());

    let (logged_in, token) = ctx
        .service
        .login("ada@example.com", "analytical-engine")
        .await
        .expect("login should succeed");
    assert_eq!(logged_in.id, user.id);
    assert_eq!(ctx.sessions.count(), 1);

    let resolved = ctx
        .service
        .user_for_session(&token.token)
        .await
        .expect("resolution should not fail")
        .expect("session should resolve");
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let ctx = create_test_context(None);
    ctx.service
        .register("dup@example.com", "First", "password-1")
        .await
        .expect("first registration");

    let result = ctx
        .service
        .register("DUP@example.com", "Second", "password-2")
        .await;

    assert!(matches!(result, Err(IdentityError::Conflict { .. })));
    assert_eq!(ctx.users.count(), 1);
}

#[tokio::test]
async fn test_registration_validation_reports_fields() {
    let ctx = create_test_context(None);

    let result = ctx.service.register("not-an-email", "", "short").await;

    match result {
        Err(IdentityError::Validation { errors }) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert!(fields.contains(&"email"));
            assert!(fields.contains(&"name"));
            assert!(fields.contains(&"password"));
        }
        other => panic!("Expected Validation error, got {:?}", other),
    }
    assert_eq!(ctx.users.count(), 0);
}

#[tokio::test]
async fn test_wrong_password_is_invalid_credentials() {
    let ctx = create_test_context(None);
    ctx.service
        .register("grace@example.com", "Grace", "cobol-forever")
        .await
        .expect("registration");

    let wrong = ctx.service.login("grace@example.com", "fortran").await;
    assert!(matches!(wrong, Err(IdentityError::InvalidCredentials)));

    let unknown = ctx.service.login("nobody@example.com", "cobol-forever").await;
    assert!(matches!(unknown, Err(IdentityError::InvalidCredentials)));

    assert_eq!(ctx.sessions.count(), 0);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let ctx = create_test_context(None);
    ctx.service
        .register("linus@example.com", "Linus", "penguins-rule")
        .await
        .expect("registration");
    let (_, token) = ctx
        .service
        .login("linus@example.com", "penguins-rule")
        .await
        .expect("login");

    ctx.service.logout(&token.token).await.expect("logout");
    // Second logout is a no-op
    ctx.service.logout(&token.token).await.expect("repeat logout");

    let resolved = ctx.service.user_for_session(&token.token).await.expect("resolve");
    assert!(resolved.is_none());
}

#[tokio::test]
async fn test_expired_session_is_absent_and_removed() {
    print_test_header(
        "test_expired_session_is_absent_and_removed",
        "Expired sessions never resolve and are deleted lazily.",
    );
    let ctx = create_test_context(None);
    ctx.service
        .register("exp@example.com", "Exp", "password-123")
        .await
        .expect("registration");
    let (_, token) = ctx
        .service
        .login("exp@example.com", "password-123")
        .await
        .expect("login");

    ctx.sessions.expire_all();

    let resolved = ctx.service.user_for_session(&token.token).await.expect("resolve");
    assert!(resolved.is_none());
    assert_eq!(ctx.sessions.count(), 0);
}

#[tokio::test]
async fn test_purge_expired_sessions() {
    let ctx = create_test_context(None);
    ctx.service
        .register("purge@example.com", "Purge", "password-123")
        .await
        .expect("registration");
    for _ in 0..3 {
        ctx.service
            .login("purge@example.com", "password-123")
            .await
            .expect("login");
    }
    assert_eq!(ctx.sessions.count(), 3);

    assert_eq!(ctx.service.purge_expired_sessions().await.expect("purge"), 0);
    ctx.sessions.expire_all();
    assert_eq!(ctx.service.purge_expired_sessions().await.expect("purge"), 3);
}

#[tokio::test]
async fn test_ensure_admin_promotes_existing_account() {
    let ctx = create_test_context(None);
    let customer = ctx
        .service
        .register("boss@example.com", "Boss", "password-123")
        .await
        .expect("registration");

    let admin = ctx
        .service
        .ensure_admin("boss@example.com", "Boss", "ignored-password")
        .await
        .expect("promotion");
    assert_eq!(admin.id, customer.id);
    assert_eq!(admin.role, Role::Admin);

    let fresh = ctx
        .service
        .ensure_admin("ops@example.com", "Ops", "password-456")
        .await
        .expect("creation");
    assert_eq!(fresh.role, Role::Admin);
    assert_eq!(ctx.users.count(), 2);
}

#[tokio::test]
async fn test_list_users_filters_by_role_and_search() {
    let ctx = create_test_context(None);
    for (email, name) in [
        ("amaka@example.com", "Amaka Obi"),
        ("bola@example.com", "Bola Ade"),
        ("chidi@example.com", "Chidi Eze"),
    ] {
        ctx.service
            .register(email, name, "password-123")
            .await
            .expect("registration");
    }
    ctx.service
        .ensure_admin("bola@example.com", "Bola Ade", "password-123")
        .await
        .expect("promotion");

    let admins = ctx
        .service
        .list_users(
            &UserFilter {
                search: None,
                role: Some(Role::Admin),
            },
            PageRequest::default(),
        )
        .await
        .expect("list");
    assert_eq!(admins.total, 1);
    assert_eq!(admins.items[0].email, "bola@example.com");

    let searched = ctx
        .service
        .list_users(
            &UserFilter {
                search: Some("EZE".to_string()),
                role: None,
            },
            PageRequest::default(),
        )
        .await
        .expect("list");
    assert_eq!(searched.total, 1);
    assert_eq!(searched.items[0].name, "Chidi Eze");
}

#[tokio::test]
async fn test_update_role_unknown_user() {
    let ctx = create_test_context(None);
    let result = ctx
        .service
        .update_role(uuid::Uuid::new_v4(), Role::Admin)
        .await;
    assert!(matches!(result, Err(IdentityError::NotFound { .. })));
}

#[tokio::test]
async fn test_new_passwords_are_stored_as_argon2() {
    print_test_header(
        "test_new_passwords_are_stored_as_argon2",
        "Registration stores a slow Argon2id hash, never the fast SHA-256 form.",
    );
    let ctx = create_test_context(None);

    let user = ctx
        .service
        .register("hopper@example.com", "Grace Hopper", "compiler-first")
        .await
        .expect("registration should succeed");

    let stored = ctx
        .users
        .find_by_id(user.id)
        .await
        .unwrap()
        .and_then(|u| u.password_hash)
        .expect("local account keeps a hash");
    assert!(stored.starts_with("$argon2id$"));
    assert!(!stored.contains("compiler-first"));
}

#[tokio::test]
async fn test_legacy_sha256_login_upgrades_hash() {
    print_test_header(
        "test_legacy_sha256_login_upgrades_hash",
        "An account hashed with salted SHA-256 still logs in and is re-hashed with Argon2id.",
    );
    let ctx = create_test_context(None);

    let salt = [3u8; 16];
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(b"difference-engine");
    let legacy = format!(
        "sha256${}${}",
        hex::encode(salt),
        hex::encode(hasher.finalize())
    );
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        email: "babbage@example.com".to_string(),
        name: "Charles Babbage".to_string(),
        role: Role::Customer,
        password_hash: Some(legacy.clone()),
        created_at: now,
        updated_at: now,
    };
    ctx.users.create(&user).await.unwrap();

    let wrong = ctx.service.login("babbage@example.com", "analytical").await;
    assert!(matches!(wrong, Err(IdentityError::InvalidCredentials)));

    let (logged_in, _) = ctx
        .service
        .login("babbage@example.com", "difference-engine")
        .await
        .expect("legacy hash still verifies");
    assert_eq!(logged_in.id, user.id);

    let upgraded = ctx
        .users
        .find_by_id(user.id)
        .await
        .unwrap()
        .and_then(|u| u.password_hash)
        .expect("hash kept");
    assert_ne!(upgraded, legacy);
    assert!(upgraded.starts_with("$argon2id$"));

    ctx.service
        .login("babbage@example.com", "difference-engine")
        .await
        .expect("upgraded hash verifies");
}
