//! Session lifecycle tests: bootstrap, login, register, logout and the
//! invalidation capability, all against the in-memory auth fake.

mod common;

use common::{settled_store, user_with, FakeAuthService};
use docquery_core::domain::{AccessLevel, LoginRequest, RegisterRequest};
use docquery_core::ports::{ApiError, SessionInvalidation};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use client_lib::store::SessionStore;

fn login_request() -> LoginRequest {
    LoginRequest {
        email: "user@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

#[tokio::test]
async fn bootstrap_restores_an_existing_session() {
    let user = user_with(7, AccessLevel::Admin, true);
    let store = settled_store(Arc::new(FakeAuthService::with_user(user.clone()))).await;

    let session = store.current_session();
    assert!(session.is_authenticated);
    assert_eq!(session.user, Some(user));
    assert_eq!(session.access_level, Some(AccessLevel::Admin));
}

#[tokio::test]
async fn bootstrap_failure_settles_on_the_cleared_session() {
    let store = settled_store(Arc::new(FakeAuthService::anonymous())).await;

    let session = store.current_session();
    assert!(!session.is_authenticated);
    assert!(session.user.is_none());
}

#[tokio::test]
async fn settled_session_waits_for_bootstrap() {
    let user = user_with(3, AccessLevel::User, true);
    let store = Arc::new(SessionStore::new(Arc::new(FakeAuthService::with_user(
        user.clone(),
    ))));

    // Subscribe to the settled value before bootstrap has run.
    let reader = {
        let store = store.clone();
        tokio::spawn(async move { store.settled_session().await })
    };

    store.bootstrap().await;

    let session = reader.await.expect("reader task panicked");
    assert!(session.is_authenticated);
    assert_eq!(session.user, Some(user));
}

#[tokio::test]
async fn login_success_replaces_the_session() {
    let store = settled_store(Arc::new(FakeAuthService::anonymous())).await;
    assert!(!store.current_session().is_authenticated);

    let auth = Arc::new(FakeAuthService::with_user(user_with(
        1,
        AccessLevel::User,
        true,
    )));
    let store = settled_store(auth).await;

    let user = store.login(&login_request()).await.expect("login failed");
    assert_eq!(user.id, 1);
    assert!(store.current_session().is_authenticated);
}

#[tokio::test]
async fn login_failure_leaves_the_session_untouched() {
    // Bootstrapped as user 7, then a later (failed) login attempt.
    let auth = Arc::new(FakeAuthService::with_user(user_with(
        7,
        AccessLevel::User,
        true,
    )));
    *auth.login_result.lock().unwrap() = Err(ApiError::Validation(
        "Invalid email or password.".to_string(),
    ));
    let store = settled_store(auth).await;

    let error = store.login(&login_request()).await.unwrap_err();
    assert!(matches!(error, ApiError::Validation(_)));

    let session = store.current_session();
    assert!(session.is_authenticated);
    assert_eq!(session.user.map(|u| u.id), Some(7));
}

#[tokio::test]
async fn register_success_authenticates_the_new_user() {
    let auth = Arc::new(FakeAuthService::anonymous());
    *auth.register_result.lock().unwrap() = Ok(user_with(42, AccessLevel::User, false));
    let store = settled_store(auth).await;

    let request = RegisterRequest {
        first_name: "New".to_string(),
        last_name: "Account".to_string(),
        email: "new@example.com".to_string(),
        password: "hunter2".to_string(),
    };
    let user = store.register(&request).await.expect("register failed");
    assert_eq!(user.id, 42);
    assert!(store.current_session().is_authenticated);
}

#[tokio::test]
async fn register_conflict_leaves_the_session_cleared() {
    let auth = Arc::new(FakeAuthService::anonymous());
    *auth.register_result.lock().unwrap() = Err(ApiError::Conflict(
        "An account with this email already exists.".to_string(),
    ));
    let store = settled_store(auth).await;

    let error = store
        .register(&RegisterRequest {
            first_name: "Dup".to_string(),
            last_name: "User".to_string(),
            email: "dup@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Conflict(_)));
    assert!(!store.current_session().is_authenticated);
}

#[tokio::test]
async fn logout_clears_the_session_on_success() {
    let auth = Arc::new(FakeAuthService::with_user(user_with(
        1,
        AccessLevel::Admin,
        true,
    )));
    let store = settled_store(auth.clone()).await;
    assert!(store.current_session().is_authenticated);

    store.logout().await.expect("logout failed");
    assert!(!store.current_session().is_authenticated);
    assert_eq!(auth.logout_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn logout_clears_the_session_even_when_the_server_call_fails() {
    let auth = Arc::new(FakeAuthService::with_user(user_with(
        1,
        AccessLevel::Admin,
        true,
    )));
    *auth.logout_result.lock().unwrap() = Err(ApiError::Connectivity);
    let store = settled_store(auth).await;

    let result = store.logout().await;
    assert!(matches!(result, Err(ApiError::Connectivity)));
    // The failure is surfaced, but locally we are logged out regardless.
    assert!(!store.current_session().is_authenticated);
}

#[tokio::test]
async fn invalidation_capability_clears_the_session() {
    let store = settled_store(Arc::new(FakeAuthService::with_user(user_with(
        1,
        AccessLevel::User,
        true,
    ))))
    .await;
    assert!(store.current_session().is_authenticated);

    let invalidation: &dyn SessionInvalidation = store.as_ref();
    invalidation.invalidate_session();
    assert!(!store.current_session().is_authenticated);

    // Idempotent: a second invalidation is harmless.
    invalidation.invalidate_session();
    assert!(!store.current_session().is_authenticated);
}

#[tokio::test]
async fn subscribers_replay_the_latest_value_and_see_changes() {
    let store = settled_store(Arc::new(FakeAuthService::with_user(user_with(
        5,
        AccessLevel::User,
        true,
    ))))
    .await;

    // A late subscriber immediately observes the current snapshot.
    let mut rx = store.subscribe();
    assert!(rx.borrow().is_authenticated);

    store.clear_session();
    rx.changed().await.expect("store dropped");
    assert!(!rx.borrow().is_authenticated);
}

#[tokio::test]
async fn capability_queries_follow_the_current_snapshot() {
    let store = settled_store(Arc::new(FakeAuthService::with_user(user_with(
        9,
        AccessLevel::Admin,
        false,
    ))))
    .await;

    assert!(store.is_admin());
    assert!(!store.is_super_admin());
    assert!(store.can_upload_documents());
    // Admin override: the stored flag is false.
    assert!(store.can_query_documents());

    store.clear_session();
    assert!(!store.is_admin());
    assert!(!store.can_query_documents());
}
