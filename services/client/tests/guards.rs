//! Navigation guard tests: the two-branch redirect pattern, the admin
//! query override, and the fail-closed path when the session never settles.

mod common;

use common::{settled_store, user_with, FakeAuthService, RecordingNavigator};
use docquery_core::domain::AccessLevel;
use std::sync::Arc;

use client_lib::guards::{
    AdminGuard, AuthGuard, PromptHistoryGuard, QueryGuard, UploadGuard,
};
use client_lib::store::SessionStore;

async fn anonymous_store() -> Arc<SessionStore> {
    settled_store(Arc::new(FakeAuthService::anonymous())).await
}

async fn store_for(level: AccessLevel, query_permission: bool) -> Arc<SessionStore> {
    settled_store(Arc::new(FakeAuthService::with_user(user_with(
        1,
        level,
        query_permission,
    ))))
    .await
}

#[tokio::test]
async fn auth_guard_redirects_anonymous_users_to_login_with_return_url() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = AuthGuard::new(anonymous_store().await, navigator.clone());

    assert!(!guard.can_activate("/documents").await);
    assert_eq!(
        navigator.login_redirects(),
        vec![Some("/documents".to_string())]
    );
    assert_eq!(navigator.unauthorized_redirects(), 0);
}

#[tokio::test]
async fn auth_guard_passes_any_authenticated_session() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = AuthGuard::new(store_for(AccessLevel::User, false).await, navigator.clone());

    assert!(guard.can_activate("/dashboard").await);
    assert!(navigator.login_redirects().is_empty());
}

#[tokio::test]
async fn admin_guard_sends_anonymous_users_to_login_with_return_url() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = AdminGuard::new(anonymous_store().await, navigator.clone());

    assert!(!guard.can_activate("/manage-users").await);
    assert_eq!(
        navigator.login_redirects(),
        vec![Some("/manage-users".to_string())]
    );
    assert_eq!(navigator.unauthorized_redirects(), 0);
}

#[tokio::test]
async fn admin_guard_sends_non_admins_to_unauthorized_without_return_url() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = AdminGuard::new(store_for(AccessLevel::User, true).await, navigator.clone());

    assert!(!guard.can_activate("/manage-users").await);
    assert!(navigator.login_redirects().is_empty());
    assert_eq!(navigator.unauthorized_redirects(), 1);
}

#[tokio::test]
async fn admin_guard_passes_admins_and_super_admins() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = AdminGuard::new(store_for(AccessLevel::Admin, false).await, navigator.clone());
    assert!(guard.can_activate("/manage-users").await);

    let guard = AdminGuard::new(
        store_for(AccessLevel::SuperAdmin, false).await,
        navigator.clone(),
    );
    assert!(guard.can_activate("/manage-users").await);
    assert!(navigator.login_redirects().is_empty());
    assert_eq!(navigator.unauthorized_redirects(), 0);
}

#[tokio::test]
async fn query_guard_follows_the_flag_for_plain_users() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = QueryGuard::new(store_for(AccessLevel::User, false).await, navigator.clone());
    assert!(!guard.can_activate("/query").await);
    assert_eq!(navigator.unauthorized_redirects(), 1);

    let guard = QueryGuard::new(store_for(AccessLevel::User, true).await, navigator.clone());
    assert!(guard.can_activate("/query").await);
}

#[tokio::test]
async fn query_guard_lets_admins_through_without_the_flag() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = QueryGuard::new(store_for(AccessLevel::Admin, false).await, navigator.clone());

    assert!(guard.can_activate("/query").await);
    assert_eq!(navigator.unauthorized_redirects(), 0);
}

#[tokio::test]
async fn upload_guard_mirrors_the_admin_capability() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = UploadGuard::new(store_for(AccessLevel::User, true).await, navigator.clone());
    assert!(!guard.can_activate("/upload").await);
    assert_eq!(navigator.unauthorized_redirects(), 1);

    let guard = UploadGuard::new(store_for(AccessLevel::Admin, true).await, navigator.clone());
    assert!(guard.can_activate("/upload").await);
}

#[tokio::test]
async fn prompt_history_guard_is_admin_gated() {
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = PromptHistoryGuard::new(
        store_for(AccessLevel::User, true).await,
        navigator.clone(),
    );
    assert!(!guard.can_activate("/prompt-history").await);
    assert_eq!(navigator.unauthorized_redirects(), 1);

    let guard = PromptHistoryGuard::new(
        store_for(AccessLevel::Admin, false).await,
        navigator.clone(),
    );
    assert!(guard.can_activate("/prompt-history").await);
}

#[tokio::test(start_paused = true)]
async fn guards_fail_closed_when_the_session_never_settles() {
    // Bootstrap is never run, so the settled read can only time out.
    let store = Arc::new(SessionStore::new(Arc::new(FakeAuthService::anonymous())));
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = AdminGuard::new(store, navigator.clone());

    assert!(!guard.can_activate("/manage-users").await);
    // Fail-closed redirect carries no return URL.
    assert_eq!(navigator.login_redirects(), vec![None]);
    assert_eq!(navigator.unauthorized_redirects(), 0);
}

#[tokio::test]
async fn guards_never_clear_the_session() {
    let navigator = Arc::new(RecordingNavigator::default());
    let store = store_for(AccessLevel::User, false).await;
    let guard = AdminGuard::new(store.clone(), navigator.clone());

    assert!(!guard.can_activate("/manage-users").await);
    // Denied, but still logged in: only logout and the transport may clear.
    assert!(store.current_session().is_authenticated);
}
