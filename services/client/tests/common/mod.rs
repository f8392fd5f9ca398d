//! Shared in-memory fakes for the integration tests. The hexagonal seams
//! mean the session store, guards and upload workflow can all be exercised
//! without a network.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use docquery_core::domain::{
    AccessLevel, DocumentMetadata, LoginRequest, RegisterRequest, SelectedFile, Transcript,
    User,
};
use docquery_core::ports::{
    ApiError, ApiResult, AuthService, DocumentService, Navigator,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use client_lib::store::SessionStore;

pub fn user_with(id: i64, level: AccessLevel, query_permission: bool) -> User {
    User {
        id,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        full_name: None,
        access_level: level,
        query_permission,
        created_at: Utc::now(),
        last_login: None,
    }
}

//=========================================================================================
// Auth Fake
//=========================================================================================

pub struct FakeAuthService {
    pub me_result: Mutex<ApiResult<User>>,
    pub login_result: Mutex<ApiResult<User>>,
    pub register_result: Mutex<ApiResult<User>>,
    pub logout_result: Mutex<ApiResult<()>>,
    pub logout_calls: AtomicUsize,
}

impl FakeAuthService {
    /// No server-side session: bootstrap will settle on the cleared default.
    pub fn anonymous() -> Self {
        Self {
            me_result: Mutex::new(Err(ApiError::Unauthenticated)),
            login_result: Mutex::new(Err(ApiError::Unauthenticated)),
            register_result: Mutex::new(Err(ApiError::Unauthenticated)),
            logout_result: Mutex::new(Ok(())),
            logout_calls: AtomicUsize::new(0),
        }
    }

    /// An existing server-side session for `user`.
    pub fn with_user(user: User) -> Self {
        let fake = Self::anonymous();
        *fake.me_result.lock().unwrap() = Ok(user.clone());
        *fake.login_result.lock().unwrap() = Ok(user);
        fake
    }
}

#[async_trait]
impl AuthService for FakeAuthService {
    async fn login(&self, _request: &LoginRequest) -> ApiResult<User> {
        self.login_result.lock().unwrap().clone()
    }

    async fn register(&self, _request: &RegisterRequest) -> ApiResult<User> {
        self.register_result.lock().unwrap().clone()
    }

    async fn logout(&self) -> ApiResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout_result.lock().unwrap().clone()
    }

    async fn current_user(&self) -> ApiResult<User> {
        self.me_result.lock().unwrap().clone()
    }
}

/// A store whose bootstrap has already resolved against `auth`.
pub async fn settled_store(auth: Arc<FakeAuthService>) -> Arc<SessionStore> {
    let store = Arc::new(SessionStore::new(auth));
    store.bootstrap().await;
    store
}

//=========================================================================================
// Navigator Fake
//=========================================================================================

#[derive(Default)]
pub struct RecordingNavigator {
    pub logins: Mutex<Vec<Option<String>>>,
    pub unauthorized: AtomicUsize,
}

impl RecordingNavigator {
    pub fn login_redirects(&self) -> Vec<Option<String>> {
        self.logins.lock().unwrap().clone()
    }

    pub fn unauthorized_redirects(&self) -> usize {
        self.unauthorized.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn to_login(&self, return_url: Option<&str>) {
        self.logins
            .lock()
            .unwrap()
            .push(return_url.map(str::to_string));
    }

    fn to_unauthorized(&self) {
        self.unauthorized.fetch_add(1, Ordering::SeqCst);
    }
}

//=========================================================================================
// Document Fake
//=========================================================================================

/// Scripted upload outcomes: each call pops the next result, defaulting to
/// success once the script runs out. Every attempt is recorded.
pub struct FakeDocumentService {
    script: Mutex<VecDeque<ApiResult<()>>>,
    pub uploads: Mutex<Vec<(String, DocumentMetadata)>>,
}

impl FakeDocumentService {
    pub fn scripted(results: Vec<ApiResult<()>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn always_succeeding() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn recorded_uploads(&self) -> Vec<(String, DocumentMetadata)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentService for FakeDocumentService {
    async fn upload_document(
        &self,
        file: &SelectedFile,
        metadata: &DocumentMetadata,
    ) -> ApiResult<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((file.name.clone(), metadata.clone()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn list_transcripts(&self) -> ApiResult<Vec<Transcript>> {
        Ok(Vec::new())
    }

    async fn set_transcript_active(&self, _id: i64, _active: bool) -> ApiResult<Transcript> {
        Err(ApiError::Server("not scripted".to_string()))
    }

    async fn delete_transcript(&self, _id: i64) -> ApiResult<()> {
        Ok(())
    }
}
