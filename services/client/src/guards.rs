//! services/client/src/guards.rs
//!
//! Navigation-time predicates over the session store. Each guard is
//! evaluated once per navigation attempt against a point-in-time snapshot
//! (never a live subscription), and redirects through the [`Navigator`]
//! capability on failure. Guards deny but never clear the session; only the
//! transport layer and explicit logout may do that.

use docquery_core::domain::Session;
use docquery_core::policy;
use docquery_core::ports::Navigator;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

use crate::store::SessionStore;

/// How long a guard will wait for the session to settle before failing
/// closed. Bootstrap normally resolves within one round trip.
const SESSION_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Renders the login redirect for shells that need the literal path,
/// e.g. `/login?returnUrl=%2Fdocuments`.
pub fn login_redirect_path(return_url: &str) -> String {
    format!("/login?returnUrl={}", urlencoding::encode(return_url))
}

/// Reads the settled session, failing closed: if the read does not complete
/// in time the navigation is denied and the user is sent to login.
async fn read_session(store: &SessionStore, navigator: &Arc<dyn Navigator>) -> Option<Session> {
    match tokio::time::timeout(SESSION_READ_TIMEOUT, store.settled_session()).await {
        Ok(session) => Some(session),
        Err(_) => {
            error!("session read did not settle; denying navigation");
            navigator.to_login(None);
            None
        }
    }
}

/// The shared two-branch gate: unauthenticated users go to login with the
/// attempted URL preserved; authenticated users lacking the capability go
/// to the unauthorized view with no return URL (a permission failure is not
/// a login prompt).
async fn gate(
    store: &SessionStore,
    navigator: &Arc<dyn Navigator>,
    attempted_url: &str,
    allowed: fn(&Session) -> bool,
) -> bool {
    let Some(session) = read_session(store, navigator).await else {
        return false;
    };
    if !session.is_authenticated {
        navigator.to_login(Some(attempted_url));
        return false;
    }
    if allowed(&session) {
        true
    } else {
        navigator.to_unauthorized();
        false
    }
}

/// Passes for any authenticated session.
pub struct AuthGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthGuard {
    pub fn new(store: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    pub async fn can_activate(&self, attempted_url: &str) -> bool {
        let Some(session) = read_session(&self.store, &self.navigator).await else {
            return false;
        };
        if session.is_authenticated {
            true
        } else {
            self.navigator.to_login(Some(attempted_url));
            false
        }
    }
}

/// Passes for admins and super admins.
pub struct AdminGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AdminGuard {
    pub fn new(store: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    pub async fn can_activate(&self, attempted_url: &str) -> bool {
        gate(&self.store, &self.navigator, attempted_url, policy::is_admin).await
    }
}

/// Passes for sessions allowed to upload documents.
pub struct UploadGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl UploadGuard {
    pub fn new(store: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    pub async fn can_activate(&self, attempted_url: &str) -> bool {
        gate(
            &self.store,
            &self.navigator,
            attempted_url,
            policy::can_upload_documents,
        )
        .await
    }
}

/// Passes for sessions allowed to query the index.
pub struct QueryGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl QueryGuard {
    pub fn new(store: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    pub async fn can_activate(&self, attempted_url: &str) -> bool {
        gate(
            &self.store,
            &self.navigator,
            attempted_url,
            policy::can_query_documents,
        )
        .await
    }
}

/// Passes for sessions allowed to read the prompt history.
pub struct PromptHistoryGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl PromptHistoryGuard {
    pub fn new(store: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    pub async fn can_activate(&self, attempted_url: &str) -> bool {
        gate(
            &self.store,
            &self.navigator,
            attempted_url,
            policy::can_view_prompt_history,
        )
        .await
    }
}
