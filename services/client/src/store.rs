//! services/client/src/store.rs
//!
//! The session store: the single source of truth for "who is logged in and
//! what can they do". The current [`Session`] lives in a `tokio::sync::watch`
//! channel, so every consumer sees whole-value replacements and a new
//! subscriber immediately observes the latest snapshot.
//!
//! The store is the only component that mutates the session. The transport
//! layer reaches it solely through the narrow [`SessionInvalidation`]
//! capability; guards and views only read.

use docquery_core::domain::{AccessLevel, LoginRequest, RegisterRequest, Session, User};
use docquery_core::policy;
use docquery_core::ports::{ApiResult, AuthService, SessionInvalidation};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct SessionStore {
    auth: Arc<dyn AuthService>,
    session_tx: watch::Sender<Session>,
    // Flips to true once bootstrap has resolved, success or failure.
    settled_tx: watch::Sender<bool>,
}

impl SessionStore {
    /// Creates the store with the cleared default session. Call
    /// [`SessionStore::bootstrap`] once at startup before trusting reads.
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        let (session_tx, _) = watch::channel(Session::cleared());
        let (settled_tx, _) = watch::channel(false);
        Self {
            auth,
            session_tx,
            settled_tx,
        }
    }

    //=====================================================================================
    // Reads
    //=====================================================================================

    /// The latest snapshot, synchronously. Before bootstrap resolves this is
    /// the cleared default, which is correct but may be stale for a moment;
    /// consumers that need certainty use [`SessionStore::settled_session`].
    pub fn current_session(&self) -> Session {
        self.session_tx.borrow().clone()
    }

    /// A live subscription with replay-latest semantics.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session_tx.subscribe()
    }

    /// Waits until bootstrap has resolved, then returns the current
    /// snapshot. This is what navigation guards read.
    pub async fn settled_session(&self) -> Session {
        let mut settled = self.settled_tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while this
        // borrow exists; the wait only ends by observing `true`.
        let _ = settled.wait_for(|resolved| *resolved).await;
        self.current_session()
    }

    //=====================================================================================
    // Mutating Operations
    //=====================================================================================

    /// Checks for an existing server-side session. Invoked once at startup:
    /// success restores the authenticated session, any failure (no cookie,
    /// expired cookie, network trouble) settles on the cleared default.
    pub async fn bootstrap(&self) {
        match self.auth.current_user().await {
            Ok(user) => {
                info!(user_id = user.id, "existing session restored");
                self.session_tx.send_replace(Session::authenticated(user));
            }
            Err(error) => {
                debug!(%error, "no existing session");
                self.session_tx.send_replace(Session::cleared());
            }
        }
        self.settled_tx.send_replace(true);
    }

    /// Submits credentials. On success the session becomes the returned
    /// user's authenticated snapshot; on failure it is left untouched.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        let user = self.auth.login(request).await?;
        info!(user_id = user.id, "login succeeded");
        self.session_tx
            .send_replace(Session::authenticated(user.clone()));
        Ok(user)
    }

    /// Submits registration details. Success behaves like login.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let user = self.auth.register(request).await?;
        info!(user_id = user.id, "registration succeeded");
        self.session_tx
            .send_replace(Session::authenticated(user.clone()));
        Ok(user)
    }

    /// Tears down the server-side session. The local session is cleared
    /// unconditionally: even when the server call fails, the client must
    /// never keep believing it is authenticated. A failure is still
    /// surfaced to the caller after the local state is gone.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self.auth.logout().await;
        if let Err(error) = &result {
            warn!(%error, "logout request failed; clearing local session anyway");
        }
        self.clear_session();
        result
    }

    /// Synchronously resets to the cleared session. Idempotent.
    pub fn clear_session(&self) {
        self.session_tx.send_replace(Session::cleared());
    }

    //=====================================================================================
    // Capability Queries (over the current snapshot)
    //=====================================================================================

    pub fn has_access_level(&self, required: AccessLevel) -> bool {
        policy::has_access_level(&self.current_session(), required)
    }

    pub fn is_admin(&self) -> bool {
        policy::is_admin(&self.current_session())
    }

    pub fn is_super_admin(&self) -> bool {
        policy::is_super_admin(&self.current_session())
    }

    pub fn can_upload_documents(&self) -> bool {
        policy::can_upload_documents(&self.current_session())
    }

    pub fn can_view_all_documents(&self) -> bool {
        policy::can_view_all_documents(&self.current_session())
    }

    pub fn can_query_documents(&self) -> bool {
        policy::can_query_documents(&self.current_session())
    }

    pub fn can_manage_users(&self) -> bool {
        policy::can_manage_users(&self.current_session())
    }

    pub fn can_view_prompt_history(&self) -> bool {
        policy::can_view_prompt_history(&self.current_session())
    }
}

/// The transport layer invalidates through this and nothing else.
impl SessionInvalidation for SessionStore {
    fn invalidate_session(&self) {
        warn!("remote session invalidated; clearing local state");
        self.clear_session();
    }
}
