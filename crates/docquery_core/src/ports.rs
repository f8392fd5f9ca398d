//! crates/docquery_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete HTTP transport and of whatever
//! shell (console, desktop, web view) hosts the client.

use async_trait::async_trait;

use crate::domain::{
    DocumentMetadata, LoginRequest, PromptFilters, PromptHistoryPage, QueryAnswer,
    RegisterRequest, SelectedFile, Transcript, User, UserPage, PermissionUpdate,
};

//=========================================================================================
// Error Taxonomy
//=========================================================================================

/// Classified failure of a remote operation.
///
/// The `Display` strings double as the user-facing messages: the generic
/// variants carry a fixed retry prompt, while `Validation` and `Conflict`
/// surface the backend's own `detail` text verbatim.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// No response at all (DNS failure, refused connection, timeout).
    #[error("Unable to connect to the server. Please check your connection.")]
    Connectivity,
    /// The server no longer recognizes our session (401).
    #[error("Your session has expired. Please log in again.")]
    Unauthenticated,
    /// The server recognizes us but refuses this action (403).
    #[error("You do not have permission to perform this action.")]
    Forbidden,
    /// The server rejected the request's content (400/422).
    #[error("{0}")]
    Validation(String),
    /// The request clashed with existing state, e.g. a duplicate account (409).
    #[error("{0}")]
    Conflict(String),
    /// Anything else the server reported.
    #[error("The server reported an error: {0}")]
    Server(String),
}

/// A convenience type alias for `Result<T, ApiError>`.
pub type ApiResult<T> = Result<T, ApiError>;

//=========================================================================================
// Remote Service Ports (Traits)
//=========================================================================================

/// Authentication operations against the backend.
///
/// All calls ride on ambient transport-level credentials (the session
/// cookie); no token is ever held in application memory.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// `POST /auth/login`: establishes a server-side session.
    async fn login(&self, request: &LoginRequest) -> ApiResult<User>;

    /// `POST /auth/register`: creates an account and logs it in.
    async fn register(&self, request: &RegisterRequest) -> ApiResult<User>;

    /// `POST /auth/logout`: tears down the server-side session. This call
    /// must not trigger the transport's recursive 401 handling.
    async fn logout(&self) -> ApiResult<()>;

    /// `GET /auth/me`: resolves the user behind the ambient credentials.
    async fn current_user(&self) -> ApiResult<User>;
}

/// User administration, available to admins and super admins by policy.
#[async_trait]
pub trait UserAdminService: Send + Sync {
    async fn list_users(&self) -> ApiResult<UserPage>;

    async fn update_permissions(&self, user_id: i64, update: &PermissionUpdate)
        -> ApiResult<User>;
}

/// Document ingestion and management.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Uploads one file with its metadata. The upload workflow calls this
    /// strictly one file at a time.
    async fn upload_document(
        &self,
        file: &SelectedFile,
        metadata: &DocumentMetadata,
    ) -> ApiResult<()>;

    async fn list_transcripts(&self) -> ApiResult<Vec<Transcript>>;

    async fn set_transcript_active(&self, id: i64, active: bool) -> ApiResult<Transcript>;

    async fn delete_transcript(&self, id: i64) -> ApiResult<()>;
}

/// Index querying.
#[async_trait]
pub trait QueryService: Send + Sync {
    async fn submit_query(&self, question: &str) -> ApiResult<QueryAnswer>;
}

/// Prompt history, admin-only by policy.
#[async_trait]
pub trait PromptHistoryService: Send + Sync {
    async fn fetch_history(&self, filters: &PromptFilters) -> ApiResult<PromptHistoryPage>;
}

//=========================================================================================
// Shell Capability Ports
//=========================================================================================

/// Navigation capability handed to guards and the transport layer.
///
/// Deliberately narrow: redirect targets only, no general routing access.
pub trait Navigator: Send + Sync {
    /// Sends the user to the login view, optionally remembering the URL
    /// they were trying to reach.
    fn to_login(&self, return_url: Option<&str>);

    /// Sends the user to the unauthorized view.
    fn to_unauthorized(&self);
}

/// The single capability the transport layer is given over session state:
/// throwing the local session away when the server says it is gone.
pub trait SessionInvalidation: Send + Sync {
    fn invalidate_session(&self);
}
