//! crates/docquery_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any wire format or serialization; the
//! client service maps HTTP payloads into them at the adapter boundary.

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Ordered account role. Capability checks compare positions in this
/// ordering, never label strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    User,
    Admin,
    SuperAdmin,
}

impl AccessLevel {
    /// The wire label for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::User => "user",
            AccessLevel::Admin => "admin",
            AccessLevel::SuperAdmin => "super_admin",
        }
    }

    /// Parses a wire label. Unknown labels degrade to `User`, the lowest
    /// level, so a new backend role can never grant extra capability here.
    pub fn from_label(label: &str) -> Self {
        match label {
            "super_admin" => AccessLevel::SuperAdmin,
            "admin" => AccessLevel::Admin,
            _ => AccessLevel::User,
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub access_level: AccessLevel,
    pub query_permission: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// The name shown in the UI. Prefers `full_name`, then "first last",
    /// then whichever single name exists, then the literal "User".
    pub fn display_name(&self) -> String {
        if let Some(full) = &self.full_name {
            if !full.trim().is_empty() {
                return full.clone();
            }
        }
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => "User".to_string(),
        }
    }
}

/// The client's current belief about who is logged in.
///
/// Always replaced wholesale, never mutated field-by-field: construct one
/// through [`Session::authenticated`] or [`Session::cleared`] so that
/// `is_authenticated`, `user` and `access_level` can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub access_level: Option<AccessLevel>,
}

impl Session {
    /// The authenticated snapshot for `user`.
    pub fn authenticated(user: User) -> Self {
        let access_level = Some(user.access_level);
        Self {
            is_authenticated: true,
            user: Some(user),
            access_level,
        }
    }

    /// The logged-out snapshot. This is also the value consumers observe
    /// before the startup bootstrap resolves.
    pub fn cleared() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            access_level: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::cleared()
    }
}

/// Credentials submitted on login.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Details submitted on registration.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// A file picked for upload: the original filename plus its raw content.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content: Bytes,
}

/// Descriptive fields attached to one uploaded document.
///
/// The schema has evolved; everything besides `is_video` is optional and
/// never validated client-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    pub source_url: Option<String>,
    pub trainer_name: Option<String>,
    pub title: Option<String>,
    pub is_video: bool,
}

/// An ingested document as listed by the backend.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: i64,
    pub title: Option<String>,
    pub trainer_name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source_url: Option<String>,
    pub media_type: Option<String>,
    pub provide_link_to_searcher: Option<bool>,
}

/// The answer to a submitted question.
#[derive(Debug, Clone)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Option<Vec<String>>,
}

/// One recorded query from the prompt history.
#[derive(Debug, Clone)]
pub struct PromptRecord {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub query: String,
    pub created_at: DateTime<Utc>,
}

/// Filters for a prompt-history fetch, echoed back by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptFilters {
    pub user_id: Option<i64>,
    pub days: u32,
    pub limit: u32,
}

impl Default for PromptFilters {
    fn default() -> Self {
        Self {
            user_id: None,
            days: 30,
            limit: 100,
        }
    }
}

/// One page of prompt history.
#[derive(Debug, Clone)]
pub struct PromptHistoryPage {
    pub queries: Vec<PromptRecord>,
    pub total: u64,
    pub filters: PromptFilters,
}

/// The full user listing for the administration view.
#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: u64,
}

/// A partial permissions change for one account. Callers set at least one
/// field; the backend applies whichever are present.
#[derive(Debug, Clone, Default)]
pub struct PermissionUpdate {
    pub access_level: Option<AccessLevel>,
    pub query_permission: Option<bool>,
}
