//! services/client/src/adapters/mod.rs
//!
//! Concrete implementations of the core service ports over the remote HTTP
//! API. Each adapter owns nothing but a handle to the shared [`Transport`];
//! wire-format record structs live here and never leak into the core.

pub mod auth;
pub mod documents;
pub mod history;
pub mod query;
pub mod users;

pub use auth::HttpAuthAdapter;
pub use documents::HttpDocumentAdapter;
pub use history::HttpPromptHistoryAdapter;
pub use query::HttpQueryAdapter;
pub use users::HttpUserAdminAdapter;

use chrono::{DateTime, Utc};
use docquery_core::domain::{AccessLevel, User};
use serde::Deserialize;

//=========================================================================================
// Shared Wire Record Structs
//=========================================================================================

/// A user as the backend serializes it. Shared by the auth and user-admin
/// adapters.
#[derive(Deserialize)]
pub(crate) struct UserRecord {
    id: i64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    full_name: Option<String>,
    access_level: String,
    #[serde(default)]
    query_permission: bool,
    created_at: DateTime<Utc>,
    #[serde(default)]
    last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub(crate) fn to_domain(self) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            full_name: self.full_name,
            access_level: AccessLevel::from_label(&self.access_level),
            query_permission: self.query_permission,
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}
