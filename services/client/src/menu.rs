//! services/client/src/menu.rs
//!
//! The side-menu view model: which links are visible and what name to show
//! for the logged-in user. Menu hosts hold a live subscription from
//! [`crate::store::SessionStore::subscribe`] and recompute this on every
//! emission, so visibility can never lag the session by more than one
//! notification.

use docquery_core::domain::Session;
use docquery_core::policy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    pub display_name: Option<String>,
    pub show_documents: bool,
    pub show_upload: bool,
    pub show_query: bool,
    pub show_manage_users: bool,
    pub show_prompt_history: bool,
}

impl MenuModel {
    pub fn for_session(session: &Session) -> Self {
        Self {
            display_name: session.user.as_ref().map(|user| user.display_name()),
            show_documents: policy::can_view_all_documents(session),
            show_upload: policy::can_upload_documents(session),
            show_query: policy::can_query_documents(session),
            show_manage_users: policy::can_manage_users(session),
            show_prompt_history: policy::can_view_prompt_history(session),
        }
    }
}
