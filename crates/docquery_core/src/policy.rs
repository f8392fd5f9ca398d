//! crates/docquery_core/src/policy.rs
//!
//! Capability questions answered purely from a [`Session`] value. No side
//! effects and no network: the backend remains the authority, these checks
//! only decide what the client offers to show or attempt.

use crate::domain::{AccessLevel, Session, User};

/// True iff the session is authenticated and its user's level sits at or
/// above `required` in the fixed ordering `user < admin < super_admin`.
pub fn has_access_level(session: &Session, required: AccessLevel) -> bool {
    match &session.user {
        Some(user) if session.is_authenticated => user.access_level >= required,
        _ => false,
    }
}

pub fn is_admin(session: &Session) -> bool {
    has_access_level(session, AccessLevel::Admin)
}

pub fn is_super_admin(session: &Session) -> bool {
    has_access_level(session, AccessLevel::SuperAdmin)
}

/// Uploading is an admin capability.
pub fn can_upload_documents(session: &Session) -> bool {
    is_admin(session)
}

/// The full document listing is an admin capability.
pub fn can_view_all_documents(session: &Session) -> bool {
    is_admin(session)
}

/// The user administration table is an admin capability.
pub fn can_manage_users(session: &Session) -> bool {
    is_admin(session)
}

/// Prompt history is an admin capability.
pub fn can_view_prompt_history(session: &Session) -> bool {
    is_admin(session)
}

/// Whether the session may query the index.
///
/// Admins and super admins may always query, whatever their stored flag
/// says; plain users follow their `query_permission` flag.
pub fn can_query_documents(session: &Session) -> bool {
    match &session.user {
        Some(user) if session.is_authenticated => {
            is_admin(session) || user.query_permission
        }
        _ => false,
    }
}

/// The flag a user actually operates under: admins and super admins have an
/// immutable effective `true`, plain users their stored flag.
pub fn effective_query_permission(user: &User) -> bool {
    user.access_level >= AccessLevel::Admin || user.query_permission
}

/// Whether `actor` may change `target` at all.
///
/// Super admins may modify anyone but themselves; admins may modify only
/// plain `user`-level accounts; everyone else may modify nobody.
pub fn can_modify_user(actor: &User, target: &User) -> bool {
    match actor.access_level {
        AccessLevel::SuperAdmin => actor.id != target.id,
        AccessLevel::Admin => target.access_level == AccessLevel::User,
        AccessLevel::User => false,
    }
}

/// Query-permission toggling is only meaningful for plain users, and only
/// for actors who may modify the target in the first place.
pub fn can_toggle_query_permission(actor: &User, target: &User) -> bool {
    target.access_level == AccessLevel::User && can_modify_user(actor, target)
}

/// Access-level changes are reserved to super admins and never permitted on
/// one's own account.
pub fn can_change_access_level(actor: &User, target: &User) -> bool {
    actor.access_level == AccessLevel::SuperAdmin && actor.id != target.id
}
