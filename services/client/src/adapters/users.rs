//! services/client/src/adapters/users.rs
//!
//! Adapter for the user administration endpoints. Authorization is enforced
//! server-side; the client only gates its UI through the permission policy.

use async_trait::async_trait;
use docquery_core::domain::{PermissionUpdate, User, UserPage};
use docquery_core::ports::{ApiResult, UserAdminService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::UserRecord;
use crate::transport::Transport;

#[derive(Deserialize)]
struct UserListResponse {
    users: Vec<UserRecord>,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Serialize)]
struct PermissionUpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_level: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_permission: Option<bool>,
}

/// `PUT /users/{id}/permissions` wraps the updated user.
#[derive(Deserialize)]
struct PermissionUpdateResponse {
    user: UserRecord,
}

/// A user-administration adapter that implements the `UserAdminService` port.
pub struct HttpUserAdminAdapter {
    transport: Arc<Transport>,
}

impl HttpUserAdminAdapter {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl UserAdminService for HttpUserAdminAdapter {
    async fn list_users(&self) -> ApiResult<UserPage> {
        let response: UserListResponse = self.transport.get_json("/users").await?;
        let users: Vec<User> = response
            .users
            .into_iter()
            .map(UserRecord::to_domain)
            .collect();
        let total = response.total.unwrap_or(users.len() as u64);
        Ok(UserPage { users, total })
    }

    async fn update_permissions(
        &self,
        user_id: i64,
        update: &PermissionUpdate,
    ) -> ApiResult<User> {
        let body = PermissionUpdateBody {
            access_level: update.access_level.map(|level| level.as_str()),
            query_permission: update.query_permission,
        };
        let response: PermissionUpdateResponse = self
            .transport
            .put_json(&format!("/users/{}/permissions", user_id), &body)
            .await?;
        Ok(response.user.to_domain())
    }
}
