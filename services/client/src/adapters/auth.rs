//! services/client/src/adapters/auth.rs
//!
//! This module contains the authentication adapter, the concrete
//! implementation of the `AuthService` port over the backend's `/auth`
//! endpoints. The session credential itself lives in the transport's cookie
//! jar; this adapter never sees it.

use async_trait::async_trait;
use docquery_core::domain::{LoginRequest, RegisterRequest, User};
use docquery_core::ports::{ApiResult, AuthService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::UserRecord;
use crate::transport::Transport;

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// `POST /auth/login` returns the user alongside the session expiry, which
/// the client has no use for (the cookie carries its own lifetime).
#[derive(Deserialize)]
struct LoginResponse {
    user: UserRecord,
}

/// An auth adapter that implements the `AuthService` port.
pub struct HttpAuthAdapter {
    transport: Arc<Transport>,
}

impl HttpAuthAdapter {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AuthService for HttpAuthAdapter {
    async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        let body = LoginBody {
            email: &request.email,
            password: &request.password,
        };
        let response: LoginResponse = self.transport.post_json("/auth/login", &body).await?;
        Ok(response.user.to_domain())
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let body = RegisterBody {
            first_name: &request.first_name,
            last_name: &request.last_name,
            email: &request.email,
            password: &request.password,
        };
        let record: UserRecord = self.transport.post_json("/auth/register", &body).await?;
        Ok(record.to_domain())
    }

    async fn logout(&self) -> ApiResult<()> {
        // Empty JSON body; the response body is ignored either way.
        self.transport
            .post_discard("/auth/logout", &serde_json::json!({}))
            .await
    }

    async fn current_user(&self) -> ApiResult<User> {
        let record: UserRecord = self.transport.get_json("/auth/me").await?;
        Ok(record.to_domain())
    }
}
