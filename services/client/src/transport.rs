//! services/client/src/transport.rs
//!
//! The credentialed HTTP transport every adapter goes through. It forces
//! cookie-bearing requests (the ambient session credential) and is the one
//! place that reacts globally to authorization failures: a 401 invalidates
//! the local session and redirects to login, a 403 redirects to the
//! unauthorized view. Nothing else in the client may clear session state
//! outside of an explicit logout.

use docquery_core::ports::{ApiError, ApiResult, Navigator, SessionInvalidation};
use reqwest::multipart::Form;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{debug, warn};

/// The logout endpoint is exempt from 401 handling: answering its own 401
/// with another clear-and-redirect would loop forever.
const LOGOUT_PATH: &str = "/auth/logout";

/// Shape of the backend's error payloads.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// The shared transport. Cheap to clone via `Arc`; all adapters hold the
/// same instance so every request uses the same cookie jar.
pub struct Transport {
    http: reqwest::Client,
    base: Url,
    navigator: Arc<dyn Navigator>,
    // Wired after construction: the session store needs the auth adapter,
    // which needs this transport. Set exactly once by the composition root.
    session: OnceLock<Arc<dyn SessionInvalidation>>,
}

impl Transport {
    pub fn new(
        base: Url,
        timeout: Duration,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base,
            navigator,
            session: OnceLock::new(),
        })
    }

    /// Hands the transport its session-invalidation capability. Called once
    /// at startup, after the session store exists.
    pub fn attach_session(&self, session: Arc<dyn SessionInvalidation>) {
        if self.session.set(session).is_err() {
            warn!("session invalidation capability was already attached");
        }
    }

    //=====================================================================================
    // Request Verbs
    //=====================================================================================

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path)?;
        let response = self.http.get(url).send().await.map_err(connectivity)?;
        self.decode(path, response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(path)?;
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(connectivity)?;
        self.decode(path, response).await
    }

    /// POST where the response body is irrelevant (acks, logout).
    pub async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path)?;
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(connectivity)?;
        self.ensure_success(path, response).await.map(drop)
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(path)?;
        let response = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(connectivity)?;
        self.decode(path, response).await
    }

    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(path)?;
        let response = self
            .http
            .patch(url)
            .json(body)
            .send()
            .await
            .map_err(connectivity)?;
        self.decode(path, response).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path)?;
        let response = self.http.delete(url).send().await.map_err(connectivity)?;
        self.ensure_success(path, response).await.map(drop)
    }

    /// Multipart POST (file uploads). The response body is discarded.
    pub async fn post_multipart(&self, path: &str, form: Form) -> ApiResult<()> {
        let url = self.url(path)?;
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(connectivity)?;
        self.ensure_success(path, response).await.map(drop)
    }

    //=====================================================================================
    // Response Handling
    //=====================================================================================

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Server(format!("invalid request path '{}': {}", path, e)))
    }

    async fn decode<T: DeserializeOwned>(&self, path: &str, response: Response) -> ApiResult<T> {
        let response = self.ensure_success(path, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Server(format!("invalid response body: {}", e)))
    }

    async fn ensure_success(&self, path: &str, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        Err(self.classify_failure(path, status, detail))
    }

    /// Maps a non-success status to the error taxonomy and performs the
    /// global 401/403 reactions.
    fn classify_failure(&self, path: &str, status: StatusCode, detail: Option<String>) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED => {
                if path != LOGOUT_PATH {
                    warn!(path, "request was unauthenticated; clearing session");
                    if let Some(session) = self.session.get() {
                        session.invalidate_session();
                    }
                    self.navigator.to_login(None);
                } else {
                    debug!("401 on logout ignored");
                }
                ApiError::Unauthenticated
            }
            StatusCode::FORBIDDEN => {
                warn!(path, "request was forbidden");
                self.navigator.to_unauthorized();
                ApiError::Forbidden
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(
                detail.unwrap_or_else(|| "Please check your input and try again.".to_string()),
            ),
            StatusCode::CONFLICT => ApiError::Conflict(
                detail.unwrap_or_else(|| "The request conflicts with existing data.".to_string()),
            ),
            _ => {
                ApiError::Server(detail.unwrap_or_else(|| format!("unexpected status {}", status)))
            }
        }
    }
}

fn connectivity(error: reqwest::Error) -> ApiError {
    debug!(%error, "request did not reach the server");
    ApiError::Connectivity
}
