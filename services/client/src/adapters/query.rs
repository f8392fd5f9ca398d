//! services/client/src/adapters/query.rs
//!
//! Adapter for the index query endpoint.

use async_trait::async_trait;
use docquery_core::domain::QueryAnswer;
use docquery_core::ports::{ApiResult, QueryService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::transport::Transport;

#[derive(Serialize)]
struct QueryBody<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    answer: String,
    #[serde(default)]
    sources: Option<Vec<String>>,
}

/// A query adapter that implements the `QueryService` port.
pub struct HttpQueryAdapter {
    transport: Arc<Transport>,
}

impl HttpQueryAdapter {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl QueryService for HttpQueryAdapter {
    async fn submit_query(&self, question: &str) -> ApiResult<QueryAnswer> {
        let response: QueryResponse = self
            .transport
            .post_json("/query", &QueryBody { question })
            .await?;
        Ok(QueryAnswer {
            answer: response.answer,
            sources: response.sources,
        })
    }
}
