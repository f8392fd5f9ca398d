//! services/client/src/adapters/history.rs
//!
//! Adapter for the prompt-history endpoint. The server echoes the applied
//! filters back; they are passed through so the view can display them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docquery_core::domain::{PromptFilters, PromptHistoryPage, PromptRecord};
use docquery_core::ports::{ApiResult, PromptHistoryService};
use serde::Deserialize;
use std::sync::Arc;

use crate::transport::Transport;

#[derive(Deserialize)]
struct PromptRecordWire {
    id: i64,
    user_id: i64,
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    user_email: String,
    query: String,
    created_at: DateTime<Utc>,
}

impl PromptRecordWire {
    fn to_domain(self) -> PromptRecord {
        PromptRecord {
            id: self.id,
            user_id: self.user_id,
            user_name: self.user_name,
            user_email: self.user_email,
            query: self.query,
            created_at: self.created_at,
        }
    }
}

#[derive(Deserialize)]
struct FiltersWire {
    #[serde(default)]
    user_id: Option<i64>,
    days: u32,
    limit: u32,
}

#[derive(Deserialize)]
struct PromptHistoryResponse {
    queries: Vec<PromptRecordWire>,
    total: u64,
    filters: FiltersWire,
}

/// A prompt-history adapter that implements the `PromptHistoryService` port.
pub struct HttpPromptHistoryAdapter {
    transport: Arc<Transport>,
}

impl HttpPromptHistoryAdapter {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl PromptHistoryService for HttpPromptHistoryAdapter {
    async fn fetch_history(&self, filters: &PromptFilters) -> ApiResult<PromptHistoryPage> {
        let mut path = format!("/prompt-history?days={}&limit={}", filters.days, filters.limit);
        if let Some(user_id) = filters.user_id {
            path.push_str(&format!("&user_id={}", user_id));
        }

        let response: PromptHistoryResponse = self.transport.get_json(&path).await?;
        Ok(PromptHistoryPage {
            queries: response
                .queries
                .into_iter()
                .map(PromptRecordWire::to_domain)
                .collect(),
            total: response.total,
            filters: PromptFilters {
                user_id: response.filters.user_id,
                days: response.filters.days,
                limit: response.filters.limit,
            },
        })
    }
}
