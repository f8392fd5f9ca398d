//! services/client/src/adapters/documents.rs
//!
//! This module contains the document adapter, the concrete implementation of
//! the `DocumentService` port: the multipart upload endpoint plus the
//! transcript listing and management endpoints.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docquery_core::domain::{DocumentMetadata, SelectedFile, Transcript};
use docquery_core::ports::{ApiError, ApiResult, DocumentService};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::transport::Transport;

/// The metadata part of an upload, serialized as a JSON string alongside the
/// file. Field names follow the backend's schema.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trainer_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    is_video: bool,
}

impl<'a> MetadataBody<'a> {
    fn from_domain(metadata: &'a DocumentMetadata) -> Self {
        Self {
            source_url: metadata.source_url.as_deref(),
            trainer_name: metadata.trainer_name.as_deref(),
            title: metadata.title.as_deref(),
            is_video: metadata.is_video,
        }
    }
}

#[derive(Deserialize)]
struct TranscriptRecord {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    trainer_name: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    provide_link_to_searcher: Option<bool>,
}

impl TranscriptRecord {
    fn to_domain(self) -> Transcript {
        Transcript {
            id: self.id,
            title: self.title,
            trainer_name: self.trainer_name,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            source_url: self.source_url,
            media_type: self.media_type,
            provide_link_to_searcher: self.provide_link_to_searcher,
        }
    }
}

#[derive(Deserialize)]
struct TranscriptListResponse {
    transcripts: Vec<TranscriptRecord>,
}

#[derive(Serialize)]
struct ActiveBody {
    active: bool,
}

/// A document adapter that implements the `DocumentService` port.
pub struct HttpDocumentAdapter {
    transport: Arc<Transport>,
}

impl HttpDocumentAdapter {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DocumentService for HttpDocumentAdapter {
    async fn upload_document(
        &self,
        file: &SelectedFile,
        metadata: &DocumentMetadata,
    ) -> ApiResult<()> {
        let metadata_json = serde_json::to_string(&MetadataBody::from_domain(metadata))
            .map_err(|e| ApiError::Server(format!("could not encode metadata: {}", e)))?;

        // `Bytes` clones are cheap; the file content is not copied here.
        let file_part = Part::stream(file.content.clone()).file_name(file.name.clone());
        let form = Form::new()
            .part("file", file_part)
            .text("metadata", metadata_json);

        self.transport.post_multipart("/transcripts/upload", form).await
    }

    async fn list_transcripts(&self) -> ApiResult<Vec<Transcript>> {
        let response: TranscriptListResponse =
            self.transport.get_json("/transcripts/metadata").await?;
        Ok(response
            .transcripts
            .into_iter()
            .map(TranscriptRecord::to_domain)
            .collect())
    }

    async fn set_transcript_active(&self, id: i64, active: bool) -> ApiResult<Transcript> {
        let record: TranscriptRecord = self
            .transport
            .patch_json(&format!("/transcripts/{}/active", id), &ActiveBody { active })
            .await?;
        Ok(record.to_domain())
    }

    async fn delete_transcript(&self, id: i64) -> ApiResult<()> {
        self.transport.delete(&format!("/transcripts/{}", id)).await
    }
}
