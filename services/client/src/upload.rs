//! services/client/src/upload.rs
//!
//! The upload workflow driver: owns one [`UploadBatch`] and walks it through
//! the `DocumentService` port, strictly one file at a time. The `&mut self`
//! receiver on [`UploadWorkflow::submit_metadata`] makes parallel submission
//! of files within a batch unrepresentable: the next request cannot be
//! issued before the previous one has resolved.

use docquery_core::domain::{DocumentMetadata, SelectedFile};
use docquery_core::ports::DocumentService;
use docquery_core::upload::{BatchStateError, UploadBatch, UploadPhase};
use std::sync::Arc;
use tracing::{info, warn};

pub struct UploadWorkflow {
    batch: UploadBatch,
    documents: Arc<dyn DocumentService>,
}

impl UploadWorkflow {
    pub fn new(documents: Arc<dyn DocumentService>) -> Self {
        Self {
            batch: UploadBatch::new(),
            documents,
        }
    }

    /// Starts a new batch over `files`, discarding any previous progress.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) {
        info!(count = files.len(), "files selected for upload");
        self.batch.select_files(files);
    }

    /// Submits metadata for the current file and dispatches its upload.
    ///
    /// On success the cursor advances (or the batch completes); on failure
    /// the cursor stays put, the error becomes visible through
    /// [`UploadWorkflow::upload_error`], and the attempted metadata remains
    /// available through [`UploadWorkflow::last_metadata`] so the entry form
    /// can be re-shown pre-filled. Returns the phase the batch landed in.
    pub async fn submit_metadata(
        &mut self,
        metadata: DocumentMetadata,
    ) -> Result<UploadPhase, BatchStateError> {
        let file = self.batch.begin_submission(metadata.clone())?;
        match self.documents.upload_document(&file, &metadata).await {
            Ok(()) => {
                info!(file = %file.name, "upload succeeded");
                self.batch.record_success();
            }
            Err(error) => {
                warn!(file = %file.name, %error, "upload failed");
                self.batch.record_failure(error.to_string());
            }
        }
        Ok(self.batch.phase())
    }

    /// Skips the current file without a network call.
    pub fn skip_current(&mut self) -> Result<(), BatchStateError> {
        self.batch.skip_current()
    }

    /// Returns the workflow fully to the empty state.
    pub fn reset(&mut self) {
        self.batch.reset();
    }

    //=====================================================================================
    // Read Accessors (delegated to the batch)
    //=====================================================================================

    pub fn phase(&self) -> UploadPhase {
        self.batch.phase()
    }

    pub fn current_file(&self) -> Option<&SelectedFile> {
        self.batch.current_file()
    }

    pub fn current_index(&self) -> usize {
        self.batch.current_index()
    }

    pub fn file_count(&self) -> usize {
        self.batch.file_count()
    }

    pub fn is_last_file(&self) -> bool {
        self.batch.is_last_file()
    }

    pub fn is_complete(&self) -> bool {
        self.batch.is_complete()
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.batch.upload_error()
    }

    pub fn last_metadata(&self) -> Option<&DocumentMetadata> {
        self.batch.last_metadata()
    }
}
