//! crates/docquery_core/src/upload.rs
//!
//! The per-batch upload state machine. Files are processed strictly in
//! selection order, one at a time; a failed submission keeps the cursor and
//! the attempted metadata so the entry form can be re-shown pre-filled. The
//! machine is pure; dispatching the actual upload belongs to the driver in
//! the client service.

use crate::domain::{DocumentMetadata, SelectedFile};

/// Where a batch currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// No files selected.
    Empty,
    /// Waiting for metadata for the file under the cursor.
    AwaitingMetadata,
    /// An upload for the current file is in flight.
    Uploading,
    /// The last attempt failed; metadata is retained for retry.
    ErrorRecovery,
    /// Every file was uploaded or skipped.
    Complete,
}

/// Attempted transition that the current phase does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BatchStateError {
    #[error("no files selected")]
    NoFilesSelected,
    #[error("an upload is already in flight")]
    UploadInFlight,
    #[error("the batch is already complete")]
    BatchComplete,
}

/// One upload session over an ordered set of selected files.
#[derive(Debug, Default)]
pub struct UploadBatch {
    files: Vec<SelectedFile>,
    current_index: usize,
    is_uploading: bool,
    upload_error: Option<String>,
    upload_complete: bool,
    last_metadata: Option<DocumentMetadata>,
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting files starts the batch over: cursor to zero, all transient
    /// state cleared. Selecting an empty list returns the batch to `Empty`.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) {
        self.files = files;
        self.current_index = 0;
        self.is_uploading = false;
        self.upload_error = None;
        self.upload_complete = false;
        self.last_metadata = None;
    }

    pub fn phase(&self) -> UploadPhase {
        if self.files.is_empty() {
            UploadPhase::Empty
        } else if self.upload_complete {
            UploadPhase::Complete
        } else if self.is_uploading {
            UploadPhase::Uploading
        } else if self.upload_error.is_some() {
            UploadPhase::ErrorRecovery
        } else {
            UploadPhase::AwaitingMetadata
        }
    }

    /// The file under the cursor, while the batch is still running.
    pub fn current_file(&self) -> Option<&SelectedFile> {
        if self.upload_complete {
            None
        } else {
            self.files.get(self.current_index)
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_last_file(&self) -> bool {
        !self.files.is_empty() && self.current_index == self.files.len() - 1
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn is_complete(&self) -> bool {
        self.upload_complete
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    /// The metadata of the most recent submission, retained across a failed
    /// attempt so the form can be pre-filled for retry.
    pub fn last_metadata(&self) -> Option<&DocumentMetadata> {
        self.last_metadata.as_ref()
    }

    /// Starts a submission for the current file: remembers the metadata,
    /// clears any previous error and marks the upload in flight. Returns a
    /// clone of the file to hand to the transport.
    pub fn begin_submission(
        &mut self,
        metadata: DocumentMetadata,
    ) -> Result<SelectedFile, BatchStateError> {
        if self.upload_complete {
            return Err(BatchStateError::BatchComplete);
        }
        if self.is_uploading {
            return Err(BatchStateError::UploadInFlight);
        }
        let file = self
            .current_file()
            .cloned()
            .ok_or(BatchStateError::NoFilesSelected)?;
        self.last_metadata = Some(metadata);
        self.upload_error = None;
        self.is_uploading = true;
        Ok(file)
    }

    /// Records a successful upload: transient state cleared, cursor advanced
    /// by exactly one, or the batch completed if this was the last file.
    pub fn record_success(&mut self) {
        self.is_uploading = false;
        self.upload_error = None;
        self.last_metadata = None;
        self.advance();
    }

    /// Records a failed upload: the cursor stays put and the metadata is
    /// retained, so resubmitting re-enters the same file's upload.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.is_uploading = false;
        self.upload_error = Some(message.into());
    }

    /// Skips the current file: advances exactly like a success, but without
    /// any network call and without touching the retained metadata.
    pub fn skip_current(&mut self) -> Result<(), BatchStateError> {
        if self.upload_complete {
            return Err(BatchStateError::BatchComplete);
        }
        if self.is_uploading {
            return Err(BatchStateError::UploadInFlight);
        }
        if self.files.is_empty() {
            return Err(BatchStateError::NoFilesSelected);
        }
        // The skipped file's failure must not bleed into the next one.
        self.upload_error = None;
        self.advance();
        Ok(())
    }

    /// Returns the batch fully to `Empty`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn advance(&mut self) {
        if self.is_last_file() {
            self.upload_complete = true;
        } else {
            self.current_index += 1;
        }
    }
}
