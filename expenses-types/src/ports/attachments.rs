//! Attachment storage port.
//!
//! Implementations can be a local filesystem store, an object store client,
//! or an in-memory stub for tests.

use crate::domain::MediaId;
use crate::dto::AttachmentUpload;

/// Error type for attachment storage operations.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port trait for storing uploaded attachment files.
#[async_trait::async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Stores an upload under the given namespace ("payments").
    /// Returns `None` when the upload carries no content, mirroring a form
    /// submitted without a file.
    async fn store(
        &self,
        upload: &AttachmentUpload,
        namespace: &str,
    ) -> Result<Option<MediaId>, AttachmentError>;
}
