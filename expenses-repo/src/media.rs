//! Filesystem attachment store.
//!
//! Stores uploaded files under `<root>/<namespace>/<media-id>[.<ext>]`.
//! The returned `MediaId` is what payments reference in their attachment
//! column.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use expenses_types::ports::{AttachmentError, AttachmentStore};
use expenses_types::{AttachmentUpload, MediaId};

/// Attachment store writing to a local directory tree.
pub struct FsAttachmentStore {
    root: PathBuf,
}

impl FsAttachmentStore {
    /// Creates a store rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_name(media: MediaId, original: &str) -> String {
        match Path::new(original).extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => format!("{media}.{ext}"),
            _ => media.to_string(),
        }
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn store(
        &self,
        upload: &AttachmentUpload,
        namespace: &str,
    ) -> Result<Option<MediaId>, AttachmentError> {
        if upload.content.is_empty() {
            return Ok(None);
        }

        let media = MediaId::new();
        let dir = self.root.join(namespace);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AttachmentError::Storage(e.to_string()))?;

        let path = dir.join(Self::file_name(media, &upload.filename));
        tokio::fs::write(&path, &upload.content)
            .await
            .map_err(|e| AttachmentError::Storage(e.to_string()))?;

        tracing::debug!(media = %media, path = %path.display(), "stored attachment");

        Ok(Some(media))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_writes_file_and_returns_media_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAttachmentStore::new(dir.path());

        let upload = AttachmentUpload {
            filename: "receipt.pdf".to_string(),
            content: b"%PDF-1.4 fake".to_vec(),
        };

        let media = store.store(&upload, "payments").await.unwrap().unwrap();

        let path = dir.path().join("payments").join(format!("{media}.pdf"));
        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, upload.content);
    }

    #[tokio::test]
    async fn test_store_empty_content_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAttachmentStore::new(dir.path());

        let upload = AttachmentUpload {
            filename: "empty.txt".to_string(),
            content: Vec::new(),
        };

        assert!(store.store(&upload, "payments").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_keeps_no_extension_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAttachmentStore::new(dir.path());

        let upload = AttachmentUpload {
            filename: "receipt".to_string(),
            content: b"data".to_vec(),
        };

        let media = store.store(&upload, "payments").await.unwrap().unwrap();
        let path = dir.path().join("payments").join(media.to_string());
        assert!(tokio::fs::try_exists(&path).await.unwrap());
    }
}
