use bytes::Bytes;

use crate::domain::{EmbeddedImage, ImageKey};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub content_type: String,
    pub data: Bytes,
}

#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, key: &ImageKey, image: &EmbeddedImage) -> Result<(), ImageStoreError>;

    async fn load(&self, key: &ImageKey) -> Result<StoredImage, ImageStoreError>;

    async fn delete(&self, key: &ImageKey) -> Result<(), ImageStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("image not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("invalid image key: {0}")]
    InvalidKey(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
