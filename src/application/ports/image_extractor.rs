use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{ImageHandle, SourceDocument};

use super::ExtractorError;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedImage {
    pub entry_name: String,
    pub handle: ImageHandle,
}

/// Pulls embedded images out of a document container, in archive order.
#[async_trait]
pub trait ImageExtractor: Send + Sync {
    async fn extract_images(
        &self,
        data: Bytes,
        document: &SourceDocument,
    ) -> Result<Vec<ExtractedImage>, ExtractorError>;
}

#[derive(Debug, thiserror::Error)]
#[error("cannot decode image {entry}: {reason}")]
pub struct ImageDecodeFailure {
    pub entry: String,
    pub reason: String,
}
