use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{RawBlock, SourceDocument};

/// Turns an uploaded buffer into content blocks in reading order.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_blocks(
        &self,
        data: Bytes,
        document: &SourceDocument,
    ) -> Result<Vec<RawBlock>, ExtractorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
