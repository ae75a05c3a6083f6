use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{
    ExtractedImage, ExtractorError, ImageDecodeFailure, ImageExtractor,
};
use crate::domain::{ImageHandle, SourceDocument};

use super::docx_archive::{self, ExtractionLimits, MEDIA_PREFIX};
use super::docx_extractor::DEFAULT_EXTRACTION_TIMEOUT;

/// Enumerates `word/media/` entries of a document package in archive order.
pub struct DocxMediaExtractor {
    timeout: Duration,
    limits: ExtractionLimits,
}

impl Default for DocxMediaExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRACTION_TIMEOUT, ExtractionLimits::default())
    }
}

impl DocxMediaExtractor {
    pub fn new(timeout: Duration, limits: ExtractionLimits) -> Self {
        Self { timeout, limits }
    }

    /// Oversized entries, and entries past the document budget, are skipped.
    pub fn collect(
        data: &[u8],
        limits: &ExtractionLimits,
    ) -> Result<Vec<ExtractedImage>, ExtractorError> {
        let mut archive = docx_archive::open(data)?;
        let mut images = Vec::new();
        let mut consumed = 0u64;

        for index in 0..archive.len() {
            let limit = limits.entry_budget(consumed);
            match Self::read_media_entry(&mut archive, index, limit) {
                Ok(Some(image)) => {
                    if let ImageHandle::Embedded(embedded) = &image.handle {
                        consumed += embedded.data.len() as u64;
                    }
                    images.push(image);
                }
                Ok(None) => {}
                Err(failure) => {
                    tracing::warn!(entry = %failure.entry, reason = %failure.reason, "Skipping undecodable image");
                }
            }
        }

        Ok(images)
    }

    fn read_media_entry(
        archive: &mut docx_archive::DocxArchive<'_>,
        index: usize,
        limit: u64,
    ) -> Result<Option<ExtractedImage>, ImageDecodeFailure> {
        let mut entry = archive.by_index(index).map_err(|e| ImageDecodeFailure {
            entry: format!("#{index}"),
            reason: e.to_string(),
        })?;

        let entry_name = entry.name().to_string();
        if entry.is_dir() || !entry_name.starts_with(MEDIA_PREFIX) {
            return Ok(None);
        }

        let data = docx_archive::read_bounded(&mut entry, limit)
            .map_err(|e| ImageDecodeFailure {
                entry: entry_name.clone(),
                reason: e.to_string(),
            })?
            .ok_or_else(|| ImageDecodeFailure {
                entry: entry_name.clone(),
                reason: format!("exceeds {limit} bytes when decompressed"),
            })?;

        if data.is_empty() {
            return Err(ImageDecodeFailure {
                entry: entry_name,
                reason: "entry is empty".to_string(),
            });
        }

        let handle = ImageHandle::embedded(entry_name.clone(), Bytes::from(data));
        Ok(Some(ExtractedImage { entry_name, handle }))
    }
}

#[async_trait]
impl ImageExtractor for DocxMediaExtractor {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    async fn extract_images(
        &self,
        data: Bytes,
        document: &SourceDocument,
    ) -> Result<Vec<ExtractedImage>, ExtractorError> {
        if !document.format.is_rich_document() {
            return Ok(Vec::new());
        }

        let limits = self.limits;
        let images = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::collect(&data, &limits)),
        )
        .await
        .map_err(|_| ExtractorError::ExtractionFailed("image extraction timed out".to_string()))?
        .map_err(|e| ExtractorError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(image_count = images.len(), "Image extraction complete");

        Ok(images)
    }
}
