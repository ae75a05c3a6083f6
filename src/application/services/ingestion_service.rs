use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{ExtractorError, ImageExtractor, TextExtractor};
use crate::domain::{Quiz, SourceDocument, SourceFormat};

use super::{ImageCatalog, RunTracker, SegmentationAnomaly, SegmentationEngine, assemble_quiz};

pub struct IngestionService<T: ?Sized, I: ?Sized>
where
    T: TextExtractor,
    I: ImageExtractor,
{
    text_extractor: Arc<T>,
    image_extractor: Arc<I>,
    engine: SegmentationEngine,
    runs: RunTracker,
}

#[derive(Debug, Clone)]
pub struct IngestionOutcome {
    pub quiz: Quiz,
    pub anomalies: Vec<SegmentationAnomaly>,
    pub image_count: usize,
}

impl<T: ?Sized, I: ?Sized> IngestionService<T, I>
where
    T: TextExtractor,
    I: ImageExtractor,
{
    pub fn new(text_extractor: Arc<T>, image_extractor: Arc<I>, engine: SegmentationEngine) -> Self {
        Self {
            text_extractor,
            image_extractor,
            engine,
            runs: RunTracker::new(),
        }
    }

    pub fn runs(&self) -> &RunTracker {
        &self.runs
    }

    /// Converts one uploaded document into a quiz. The title defaults to the
    /// filename up to its first `.`.
    #[tracing::instrument(skip(self, data, title), fields(size_bytes = data.len()))]
    pub async fn ingest(
        &self,
        data: Bytes,
        filename: &str,
        title: Option<String>,
    ) -> Result<IngestionOutcome, IngestionError> {
        let format = SourceFormat::from_filename(filename)
            .ok_or_else(|| IngestionError::UnsupportedFormat(filename.to_string()))?;
        let document = SourceDocument::new(filename.to_string(), format, data.len() as u64);

        let (blocks, images) = tokio::try_join!(
            self.text_extractor.extract_blocks(data.clone(), &document),
            self.image_extractor.extract_images(data, &document),
        )
        .map_err(|e| match e {
            ExtractorError::UnsupportedFormat(what) => IngestionError::UnsupportedFormat(what),
            other => IngestionError::Extraction(other),
        })?;

        let catalog = ImageCatalog::new(images);
        let segmentation = self.engine.segment(&blocks, &catalog);

        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| document.title_stem().to_string());
        let quiz = assemble_quiz(title, segmentation.questions);
        let image_count = quiz.image_count();

        tracing::info!(
            quiz_id = %quiz.id.as_uuid(),
            block_count = blocks.len(),
            catalog_size = catalog.len(),
            question_count = quiz.questions.len(),
            image_count,
            anomaly_count = segmentation.anomalies.len(),
            "Document ingested"
        );

        Ok(IngestionOutcome {
            quiz,
            anomalies: segmentation.anomalies,
            image_count,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractorError),
}
