use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::TextExtractor;
use crate::domain::SourceFormat;

use super::{
    CompositeTextExtractor, DocxExtractor, DocxMediaExtractor, ExtractionLimits, PlainTextExtractor,
};

pub struct ExtractorFactory;

impl ExtractorFactory {
    pub fn text_extractor(
        timeout: Duration,
        limits: ExtractionLimits,
    ) -> Arc<CompositeTextExtractor> {
        let docx: Arc<dyn TextExtractor> = Arc::new(DocxExtractor::new(timeout, limits));

        Arc::new(CompositeTextExtractor::new(vec![
            (SourceFormat::PlainText, Arc::new(PlainTextExtractor) as Arc<dyn TextExtractor>),
            (SourceFormat::Doc, Arc::clone(&docx)),
            (SourceFormat::Docx, docx),
        ]))
    }

    pub fn image_extractor(
        timeout: Duration,
        limits: ExtractionLimits,
    ) -> Arc<DocxMediaExtractor> {
        tracing::info!(
            timeout_secs = timeout.as_secs(),
            max_entry_bytes = limits.max_entry_bytes,
            max_document_bytes = limits.max_document_bytes,
            "Using docx media extractor"
        );
        Arc::new(DocxMediaExtractor::new(timeout, limits))
    }
}
