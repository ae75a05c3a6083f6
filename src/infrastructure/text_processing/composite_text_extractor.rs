use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{ExtractorError, TextExtractor};
use crate::domain::{RawBlock, SourceDocument, SourceFormat};

pub struct CompositeTextExtractor {
    adapters: HashMap<SourceFormat, Arc<dyn TextExtractor>>,
}

impl CompositeTextExtractor {
    pub fn new(adapters: Vec<(SourceFormat, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }
}

#[async_trait]
impl TextExtractor for CompositeTextExtractor {
    async fn extract_blocks(
        &self,
        data: Bytes,
        document: &SourceDocument,
    ) -> Result<Vec<RawBlock>, ExtractorError> {
        let adapter = self
            .adapters
            .get(&document.format)
            .ok_or_else(|| ExtractorError::UnsupportedFormat(document.format.to_string()))?;

        adapter.extract_blocks(data, document).await
    }
}
