use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{ExtractorError, TextExtractor};
use crate::domain::{RawBlock, SourceDocument, SourceFormat};

use super::text_sanitizer::normalize_line;

pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Yields one text block per non-empty line, lazily.
    pub fn blocks(text: &str) -> impl Iterator<Item = RawBlock> + '_ {
        text.strip_prefix('\u{FEFF}')
            .unwrap_or(text)
            .lines()
            .map(normalize_line)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(index, line)| RawBlock::text(line, index))
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    async fn extract_blocks(
        &self,
        data: Bytes,
        document: &SourceDocument,
    ) -> Result<Vec<RawBlock>, ExtractorError> {
        if document.format != SourceFormat::PlainText {
            return Err(ExtractorError::UnsupportedFormat(document.format.to_string()));
        }

        let text = std::str::from_utf8(&data)
            .map_err(|e| ExtractorError::ExtractionFailed(format!("text is not UTF-8: {e}")))?;

        let blocks: Vec<RawBlock> = Self::blocks(text).collect();
        tracing::debug!(block_count = blocks.len(), "Plain text extraction complete");

        Ok(blocks)
    }
}
