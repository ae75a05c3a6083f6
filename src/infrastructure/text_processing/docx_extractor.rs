use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::application::ports::{ExtractorError, TextExtractor};
use crate::domain::{RawBlock, SourceDocument};

use super::docx_archive::{
    self, DOCUMENT_ENTRY, ExtractionLimits, RELATIONSHIPS_ENTRY, RelationshipTarget,
};
use super::text_sanitizer::normalize_line;

pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads paragraphs and inline images from a WordprocessingML package.
pub struct DocxExtractor {
    timeout: Duration,
    limits: ExtractionLimits,
}

#[derive(Default)]
struct Paragraph {
    lines: Vec<String>,
    current: String,
    images: Vec<String>,
}

impl Paragraph {
    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
    }

    /// Text lines first, then the paragraph's images.
    fn flush_into(mut self, blocks: &mut Vec<RawBlock>) {
        self.break_line();

        for line in self.lines.iter().map(|l| normalize_line(l)) {
            if !line.is_empty() {
                blocks.push(RawBlock::text(line, blocks.len()));
            }
        }
        for image in self.images {
            blocks.push(RawBlock::image(image, blocks.len()));
        }
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRACTION_TIMEOUT, ExtractionLimits::default())
    }
}

impl DocxExtractor {
    pub fn new(timeout: Duration, limits: ExtractionLimits) -> Self {
        Self { timeout, limits }
    }

    pub fn parse(data: &[u8], limits: &ExtractionLimits) -> Result<Vec<RawBlock>, ExtractorError> {
        let mut archive = docx_archive::open(data)?;
        let document_xml =
            docx_archive::read_entry(&mut archive, DOCUMENT_ENTRY, limits.entry_budget(0))?;

        let relationships = if archive.index_for_name(RELATIONSHIPS_ENTRY).is_some() {
            let budget = limits.entry_budget(document_xml.len() as u64);
            let rels_xml = docx_archive::read_entry(&mut archive, RELATIONSHIPS_ENTRY, budget)?;
            docx_archive::parse_relationships(&rels_xml)?
        } else {
            HashMap::new()
        };

        Self::blocks_from_document(&document_xml, &relationships)
    }

    fn blocks_from_document(
        xml: &str,
        relationships: &HashMap<String, RelationshipTarget>,
    ) -> Result<Vec<RawBlock>, ExtractorError> {
        let mut reader = Reader::from_str(xml);
        let mut blocks = Vec::new();
        let mut paragraphs: Vec<Paragraph> = Vec::new();
        let mut fallback_depth = 0usize;
        let mut in_run = false;
        let mut in_text = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                ExtractorError::ExtractionFailed(format!(
                    "malformed document.xml at {}: {e}",
                    reader.buffer_position()
                ))
            })?;

            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"mc:Fallback" => fallback_depth += 1,
                    _ if fallback_depth > 0 => {}
                    b"w:p" => paragraphs.push(Paragraph::default()),
                    b"w:r" => in_run = true,
                    b"w:t" => in_text = true,
                    _ => Self::on_element(&e, in_run, paragraphs.last_mut(), relationships),
                },
                Event::Empty(e) if fallback_depth == 0 => {
                    Self::on_element(&e, in_run, paragraphs.last_mut(), relationships)
                }
                Event::End(e) => match e.name().as_ref() {
                    b"mc:Fallback" => fallback_depth = fallback_depth.saturating_sub(1),
                    _ if fallback_depth > 0 => {}
                    b"w:r" => in_run = false,
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        if let Some(paragraph) = paragraphs.pop() {
                            paragraph.flush_into(&mut blocks);
                        }
                    }
                    _ => {}
                },
                Event::Text(text) if in_text && fallback_depth == 0 => {
                    let text = text.unescape().map_err(|e| {
                        ExtractorError::ExtractionFailed(format!("bad text in document.xml: {e}"))
                    })?;
                    if let Some(paragraph) = paragraphs.last_mut() {
                        paragraph.current.push_str(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(blocks)
    }

    fn on_element(
        element: &BytesStart<'_>,
        in_run: bool,
        paragraph: Option<&mut Paragraph>,
        relationships: &HashMap<String, RelationshipTarget>,
    ) {
        let Some(paragraph) = paragraph else {
            return;
        };

        let reference_attr: &[u8] = match element.name().as_ref() {
            b"w:tab" if in_run => {
                paragraph.current.push(' ');
                return;
            }
            b"w:br" | b"w:cr" if in_run => {
                paragraph.break_line();
                return;
            }
            b"a:blip" => b"r:embed",
            b"v:imagedata" => b"r:id",
            _ => return,
        };

        let Some(id) = element
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == reference_attr)
            .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
        else {
            return;
        };

        match relationships.get(&id) {
            Some(RelationshipTarget::Entry(entry)) => paragraph.images.push(entry.clone()),
            Some(RelationshipTarget::External) => {
                tracing::debug!(relationship = %id, "Skipping externally linked image");
            }
            None => {
                tracing::warn!(relationship = %id, "Image relationship not found");
                paragraph.images.push(String::new());
            }
        }
    }
}

#[async_trait]
impl TextExtractor for DocxExtractor {
    #[tracing::instrument(
        skip(self, data),
        fields(filename = %document.filename, size_bytes = document.size_bytes)
    )]
    async fn extract_blocks(
        &self,
        data: Bytes,
        document: &SourceDocument,
    ) -> Result<Vec<RawBlock>, ExtractorError> {
        if !document.format.is_rich_document() {
            return Err(ExtractorError::UnsupportedFormat(document.format.to_string()));
        }

        let limits = self.limits;
        let blocks = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::parse(&data, &limits)),
        )
        .await
        .map_err(|_| ExtractorError::ExtractionFailed("document extraction timed out".to_string()))?
        .map_err(|e| ExtractorError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(block_count = blocks.len(), "Document text extraction complete");

        Ok(blocks)
    }
}
