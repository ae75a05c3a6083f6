use std::collections::HashMap;
use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::ExtractorError;

const OLE_SIGNATURE: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

pub const DOCUMENT_ENTRY: &str = "word/document.xml";
pub const RELATIONSHIPS_ENTRY: &str = "word/_rels/document.xml.rels";
pub const MEDIA_PREFIX: &str = "word/media/";

pub type DocxArchive<'a> = ZipArchive<Cursor<&'a [u8]>>;

const MIB: u64 = 1024 * 1024;

/// Caps on decompressed bytes. Archive headers are not trusted for sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub max_entry_bytes: u64,
    pub max_document_bytes: u64,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_entry_bytes: 32 * MIB,
            max_document_bytes: 128 * MIB,
        }
    }
}

impl ExtractionLimits {
    pub fn from_megabytes(max_entry_mb: u64, max_document_mb: u64) -> Self {
        Self {
            max_entry_bytes: max_entry_mb.saturating_mul(MIB),
            max_document_bytes: max_document_mb.saturating_mul(MIB),
        }
    }

    /// Limit for the next entry once `consumed` bytes of the document were read.
    pub fn entry_budget(&self, consumed: u64) -> u64 {
        self.max_entry_bytes
            .min(self.max_document_bytes.saturating_sub(consumed))
    }
}

/// Reads at most `limit` bytes; `None` when the stream holds more.
pub fn read_bounded<R: Read>(reader: R, limit: u64) -> std::io::Result<Option<Vec<u8>>> {
    let mut data = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut data)?;
    Ok((data.len() as u64 <= limit).then_some(data))
}

/// Where a relationship id points. External targets live outside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipTarget {
    Entry(String),
    External,
}

pub fn open(data: &[u8]) -> Result<DocxArchive<'_>, ExtractorError> {
    if data.starts_with(&OLE_SIGNATURE) {
        return Err(ExtractorError::ExtractionFailed(
            "legacy binary .doc files are not supported, save the document as .docx".to_string(),
        ));
    }

    ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractorError::ExtractionFailed(format!("not a valid docx archive: {e}")))
}

pub fn read_entry(
    archive: &mut DocxArchive<'_>,
    name: &str,
    limit: u64,
) -> Result<String, ExtractorError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ExtractorError::ExtractionFailed(format!("{name}: {e}")))?;

    let data = read_bounded(&mut entry, limit)
        .map_err(|e| ExtractorError::ExtractionFailed(format!("failed to read {name}: {e}")))?
        .ok_or_else(|| {
            ExtractorError::ExtractionFailed(format!(
                "{name} exceeds {limit} bytes when decompressed"
            ))
        })?;

    String::from_utf8(data)
        .map_err(|e| ExtractorError::ExtractionFailed(format!("{name} is not UTF-8: {e}")))
}

/// Parses `document.xml.rels` into relationship id -> archive entry.
pub fn parse_relationships(xml: &str) -> Result<HashMap<String, RelationshipTarget>, ExtractorError> {
    let mut reader = Reader::from_str(xml);
    let mut relationships = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                let mut external = false;

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    match attr.key.as_ref() {
                        b"Id" => id = Some(value),
                        b"Target" => target = Some(value),
                        b"TargetMode" => external = value == "External",
                        _ => {}
                    }
                }

                if let (Some(id), Some(target)) = (id, target) {
                    let target = if external {
                        RelationshipTarget::External
                    } else {
                        RelationshipTarget::Entry(resolve_target(&target))
                    };
                    relationships.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractorError::ExtractionFailed(format!(
                    "malformed relationships at {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    Ok(relationships)
}

/// Targets are relative to `word/` unless rooted at the package root.
fn resolve_target(target: &str) -> String {
    if let Some(rooted) = target.strip_prefix('/') {
        return rooted.to_string();
    }

    let mut segments = vec!["word"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

