#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Text,
    Image,
}

/// One unit of extracted content in reading order.
///
/// For [`BlockKind::Image`] the value is the archive entry the document
/// points at (`word/media/image1.png`), or empty when the reference could
/// not be resolved and only the block's position is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub kind: BlockKind,
    pub value: String,
    pub sequence_index: usize,
}

impl RawBlock {
    pub fn text(value: impl Into<String>, sequence_index: usize) -> Self {
        Self {
            kind: BlockKind::Text,
            value: value.into(),
            sequence_index,
        }
    }

    pub fn image(entry_name: impl Into<String>, sequence_index: usize) -> Self {
        Self {
            kind: BlockKind::Image,
            value: entry_name.into(),
            sequence_index,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}
