use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub filename: String,
    pub format: SourceFormat,
    pub size_bytes: u64,
}

/// Upload formats accepted by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    PlainText,
    Doc,
    Docx,
}

impl SourceFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        Self::from_extension(extension)
    }

    pub fn as_extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Doc => "doc",
            Self::Docx => "docx",
        }
    }

    pub fn is_rich_document(&self) -> bool {
        matches!(self, Self::Doc | Self::Docx)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.as_extension())
    }
}

impl SourceDocument {
    pub fn new(filename: String, format: SourceFormat, size_bytes: u64) -> Self {
        Self {
            filename,
            format,
            size_bytes,
        }
    }

    /// Default quiz title: the filename up to its first dot.
    pub fn title_stem(&self) -> &str {
        self.filename.split('.').next().unwrap_or_default()
    }
}
