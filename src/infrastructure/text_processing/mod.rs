mod composite_text_extractor;
mod docx_archive;
mod docx_extractor;
mod docx_media_extractor;
mod extractor_factory;
mod plain_text_extractor;
mod text_sanitizer;

pub use composite_text_extractor::CompositeTextExtractor;
pub use docx_archive::ExtractionLimits;
pub use docx_extractor::{DEFAULT_EXTRACTION_TIMEOUT, DocxExtractor};
pub use docx_media_extractor::DocxMediaExtractor;
pub use extractor_factory::ExtractorFactory;
pub use plain_text_extractor::PlainTextExtractor;
pub use text_sanitizer::normalize_line;
