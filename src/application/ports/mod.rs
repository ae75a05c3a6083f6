mod image_extractor;
mod image_store;
mod quiz_repository;
mod repository_error;
mod text_extractor;

pub use image_extractor::{ExtractedImage, ImageDecodeFailure, ImageExtractor};
pub use image_store::{ImageStore, ImageStoreError, StoredImage};
pub use quiz_repository::QuizRepository;
pub use repository_error::RepositoryError;
pub use text_extractor::{ExtractorError, TextExtractor};
