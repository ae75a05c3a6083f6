mod answer;
mod image_handle;
mod image_key;
mod question;
mod quiz;
mod quiz_draft;
mod raw_block;
mod source_document;

pub use answer::{Answer, AnswerError, RATING_MAX, RATING_MIN};
pub use image_handle::{
    EmbeddedImage, ImageHandle, ImageHandleError, content_type_for, extension_for,
};
pub use image_key::ImageKey;
pub use question::{AnswerOption, Question, QuestionType};
pub use quiz::{Quiz, QuizId, QuizSummary};
pub use quiz_draft::{DraftCommand, DraftError, QuizDraft};
pub use raw_block::{BlockKind, RawBlock};
pub use source_document::{SourceDocument, SourceFormat};
