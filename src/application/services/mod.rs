mod image_catalog;
mod ingestion_service;
mod quiz_assembler;
mod quiz_service;
mod run_tracker;
mod segmentation;

pub use image_catalog::ImageCatalog;
pub use ingestion_service::{IngestionError, IngestionOutcome, IngestionService};
pub use quiz_assembler::assemble_quiz;
pub use quiz_service::{QuizService, QuizServiceError};
pub use run_tracker::{RunTicket, RunTracker};
pub use segmentation::{
    AnomalyKind, OptionAlphabet, QuestionBoundary, Segmentation, SegmentationAnomaly,
    SegmentationEngine, SegmentationPolicy,
};
