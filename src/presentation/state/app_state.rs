use std::sync::Arc;

use crate::application::ports::{ImageExtractor, TextExtractor};
use crate::application::services::{IngestionService, QuizService};
use crate::presentation::config::Settings;

pub struct AppState<T: ?Sized, I: ?Sized>
where
    T: TextExtractor,
    I: ImageExtractor,
{
    pub ingestion_service: Arc<IngestionService<T, I>>,
    pub quiz_service: Arc<QuizService>,
    pub settings: Settings,
}

impl<T: ?Sized, I: ?Sized> Clone for AppState<T, I>
where
    T: TextExtractor,
    I: ImageExtractor,
{
    fn clone(&self) -> Self {
        Self {
            ingestion_service: Arc::clone(&self.ingestion_service),
            quiz_service: Arc::clone(&self.quiz_service),
            settings: self.settings.clone(),
        }
    }
}
