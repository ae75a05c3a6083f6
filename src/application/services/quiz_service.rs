use std::sync::Arc;

use crate::application::ports::{
    ImageStore, ImageStoreError, QuizRepository, RepositoryError, StoredImage,
};
use crate::domain::{ImageHandle, ImageKey, Quiz, QuizId, QuizSummary, extension_for};

/// Persistence boundary: moves inline images into the image store, then hands
/// the quiz to the repository.
pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    image_store: Arc<dyn ImageStore>,
    public_base_url: String,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        image_store: Arc<dyn ImageStore>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            image_store,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[tracing::instrument(skip(self, quiz), fields(quiz_id = %quiz.id.as_uuid()))]
    pub async fn publish(&self, mut quiz: Quiz) -> Result<Quiz, QuizServiceError> {
        if let Some(question) = quiz.questions.iter().find(|q| !q.has_consistent_options()) {
            return Err(QuizServiceError::InvalidQuiz(format!(
                "question {} is {} with {} options",
                question.local_id,
                question.question_type,
                question.options.len()
            )));
        }

        let quiz_id = quiz.id;
        let mut stored = Vec::new();

        for question in quiz.questions.iter_mut() {
            for handle in question.images_mut() {
                let ImageHandle::Embedded(image) = handle else {
                    continue;
                };

                let key = ImageKey::new(&quiz_id, extension_for(&image.content_type));
                if let Err(e) = self.image_store.save(&key, image).await {
                    self.discard_images(&stored).await;
                    return Err(e.into());
                }

                *handle = ImageHandle::Url(format!("{}/{}", self.public_base_url, key));
                stored.push(key);
            }
        }

        if let Err(e) = self.repository.create(&quiz).await {
            tracing::error!(error = %e, "Quiz rejected by repository");
            self.discard_images(&stored).await;
            return Err(e.into());
        }

        tracing::info!(
            question_count = quiz.questions.len(),
            stored_images = stored.len(),
            "Quiz published"
        );

        Ok(quiz)
    }

    pub async fn fetch(&self, id: QuizId) -> Result<Option<Quiz>, QuizServiceError> {
        Ok(self.repository.get_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<QuizSummary>, QuizServiceError> {
        Ok(self.repository.list().await?)
    }

    pub async fn load_image(&self, key: &ImageKey) -> Result<StoredImage, QuizServiceError> {
        if !key.is_safe() {
            return Err(ImageStoreError::InvalidKey(key.to_string()).into());
        }
        Ok(self.image_store.load(key).await?)
    }

    async fn discard_images(&self, keys: &[ImageKey]) {
        for key in keys {
            if let Err(e) = self.image_store.delete(key).await {
                tracing::warn!(key = %key, error = %e, "Failed to discard stored image");
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error("invalid quiz: {0}")]
    InvalidQuiz(String),
    #[error("image storage: {0}")]
    ImageStorage(#[from] ImageStoreError),
    #[error("{0}")]
    PersistenceFailure(#[from] RepositoryError),
}
