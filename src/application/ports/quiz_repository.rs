use async_trait::async_trait;

use crate::domain::{Quiz, QuizId, QuizSummary};

use super::RepositoryError;

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: &Quiz) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: QuizId) -> Result<Option<Quiz>, RepositoryError>;

    async fn list(&self) -> Result<Vec<QuizSummary>, RepositoryError>;
}
