use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::ports::{QuizRepository, RepositoryError};
use crate::domain::{Quiz, QuizId, QuizSummary};

/// Process-local repository for development and tests.
#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<Vec<(Quiz, DateTime<Utc>)>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: &Quiz) -> Result<(), RepositoryError> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.iter().any(|(existing, _)| existing.id == quiz.id) {
            return Err(RepositoryError::AlreadyExists(quiz.id.as_uuid().to_string()));
        }
        quizzes.push((quiz.clone(), Utc::now()));
        Ok(())
    }

    async fn get_by_id(&self, id: QuizId) -> Result<Option<Quiz>, RepositoryError> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .iter()
            .find(|(quiz, _)| quiz.id == id)
            .map(|(quiz, _)| quiz.clone()))
    }

    async fn list(&self) -> Result<Vec<QuizSummary>, RepositoryError> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .iter()
            .rev()
            .map(|(quiz, created_at)| QuizSummary {
                id: quiz.id,
                title: quiz.title.clone(),
                created_at: *created_at,
            })
            .collect())
    }
}
