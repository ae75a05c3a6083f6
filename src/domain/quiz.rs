use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuizId(Uuid);

impl QuizId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for QuizId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(title: String, questions: Vec<Question>) -> Self {
        Self {
            id: QuizId::new(),
            title,
            questions,
        }
    }

    pub fn image_count(&self) -> usize {
        self.questions
            .iter()
            .map(|q| {
                q.image.iter().count() + q.options.iter().filter(|o| o.image.is_some()).count()
            })
            .sum()
    }
}

/// Listing row for a persisted quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
