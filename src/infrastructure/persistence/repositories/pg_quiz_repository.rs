use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{QuizRepository, RepositoryError};
use crate::domain::{
    Answer, AnswerOption, ImageHandle, Question, QuestionType, Quiz, QuizId, QuizSummary,
};

const UNIQUE_VIOLATION: &str = "23505";

pub struct PgQuizRepository {
    pool: PgPool,
}

impl PgQuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn query_failed(e: sqlx::Error) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

fn stored_url(image: &Option<ImageHandle>) -> Result<Option<&str>, RepositoryError> {
    match image {
        None => Ok(None),
        Some(ImageHandle::Url(url)) => Ok(Some(url.as_str())),
        Some(ImageHandle::Embedded(image)) => {
            Err(RepositoryError::UnsupportedImage(image.name.clone()))
        }
    }
}

#[async_trait]
impl QuizRepository for PgQuizRepository {
    #[instrument(skip(self, quiz), fields(quiz_id = %quiz.id.as_uuid()))]
    async fn create(&self, quiz: &Quiz) -> Result<(), RepositoryError> {
        let quiz_id = quiz.id.as_uuid();
        let mut tx = self.pool.begin().await.map_err(query_failed)?;

        sqlx::query("INSERT INTO quizzes (id, title, created_at) VALUES ($1, $2, $3)")
            .bind(quiz_id)
            .bind(&quiz.title)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| match e.as_database_error().and_then(|d| d.code()) {
                Some(code) if code == UNIQUE_VIOLATION => {
                    RepositoryError::AlreadyExists(quiz_id.to_string())
                }
                _ => query_failed(e),
            })?;

        for question in &quiz.questions {
            let position = question.local_id as i32;

            sqlx::query(
                r#"
                INSERT INTO questions (quiz_id, position, text, question_type, image_url, answer)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(quiz_id)
            .bind(position)
            .bind(&question.text)
            .bind(question.question_type.as_str())
            .bind(stored_url(&question.image)?)
            .bind(question.answer.to_wire())
            .execute(&mut *tx)
            .await
            .map_err(query_failed)?;

            for (index, option) in question.options.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO options (quiz_id, question_position, position, text, image_url)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(quiz_id)
                .bind(position)
                .bind(index as i32)
                .bind(&option.text)
                .bind(stored_url(&option.image)?)
                .execute(&mut *tx)
                .await
                .map_err(query_failed)?;
            }
        }

        tx.commit().await.map_err(query_failed)?;

        tracing::debug!(question_count = quiz.questions.len(), "Quiz rows inserted");
        Ok(())
    }

    #[instrument(skip(self), fields(quiz_id = %id.as_uuid()))]
    async fn get_by_id(&self, id: QuizId) -> Result<Option<Quiz>, RepositoryError> {
        let quiz_id = id.as_uuid();

        let Some(quiz_row) = sqlx::query("SELECT id, title FROM quizzes WHERE id = $1")
            .bind(quiz_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?
        else {
            return Ok(None);
        };

        let option_rows = sqlx::query(
            r#"
            SELECT question_position, text, image_url
            FROM options
            WHERE quiz_id = $1
            ORDER BY question_position, position
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        let mut options: HashMap<i32, Vec<AnswerOption>> = HashMap::new();
        for row in option_rows {
            let question_position: i32 = row.try_get("question_position").map_err(query_failed)?;
            let image_url: Option<String> = row.try_get("image_url").map_err(query_failed)?;
            options.entry(question_position).or_default().push(AnswerOption {
                text: row.try_get("text").map_err(query_failed)?,
                image: image_url.map(ImageHandle::Url),
            });
        }

        let question_rows = sqlx::query(
            r#"
            SELECT position, text, question_type, image_url, answer
            FROM questions
            WHERE quiz_id = $1
            ORDER BY position
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        let questions = question_rows
            .into_iter()
            .map(|row| {
                let position: i32 = row.try_get("position").map_err(query_failed)?;
                let question_type = row
                    .try_get::<String, _>("question_type")
                    .map_err(query_failed)?
                    .parse::<QuestionType>()
                    .map_err(RepositoryError::CorruptRecord)?;
                let answer_value: Value = row.try_get("answer").map_err(query_failed)?;
                let answer = Answer::from_wire(question_type, &answer_value)
                    .map_err(|e| RepositoryError::CorruptRecord(e.to_string()))?;
                let image_url: Option<String> = row.try_get("image_url").map_err(query_failed)?;

                Ok(Question {
                    local_id: position as u32,
                    text: row.try_get("text").map_err(query_failed)?,
                    question_type,
                    image: image_url.map(ImageHandle::Url),
                    options: options.remove(&position).unwrap_or_default(),
                    answer,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        let id: Uuid = quiz_row.try_get("id").map_err(query_failed)?;
        Ok(Some(Quiz {
            id: QuizId::from_uuid(id),
            title: quiz_row.try_get("title").map_err(query_failed)?,
            questions,
        }))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<QuizSummary>, RepositoryError> {
        let rows = sqlx::query("SELECT id, title, created_at FROM quizzes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?;

        rows.into_iter()
            .map(|row| {
                let id: Uuid = row.try_get("id").map_err(query_failed)?;
                let created_at: DateTime<Utc> = row.try_get("created_at").map_err(query_failed)?;
                Ok(QuizSummary {
                    id: QuizId::from_uuid(id),
                    title: row.try_get("title").map_err(query_failed)?,
                    created_at,
                })
            })
            .collect()
    }
}
