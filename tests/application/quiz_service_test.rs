use std::sync::Arc;

use bytes::Bytes;

use quizpress::application::ports::{QuizRepository, RepositoryError};
use quizpress::application::services::{QuizService, QuizServiceError};
use quizpress::domain::{
    AnswerOption, ImageHandle, ImageKey, Question, QuestionType, Quiz, QuizId, QuizSummary,
};
use quizpress::infrastructure::persistence::InMemoryQuizRepository;
use quizpress::infrastructure::storage::ObjectImageStore;

struct RejectingRepository;

#[async_trait::async_trait]
impl QuizRepository for RejectingRepository {
    async fn create(&self, _quiz: &Quiz) -> Result<(), RepositoryError> {
        Err(RepositoryError::QueryFailed("disk full".to_string()))
    }

    async fn get_by_id(&self, _id: QuizId) -> Result<Option<Quiz>, RepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<QuizSummary>, RepositoryError> {
        Ok(vec![])
    }
}

fn quiz_with_images() -> Quiz {
    let mut question = Question::new(1, "Which flag?", QuestionType::Radio);
    question.image = Some(ImageHandle::embedded(
        "word/media/flag.png",
        Bytes::from_static(b"png-bytes"),
    ));
    question.options = vec![
        AnswerOption {
            text: "a) Norway".to_string(),
            image: Some(ImageHandle::Url("https://cdn.example/no.png".to_string())),
        },
        AnswerOption::new("b) Sweden"),
    ];
    Quiz::new("Flags".to_string(), vec![question])
}

fn service_with(repository: Arc<dyn QuizRepository>) -> QuizService {
    QuizService::new(repository, Arc::new(ObjectImageStore::in_memory()), "/images/")
}

#[tokio::test]
async fn given_quiz_with_embedded_image_when_publishing_then_image_is_stored_and_replaced_by_url() {
    let service = service_with(Arc::new(InMemoryQuizRepository::new()));
    let quiz = quiz_with_images();
    let quiz_id = quiz.id;

    let published = service.publish(quiz).await.unwrap();

    let Some(ImageHandle::Url(url)) = &published.questions[0].image else {
        panic!("question image was not stored");
    };
    let prefix = format!("/images/quizzes/{}/", quiz_id.as_uuid());
    assert!(url.starts_with(&prefix), "unexpected url {url}");
    assert!(url.ends_with(".png"));

    let key = ImageKey::from_raw(url.trim_start_matches("/images/"));
    let stored = service.load_image(&key).await.unwrap();
    assert_eq!(&stored.data[..], b"png-bytes");
    assert_eq!(stored.content_type, "image/png");

    assert_eq!(
        published.questions[0].options[0].image,
        Some(ImageHandle::Url("https://cdn.example/no.png".to_string()))
    );
}

#[tokio::test]
async fn given_published_quiz_when_fetching_and_listing_then_it_is_returned() {
    let service = service_with(Arc::new(InMemoryQuizRepository::new()));
    let published = service.publish(quiz_with_images()).await.unwrap();

    let fetched = service.fetch(published.id).await.unwrap();
    let listed = service.list().await.unwrap();

    assert_eq!(fetched, Some(published.clone()));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Flags");
}

#[tokio::test]
async fn given_rejecting_repository_when_publishing_then_persistence_failure_is_surfaced() {
    let service = service_with(Arc::new(RejectingRepository));

    let result = service.publish(quiz_with_images()).await;

    match result {
        Err(QuizServiceError::PersistenceFailure(e)) => {
            assert!(e.to_string().contains("disk full"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn given_radio_question_without_options_when_publishing_then_quiz_is_rejected() {
    let service = service_with(Arc::new(InMemoryQuizRepository::new()));
    let quiz = Quiz::new(
        "Broken".to_string(),
        vec![Question::new(1, "Q", QuestionType::Radio)],
    );

    let result = service.publish(quiz).await;

    assert!(matches!(result, Err(QuizServiceError::InvalidQuiz(_))));
}

#[tokio::test]
async fn given_key_escaping_store_root_when_loading_image_then_rejected() {
    let service = service_with(Arc::new(InMemoryQuizRepository::new()));

    let result = service.load_image(&ImageKey::from_raw("../secrets.png")).await;

    assert!(matches!(result, Err(QuizServiceError::ImageStorage(_))));
}
