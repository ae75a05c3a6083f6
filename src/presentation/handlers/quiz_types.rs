use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::application::services::{QuizServiceError, SegmentationAnomaly};
use crate::domain::{
    Answer, AnswerError, DraftCommand, DraftError, ImageHandle, ImageHandleError, QuestionType,
    Quiz, QuizDraft, QuizId, QuizSummary,
};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

#[derive(Debug, Serialize)]
pub struct OptionResponse {
    pub text: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: u32,
    pub quiz_id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub answer: Value,
    pub options: Vec<OptionResponse>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub id: String,
    pub title: String,
    pub questions: Vec<QuestionResponse>,
}

impl From<&Quiz> for QuizResponse {
    fn from(quiz: &Quiz) -> Self {
        let quiz_id = quiz.id.as_uuid().to_string();

        let questions = quiz
            .questions
            .iter()
            .map(|question| QuestionResponse {
                id: question.local_id,
                quiz_id: quiz_id.clone(),
                text: question.text.clone(),
                question_type: question.question_type.as_str().to_string(),
                answer: question.answer.to_wire(),
                options: question
                    .options
                    .iter()
                    .map(|option| OptionResponse {
                        text: option.text.clone(),
                        image_url: option.image.as_ref().map(ImageHandle::to_wire),
                    })
                    .collect(),
                image_url: question.image.as_ref().map(ImageHandle::to_wire),
            })
            .collect();

        Self {
            id: quiz_id,
            title: quiz.title.clone(),
            questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub quiz: QuizResponse,
    pub warnings: Vec<String>,
    pub image_count: usize,
}

impl ImportResponse {
    pub fn new(quiz: &Quiz, anomalies: &[SegmentationAnomaly], image_count: usize) -> Self {
        Self {
            quiz: QuizResponse::from(quiz),
            warnings: anomalies.iter().map(ToString::to_string).collect(),
            image_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizSummaryResponse {
    pub id: String,
    pub title: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct QuizListResponse {
    pub quizzes: Vec<QuizSummaryResponse>,
}

impl From<Vec<QuizSummary>> for QuizListResponse {
    fn from(summaries: Vec<QuizSummary>) -> Self {
        Self {
            quizzes: summaries
                .into_iter()
                .map(|summary| QuizSummaryResponse {
                    id: summary.id.as_uuid().to_string(),
                    title: summary.title,
                    created_at: summary.created_at.to_rfc3339(),
                })
                .collect(),
        }
    }
}

/// Options arrive either as bare strings or as `{ text, imageUrl }` objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OptionRequest {
    Text(String),
    Detailed {
        #[serde(default)]
        text: String,
        #[serde(rename = "imageUrl", default)]
        image_url: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(default)]
    pub answer: Value,
    #[serde(default)]
    pub options: Vec<OptionRequest>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    /// Position used to match `questionImage-{index}` upload parts.
    #[serde(default)]
    pub index: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuizRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuestionRequest>,
}

/// Binary image parts of a multipart create request.
#[derive(Debug, Default)]
pub struct UploadedImages {
    pub questions: HashMap<usize, ImageHandle>,
    pub options: HashMap<(usize, usize), ImageHandle>,
}

impl UploadedImages {
    /// Records a `questionImage-{q}` or `optionImage-{q}-{o}` part. Returns
    /// false for any other field name.
    pub fn insert(&mut self, field_name: &str, handle: ImageHandle) -> bool {
        if let Some(rest) = field_name.strip_prefix("questionImage-") {
            if let Ok(question) = rest.parse() {
                self.questions.insert(question, handle);
                return true;
            }
        } else if let Some(rest) = field_name.strip_prefix("optionImage-") {
            let parsed = rest
                .split_once('-')
                .and_then(|(q, o)| Some((q.parse().ok()?, o.parse().ok()?)));
            if let Some(key) = parsed {
                self.options.insert(key, handle);
                return true;
            }
        }
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidQuizData {
    #[error("malformed quiz id: {0}")]
    BadId(String),
    #[error("{0}")]
    UnknownType(String),
    #[error("answer: {0}")]
    Answer(#[from] AnswerError),
    #[error("image: {0}")]
    Image(#[from] ImageHandleError),
    #[error("draft: {0}")]
    Draft(#[from] DraftError),
    #[error("body: {0}")]
    Body(String),
}

impl CreateQuizRequest {
    /// Replays the request as authoring commands so the draft enforces the
    /// option and answer rules.
    pub fn into_quiz(self, mut uploads: UploadedImages) -> Result<Quiz, InvalidQuizData> {
        let id = match self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(raw) => QuizId::from_uuid(
                Uuid::parse_str(raw).map_err(|_| InvalidQuizData::BadId(raw.to_string()))?,
            ),
            None => QuizId::new(),
        };

        let mut draft = QuizDraft::new(id, self.title);

        for (question, request) in self.questions.into_iter().enumerate() {
            let question_type: QuestionType = request
                .question_type
                .parse()
                .map_err(InvalidQuizData::UnknownType)?;
            let upload_index = request.index.unwrap_or(question);

            draft = draft
                .apply(DraftCommand::AddQuestion { question_type })?
                .apply(DraftCommand::SetQuestionText {
                    question,
                    text: request.text,
                })?;

            let question_image = match uploads.questions.remove(&upload_index) {
                Some(handle) => Some(handle),
                None => wire_image(request.image_url.as_deref())?,
            };
            if question_image.is_some() {
                draft = draft.apply(DraftCommand::AttachQuestionImage {
                    question,
                    image: question_image,
                })?;
            }

            for (option, option_request) in request.options.into_iter().enumerate() {
                let (text, image_url) = match option_request {
                    OptionRequest::Text(text) => (text, None),
                    OptionRequest::Detailed { text, image_url } => (text, image_url),
                };

                // option-bearing questions start with one empty option
                if option > 0 || !question_type.is_option_bearing() {
                    draft = draft.apply(DraftCommand::AddOption { question })?;
                }
                draft = draft.apply(DraftCommand::SetOptionText {
                    question,
                    option,
                    text,
                })?;

                let image = match uploads.options.remove(&(upload_index, option)) {
                    Some(handle) => Some(handle),
                    None => wire_image(image_url.as_deref())?,
                };
                if image.is_some() {
                    draft = draft.apply(DraftCommand::AttachOptionImage {
                        question,
                        option,
                        image,
                    })?;
                }
            }

            let answer = Answer::from_wire(question_type, &request.answer)?;
            draft = draft.apply(DraftCommand::SetAnswer { question, answer })?;
        }

        Ok(draft.finish()?)
    }
}

fn wire_image(value: Option<&str>) -> Result<Option<ImageHandle>, ImageHandleError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => ImageHandle::from_wire(value).map(Some),
        None => Ok(None),
    }
}

pub fn publish_error_response(error: &QuizServiceError) -> Response {
    match error {
        QuizServiceError::InvalidQuiz(_) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid data format")
        }
        QuizServiceError::ImageStorage(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to store images: {e}"),
        ),
        QuizServiceError::PersistenceFailure(e) => {
            let message = e.to_string();
            if message.trim().is_empty() {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save quiz")
            } else {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}
