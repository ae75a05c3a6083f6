use axum::Json;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::application::ports::{ImageExtractor, TextExtractor};
use crate::domain::{EmbeddedImage, ImageHandle, Quiz, content_type_for};
use crate::presentation::state::AppState;

use super::quiz_types::{
    CreateQuizRequest, InvalidQuizData, QuizResponse, UploadedImages, error_response,
    publish_error_response,
};

async fn quiz_from_json(request: Request) -> Result<Quiz, InvalidQuizData> {
    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| InvalidQuizData::Body(e.to_string()))?;
    let parsed: CreateQuizRequest =
        serde_json::from_slice(&body).map_err(|e| InvalidQuizData::Body(e.to_string()))?;
    parsed.into_quiz(UploadedImages::default())
}

async fn quiz_from_multipart(request: Request) -> Result<Quiz, InvalidQuizData> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| InvalidQuizData::Body(e.to_string()))?;

    let mut id = None;
    let mut title = String::new();
    let mut questions = None;
    let mut uploads = UploadedImages::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| InvalidQuizData::Body(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "id" | "title" | "questions" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| InvalidQuizData::Body(e.to_string()))?;
                match name.as_str() {
                    "id" => id = Some(value),
                    "title" => title = value,
                    _ => {
                        questions = Some(
                            serde_json::from_str(&value)
                                .map_err(|e| InvalidQuizData::Body(e.to_string()))?,
                        )
                    }
                }
            }
            _ => {
                let file_name = field.file_name().unwrap_or(name.as_str()).to_string();
                let content_type = field
                    .content_type()
                    .filter(|ct| ct.starts_with("image/"))
                    .map(String::from)
                    .unwrap_or_else(|| content_type_for(&file_name).to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| InvalidQuizData::Body(e.to_string()))?;
                if data.is_empty() {
                    continue;
                }

                let handle = ImageHandle::Embedded(EmbeddedImage {
                    name: file_name,
                    content_type,
                    data,
                });
                if !uploads.insert(&name, handle) {
                    tracing::debug!(field = %name, "Ignoring unknown multipart field");
                }
            }
        }
    }

    let request = CreateQuizRequest {
        id,
        title,
        questions: questions.unwrap_or_default(),
    };
    request.into_quiz(uploads)
}

#[tracing::instrument(skip(state, request))]
pub async fn create_quiz_handler<T, I>(
    State(state): State<AppState<T, I>>,
    request: Request,
) -> Response
where
    T: TextExtractor + 'static + ?Sized,
    I: ImageExtractor + 'static + ?Sized,
{
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let parsed = if is_multipart {
        quiz_from_multipart(request).await
    } else {
        quiz_from_json(request).await
    };

    let quiz = match parsed {
        Ok(quiz) => quiz,
        Err(e) => {
            tracing::warn!(error = %e, multipart = is_multipart, "Rejected quiz payload");
            return error_response(StatusCode::BAD_REQUEST, "Invalid data format");
        }
    };

    match state.quiz_service.publish(quiz).await {
        Ok(quiz) => (StatusCode::CREATED, Json(QuizResponse::from(&quiz))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save quiz");
            publish_error_response(&e)
        }
    }
}
