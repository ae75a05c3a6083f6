use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::ports::{ImageExtractor, TextExtractor};
use crate::domain::QuizId;
use crate::presentation::state::AppState;

use super::quiz_types::{QuizResponse, error_response};

#[tracing::instrument(skip(state))]
pub async fn get_quiz_handler<T, I>(
    State(state): State<AppState<T, I>>,
    Path(quiz_id): Path<String>,
) -> Response
where
    T: TextExtractor + 'static + ?Sized,
    I: ImageExtractor + 'static + ?Sized,
{
    let uuid = match Uuid::parse_str(&quiz_id) {
        Ok(u) => u,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid quiz ID: {}", quiz_id),
            );
        }
    };

    match state.quiz_service.fetch(QuizId::from_uuid(uuid)).await {
        Ok(Some(quiz)) => (StatusCode::OK, Json(QuizResponse::from(&quiz))).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("Quiz not found: {}", quiz_id),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch quiz");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch quiz: {}", e),
            )
        }
    }
}
