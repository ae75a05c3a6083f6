use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ports::{ImageExtractor, TextExtractor};
use crate::presentation::state::AppState;

use super::quiz_types::{QuizListResponse, error_response};

#[tracing::instrument(skip(state))]
pub async fn list_quizzes_handler<T, I>(State(state): State<AppState<T, I>>) -> Response
where
    T: TextExtractor + 'static + ?Sized,
    I: ImageExtractor + 'static + ?Sized,
{
    match state.quiz_service.list().await {
        Ok(summaries) => (StatusCode::OK, Json(QuizListResponse::from(summaries))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list quizzes");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list quizzes: {}", e),
            )
        }
    }
}
