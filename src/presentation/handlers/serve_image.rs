use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use crate::application::ports::{ImageExtractor, ImageStoreError, TextExtractor};
use crate::application::services::QuizServiceError;
use crate::domain::ImageKey;
use crate::presentation::state::AppState;

use super::quiz_types::error_response;

#[tracing::instrument(skip(state))]
pub async fn serve_image_handler<T, I>(
    State(state): State<AppState<T, I>>,
    Path(key): Path<String>,
) -> Response
where
    T: TextExtractor + 'static + ?Sized,
    I: ImageExtractor + 'static + ?Sized,
{
    let key = ImageKey::from_raw(key);

    match state.quiz_service.load_image(&key).await {
        Ok(image) => (StatusCode::OK, [(CONTENT_TYPE, image.content_type)], image.data).into_response(),
        Err(QuizServiceError::ImageStorage(ImageStoreError::InvalidKey(_))) => {
            error_response(StatusCode::BAD_REQUEST, format!("Invalid image key: {}", key))
        }
        Err(QuizServiceError::ImageStorage(ImageStoreError::NotFound(_))) => {
            error_response(StatusCode::NOT_FOUND, format!("Image not found: {}", key))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load image");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load image: {}", e),
            )
        }
    }
}
