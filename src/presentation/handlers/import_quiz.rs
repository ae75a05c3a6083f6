use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Deserialize;

use crate::application::ports::{ImageExtractor, TextExtractor};
use crate::application::services::{IngestionError, RunTicket};
use crate::infrastructure::observability::{UPLOAD_SESSION_HEADER, preview_for_log};
use crate::presentation::state::AppState;

use super::quiz_types::{ImportResponse, error_response, publish_error_response};

#[derive(Debug, Default, Deserialize)]
pub struct ImportParams {
    #[serde(default)]
    pub persist: bool,
}

struct ImportUpload {
    filename: String,
    data: Bytes,
    title: Option<String>,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Option<ImportUpload>, String> {
    let mut file: Option<(String, Bytes)> = None;
    let mut title = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let data = field.bytes().await.map_err(|e| e.to_string())?;
                file = Some((filename, data));
            }
            Some("title") => title = Some(field.text().await.map_err(|e| e.to_string())?),
            _ => {}
        }
    }

    Ok(file.map(|(filename, data)| ImportUpload {
        filename,
        data,
        title,
    }))
}

#[tracing::instrument(skip(state, headers, multipart), fields(persist = params.persist))]
pub async fn import_quiz_handler<T, I>(
    State(state): State<AppState<T, I>>,
    Query(params): Query<ImportParams>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response
where
    T: TextExtractor + 'static + ?Sized,
    I: ImageExtractor + 'static + ?Sized,
{
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            tracing::warn!("Import request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart: {}", e),
            );
        }
    };

    tracing::debug!(
        filename = %preview_for_log(&upload.filename),
        bytes = upload.data.len(),
        "File data received"
    );

    let session = headers
        .get(UPLOAD_SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let ticket = state.ingestion_service.runs().begin(session);
    let response = import(&state, upload, params.persist, &ticket).await;
    drop(ticket);
    response
}

async fn import<T, I>(
    state: &AppState<T, I>,
    upload: ImportUpload,
    persist: bool,
    ticket: &RunTicket<'_>,
) -> Response
where
    T: TextExtractor + 'static + ?Sized,
    I: ImageExtractor + 'static + ?Sized,
{
    let outcome = match state
        .ingestion_service
        .ingest(upload.data, &upload.filename, upload.title)
        .await
    {
        Ok(outcome) => outcome,
        Err(IngestionError::UnsupportedFormat(what)) => {
            tracing::warn!(format = %what, "Unsupported upload format");
            return error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported file type: {}. Use .txt, .doc or .docx", what),
            );
        }
        Err(IngestionError::Extraction(e)) => {
            tracing::warn!(error = %e, "Document extraction failed");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
        }
    };

    if !ticket.is_current() {
        tracing::info!(run = ticket.run(), "Discarding superseded import");
        return error_response(
            StatusCode::CONFLICT,
            "Import superseded by a newer upload in this session",
        );
    }

    if !persist {
        let body = ImportResponse::new(&outcome.quiz, &outcome.anomalies, outcome.image_count);
        return (StatusCode::OK, Json(body)).into_response();
    }

    match state.quiz_service.publish(outcome.quiz).await {
        Ok(quiz) => {
            let body = ImportResponse::new(&quiz, &outcome.anomalies, outcome.image_count);
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to publish imported quiz");
            publish_error_response(&e)
        }
    }
}
