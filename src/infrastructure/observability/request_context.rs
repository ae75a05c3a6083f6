use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const UPLOAD_SESSION_HEADER: &str = "x-upload-session";

#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Client-chosen id grouping repeated imports from one editing session.
#[derive(Clone, Debug)]
pub struct UploadSession(pub String);

pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let upload_session = request
        .headers()
        .get(UPLOAD_SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from);

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));
    if let Some(session) = &upload_session {
        request
            .extensions_mut()
            .insert(UploadSession(session.clone()));
    }

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        upload_session = upload_session.as_deref().unwrap_or("-"),
        method = %request.method(),
        uri = %request.uri().path()
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
