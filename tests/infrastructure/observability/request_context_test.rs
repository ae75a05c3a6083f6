use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use tower::ServiceExt;

use quizpress::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, UPLOAD_SESSION_HEADER, UploadSession,
    request_context_middleware,
};

async fn echo_context(
    Extension(request_id): Extension<RequestId>,
    session: Option<Extension<UploadSession>>,
) -> String {
    let session = session.map(|Extension(s)| s.0).unwrap_or_default();
    format!("{}|{}", request_id.0, session)
}

fn app() -> Router {
    Router::new()
        .route("/", get(echo_context))
        .layer(middleware::from_fn(request_context_middleware))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn given_no_request_id_when_handling_then_one_is_generated_and_echoed() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&header).is_ok());
    assert_eq!(body_text(response).await, format!("{header}|"));
}

#[tokio::test]
async fn given_request_id_and_session_when_handling_then_both_reach_the_handler() {
    let request = Request::get("/")
        .header(REQUEST_ID_HEADER, "req-42")
        .header(UPLOAD_SESSION_HEADER, " editor-7 ")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
    assert_eq!(body_text(response).await, "req-42|editor-7");
}

#[tokio::test]
async fn given_blank_session_header_when_handling_then_no_session_is_attached() {
    let request = Request::get("/")
        .header(REQUEST_ID_HEADER, "req-1")
        .header(UPLOAD_SESSION_HEADER, "   ")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(body_text(response).await, "req-1|");
}
