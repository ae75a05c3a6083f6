use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ImageExtractor, TextExtractor};
use crate::infrastructure::observability::request_context_middleware;
use crate::presentation::handlers::{
    create_quiz_handler, get_quiz_handler, health_handler, import_quiz_handler,
    list_quizzes_handler, serve_image_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<T, I>(state: AppState<T, I>) -> Router
where
    T: TextExtractor + 'static + ?Sized,
    I: ImageExtractor + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.server.max_upload_bytes());

    Router::new()
        .route("/health", get(health_handler::<T, I>))
        .route(
            "/api/v1/quizzes",
            get(list_quizzes_handler::<T, I>).post(create_quiz_handler::<T, I>),
        )
        .route(
            "/api/v1/quizzes/import",
            post(import_quiz_handler::<T, I>),
        )
        .route("/api/v1/quizzes/{quiz_id}", get(get_quiz_handler::<T, I>))
        .route("/images/{*key}", get(serve_image_handler::<T, I>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_context_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
