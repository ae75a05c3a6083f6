use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{ImageExtractor, TextExtractor};
use crate::presentation::config::{DatabaseProvider, StorageProviderSetting};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: DatabaseProvider,
    pub storage: StorageProviderSetting,
}

/// Liveness plus the backends this instance was configured with.
pub async fn health_handler<T, I>(State(state): State<AppState<T, I>>) -> impl IntoResponse
where
    T: TextExtractor + 'static + ?Sized,
    I: ImageExtractor + 'static + ?Sized,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database: state.settings.database.provider,
            storage: state.settings.storage.provider,
        }),
    )
}
