mod init_tracing;
mod log_preview;
mod request_context;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use log_preview::preview_for_log;
pub use request_context::{
    REQUEST_ID_HEADER, RequestId, UPLOAD_SESSION_HEADER, UploadSession,
    request_context_middleware,
};
pub use tracing_config::TracingConfig;
