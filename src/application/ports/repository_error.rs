#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("quiz already exists: {0}")]
    AlreadyExists(String),
    #[error("stored data is corrupt: {0}")]
    CorruptRecord(String),
    #[error("unsupported image handle: {0}")]
    UnsupportedImage(String),
}
