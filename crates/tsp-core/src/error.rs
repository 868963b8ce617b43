use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn too_many_points(points: usize, limit: usize) -> Self {
        Self::ResourceExhausted(format!(
            "{points} points exceeds the ceiling of {limit} (time and memory grow as N^2 * 2^N)"
        ))
    }

    pub fn allocation_failed(points: usize, entries: usize) -> Self {
        Self::ResourceExhausted(format!(
            "could not allocate a memo table of {entries} entries for {points} points"
        ))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalInconsistency(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, Self::ResourceExhausted(_))
    }
}
