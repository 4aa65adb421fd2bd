use thiserror::Error;

#[derive(Error, Debug)]
pub enum PictorError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fetching photo data failed: {0}")]
    Fetch(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PictorError>;
