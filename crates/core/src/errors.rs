use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Schedule conflict: {0}")]
    Conflict(String),

    #[error("Sessions already generated: {0}")]
    AlreadyGenerated(String),

    #[error("Malformed weekly schedule: {0}")]
    MalformedSchedule(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type CareResult<T> = Result<T, CareError>;
