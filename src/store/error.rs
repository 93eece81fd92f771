use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("listing not found: {0}")]
    NotFound(String),

    #[error("listing id already exists: {0}")]
    DuplicateId(String),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
