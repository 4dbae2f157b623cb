use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Index error: {0}")]
    Index(String),

    #[error("Non-numeric column: {0}")]
    NonNumeric(String),

    #[error("Dataset load error: {0}")]
    DatasetLoad(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Session protocol error: {0}")]
    Protocol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, ChatError>;
