//! Error handling for the JD matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Chunking failed: {0}")]
    Chunking(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("Quiz generation error: {0}")]
    QuizGeneration(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

impl MatcherError {
    /// Whether this is user-correctable bad input rather than an internal
    /// failure. The boundary layer maps this onto its status reporting.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            MatcherError::EmptyInput(_)
                | MatcherError::Chunking(_)
                | MatcherError::InvalidInput(_)
                | MatcherError::UnsupportedFormat(_)
        )
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::Embedding(err.to_string())
    }
}
