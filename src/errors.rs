// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum GradeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("Received empty feedback from model")]
    EmptyReply,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must contain a column labeled 'Essay'.")]
    MissingEssayColumn,

    #[error("Please enter an essay before grading.")]
    EmptyEssay,
}

pub type Result<T> = std::result::Result<T, GradeError>;
