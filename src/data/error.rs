use thiserror::Error;

/// Why a dataset could not be obtained. A failed load leaves no partial data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("data source answered with HTTP status {0}")]
    Status(u16),
    #[error("could not reach data source: {0}")]
    Transport(String),
    #[error("failed reading response body: {0}")]
    Body(String),
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("failed loading file: {0:#}")]
    File(anyhow::Error),
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

/// A single row that cannot be turned into a record. Such rows are skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("row {row} is not an object")]
    NotAnObject { row: usize },
    #[error("row {row}: field '{field}' is not {expected} (got {found})")]
    BadField {
        row: usize,
        field: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("row {row} could not be read: {message}")]
    Unreadable { row: usize, message: String },
}
