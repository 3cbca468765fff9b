use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record source '{path}' could not be loaded: {reason}")]
    InvalidRecordSource { path: String, reason: String },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
