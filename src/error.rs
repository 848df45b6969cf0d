use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON class file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV class file: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported class file extension: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("invalid class record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderError {
    #[error("no students selected")]
    NoRecipients,

    #[error("message is empty")]
    EmptyMessage,

    #[error("message length {0} exceeds the limit of {max}", max = crate::reminder::MAX_MESSAGE_CHARS)]
    MessageTooLong(usize),

    #[error("student {0} is not on the class roster")]
    UnknownStudent(String),
}
