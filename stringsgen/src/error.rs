//! All error types for the stringsgen crate.
//!
//! Every stage of the pipeline fails with [`Error`]; a failure aborts the
//! whole compilation and no output is produced.

use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid key path '{0}'")]
    InvalidKeyPath(String),

    #[error(
        "string '{key}' uses unknown plural category '{category}'. Supported plural categories: zero, one, two, few, many & other"
    )]
    UnknownPluralCategory { key: String, category: String },

    #[error(
        "string '{key}' uses conflicting key template parameters '{first}' and '{second}' across its plural variants"
    )]
    ConflictingKeyParameter {
        key: String,
        first: String,
        second: String,
    },

    #[error("string '{0}' cannot have pluralized and non-pluralized values")]
    MixedPluralization(String),

    #[error("string '{key}': {source}")]
    Template {
        key: String,
        #[source]
        source: TemplateError,
    },

    #[error("'{0}' is used both as a string and as a namespace")]
    NameCollision(String),

    #[error("not in .strings format: {0}")]
    Decode(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new decode error for input that is not a flat string mapping.
    pub fn decode_error(message: impl Into<String>) -> Self {
        Error::Decode(message.into())
    }
}
