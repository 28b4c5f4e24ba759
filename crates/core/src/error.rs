/// Result alias that carries the custom [`BeatStoreError`] type.
pub type Result<T> = std::result::Result<T, BeatStoreError>;

/// Common error type for the core crate.
///
/// Only catalog and configuration ingestion can fail. Queries and state
/// mutations on a loaded catalog are total.
#[derive(Debug, thiserror::Error)]
pub enum BeatStoreError {
    /// Free-form message for failures without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Two catalog records share the same id.
    #[error("duplicate beat id `{0}` in catalog")]
    DuplicateId(String),
    /// A catalog record carries a value outside its accepted domain.
    #[error("invalid beat `{id}`: {reason}")]
    InvalidBeat { id: String, reason: String },
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Malformed catalog or configuration JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl BeatStoreError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBeat {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
