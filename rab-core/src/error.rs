//! Errors in the library.
use thiserror::Error;

/// Errors raised while turning a session record into a dataset.
///
/// Every variant is fatal: the transform either completes or returns one of
/// these without a partial result.
#[derive(Error, Debug)]
pub enum RabError {
    /// A stream required to drive the transform is empty.
    #[error("Empty record error: stream {0} is empty")]
    EmptyRecordError(String),

    /// A truncation or reshape does not fit the stream it is applied to.
    #[error("Shape error: {0}")]
    ShapeError(String),

    /// The input could not be parsed as a session record.
    #[error("Decode error: {0}")]
    DecodeError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The record has no stream with the requested name.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// The configuration cannot describe a valid dataset.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Reading the input failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RabError {
    /// Builds a [`RabError::ShapeError`] for a stream that is too short.
    pub fn shape(name: &str, required: usize, available: usize) -> Self {
        Self::ShapeError(format!(
            "stream {} has {} elements, {} required",
            name, available, required
        ))
    }

    /// Wraps a decoder failure into [`RabError::DecodeError`].
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::DecodeError(Box::new(err))
    }
}
