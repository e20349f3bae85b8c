use std::sync::Arc;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the event envelope and function lookup. Handlers themselves never fail.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The event has no `Records[0].cf.request`.
    #[error("event has no CloudFront record")]
    MissingRecord,
    /// The event is not valid JSON or does not have the CloudFront shape.
    #[error("unable to parse CloudFront event")]
    // serde_json::Error is not clonable, so we're wrapping it in an Arc.
    InvalidEvent(#[source] Arc<serde_json::Error>),
    /// No edge function has the given name.
    #[error("unknown edge function: {0}")]
    UnknownFunction(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidEvent(Arc::new(value))
    }
}
