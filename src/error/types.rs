use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the layout_sync crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced around the layout engine.
///
/// The engine's broadcast operations never fail; these cover parsing,
/// configuration and the collaborators that talk to the outside world.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown layout schema `{0}`")]
    UnknownSchema(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("csrf preflight to `{url}` failed: {reason}")]
    CsrfPreflight { url: String, reason: String },
    #[error("csrf preflight response is missing header `{0}`")]
    CsrfHeaderMissing(String),
    #[error("logging failure: {0}")]
    Logging(#[from] LoggingError),
}
