//! Error types for waymark-core

use thiserror::Error;

use crate::models::CityId;

/// Result type alias using waymark-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in waymark-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error (connectivity, timeout, malformed response)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote store responded with a non-success status
    #[error("Store API error: {message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),

    /// City lookup returned no record
    #[error("City not found: {0}")]
    NotFound(CityId),

    /// A serialized action carried an unrecognized kind tag
    #[error("Unknown action kind: {kind}")]
    UnknownAction { kind: String },

    /// The session owning the city store has been torn down
    #[error("Session scope is no longer available")]
    ContextUnavailable,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
