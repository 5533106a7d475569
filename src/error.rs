use thiserror::Error;

use crate::schema::SchemaKind;

#[derive(Debug, Error)]
pub enum AdcraftError {
    /// No caller identity was attached to the request.
    #[error("Unauthorized")]
    Unauthorized,

    /// The composer gave up waiting for the dispatcher.
    #[error("{0}")]
    Timeout(String),

    /// The model answered but produced neither usable text nor an image.
    #[error("Generation failed: {0}")]
    EmptyResponse(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Output does not match the {schema} schema: {reason}")]
    SchemaMismatch { schema: SchemaKind, reason: String },

    /// Composer-side failure channel. Server errors and transport errors land
    /// here alike.
    #[error("{0}")]
    Failed(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AdcraftError {
    /// HTTP status used when this error crosses the `/generate` boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            AdcraftError::Unauthorized => 401,
            _ => 500,
        }
    }

    pub fn schema_mismatch(schema: SchemaKind, reason: impl Into<String>) -> Self {
        AdcraftError::SchemaMismatch {
            schema,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdcraftError>;
