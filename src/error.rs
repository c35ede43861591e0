use thiserror::Error;

use crate::config::ConfigError;
use crate::property::PropertyError;
use crate::scene::ObjectId;

/// Failures reported by the rendering engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to decode image {src}: {reason}")]
    ImageDecode { src: String, reason: String },

    #[error("failed to deserialize scene: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("failed to clone object {0}")]
    Clone(ObjectId),

    #[error("export failed: {0}")]
    Export(String),

    #[error("object {0} is not on the canvas")]
    UnknownObject(ObjectId),
}

/// Errors surfaced by the editor façade to its caller.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize scene: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for façade operations
pub type EditorResult<T> = Result<T, EditorError>;
