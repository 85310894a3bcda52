// src/error.rs
use inspecta_render_core::RenderError;
use thiserror::Error;

/// Errors that abort a generation call. Image problems never show up here;
/// they degrade to placeholders inside the document.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration is invalid: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] RenderError),
}
