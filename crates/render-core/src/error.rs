use thiserror::Error;

/// Failures while serializing a document. All of them are fatal.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Package archive error: {0}")]
    Package(String),
    #[error("Markup error: {0}")]
    Markup(String),
    #[error("Document references unknown media item {0}")]
    MissingMedia(usize),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
