//! Soft failures. Neither type aborts a generation run: the assembler turns
//! them into placeholders or empty letterhead cells and logs a warning.

use inspecta_traits::ResourceError;
use thiserror::Error;

/// Why a finding or topic image could not be embedded.
#[derive(Error, Debug, Clone)]
pub enum ImageFailure {
    #[error("Failed to fetch image '{reference}': {error}")]
    Fetch {
        reference: String,
        #[source]
        error: ResourceError,
    },
    #[error("Failed to decode image '{reference}': {message}")]
    Decode { reference: String, message: String },
    #[error("Failed to re-encode image '{reference}': {message}")]
    Encode { reference: String, message: String },
}

impl ImageFailure {
    /// The source reference that failed.
    pub fn reference(&self) -> &str {
        match self {
            ImageFailure::Fetch { reference, .. }
            | ImageFailure::Decode { reference, .. }
            | ImageFailure::Encode { reference, .. } => reference,
        }
    }
}

/// A header logo or footer banner that could not be used.
#[derive(Error, Debug, Clone)]
pub enum BrandingAssetError {
    #[error("No branding asset configured")]
    NotConfigured,
    #[error("Branding asset '{path}' is unavailable: {reason}")]
    Unavailable { path: String, reason: String },
}

impl From<ImageFailure> for BrandingAssetError {
    fn from(failure: ImageFailure) -> Self {
        BrandingAssetError::Unavailable {
            path: failure.reference().to_string(),
            reason: failure.to_string(),
        }
    }
}
