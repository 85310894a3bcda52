//! Core rendering abstractions.
//!
//! This crate provides the seam between the assembled document tree and a
//! concrete package format:
//! - `DocumentRenderer` trait for serializing a [`DocumentTree`]
//! - Error types for rendering operations

mod error;
mod traits;

pub use error::RenderError;
pub use traits::DocumentRenderer;

pub use inspecta_idf::DocumentTree;
