//! WordprocessingML package renderer.
//!
//! Serializes an assembled [`inspecta_idf::DocumentTree`] into a `.docx`
//! (Open Packaging Conventions zip) package: one main document part, one
//! header part, one footer part, styles, settings, document properties and
//! the embedded media.

mod helpers;
mod markup;
mod renderer;
mod writer;

pub use renderer::DocxRenderer;
