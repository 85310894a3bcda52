use crate::error::RenderError;
use inspecta_idf::DocumentTree;
use std::io::{Seek, Write};

/// Serializes an assembled document into a concrete package format.
pub trait DocumentRenderer {
    /// File extension of the produced package, without the dot.
    fn extension(&self) -> &'static str;

    /// Writes the whole package to `writer` and hands the writer back.
    fn render<W: Write + Seek>(&self, document: &DocumentTree, writer: W) -> Result<W, RenderError>;

    /// Convenience wrapper producing an in-memory buffer.
    fn render_to_vec(&self, document: &DocumentTree) -> Result<Vec<u8>, RenderError> {
        let cursor = self.render(document, std::io::Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }
}
