//! Document rendering
//!
//! Layout and typesetting live behind [`DocumentRenderer`]: the job hands it a
//! [`Document`] and writes whatever bytes come back. [`TextRenderer`] is the
//! built-in implementation.

pub mod document;
pub mod text;

pub use document::{Document, DocumentCenter, RenderedDocument};
pub use text::TextRenderer;

use crate::domain::Result;

/// Turns documents into file contents
pub trait DocumentRenderer: Send + Sync {
    /// Render one document
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::RollError::Render`] if the document cannot be
    /// produced.
    fn render(&self, document: &Document<'_>) -> Result<RenderedDocument>;

    /// File extension for rendered output, without the dot
    fn extension(&self) -> &str;
}
