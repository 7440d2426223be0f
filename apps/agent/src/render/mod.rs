// PDF output.
// formatter.rs turns question records into a `QuestionDocument`; pdf.rs draws it.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod formatter;
pub mod pdf;

use bytes::Bytes;
use thiserror::Error;

pub use formatter::{format_document, question_preview, QuestionDocument};
pub use pdf::PdfRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document has no questions")]
    EmptyDocument,

    #[error("PDF library error: {0}")]
    Pdf(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Turns a formatted document into file bytes. CPU work only, no I/O.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &QuestionDocument) -> Result<Bytes, RenderError>;

    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }
}
