use thiserror::Error;

/// Why a document or an LLM response was rejected. Item indexes are zero-based.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported syllabus file type '{0}' (expected .pdf, .docx, .txt or .md)")]
    UnsupportedFile(String),

    #[error("could not read DOCX: {0}")]
    Docx(String),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("no text found in the document")]
    NoText,

    #[error("LLM output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of assignments")]
    NotAnArray,

    #[error("expected at least one assignment")]
    Empty,

    #[error("assignment #{index}: {message}")]
    Schema { index: usize, message: String },

    #[error("assignment #{index}: field '{field}' {reason}")]
    Field {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("assignment #{index}: {source}")]
    Date {
        index: usize,
        #[source]
        source: pika_core::Error,
    },
}
