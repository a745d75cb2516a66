//! pika-ingest: turn syllabus documents into assignments, either with the
//! local line parsers or by validating what an LLM returned.

pub mod error;
pub mod extract;
pub mod parsers;
pub mod prompt;
pub mod types;

pub use error::IngestError;
pub use extract::{DocumentKind, extract_text};
pub use parsers::llm_json::{
    coerce_due_date, extract_json_candidate, normalize_llm_assignments, parse_llm_assignments,
};
pub use parsers::syllabus::{SYLLABUS_EXAMPLE, parse_syllabus_text};
pub use prompt::build_assignments_prompt;
pub use types::RawLlmAssignment;
