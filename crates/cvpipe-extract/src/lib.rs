//! Education-history extraction pipeline
//!
//! Scans a directory of `<row>.pdf` files, extracts each document's
//! text, narrows it to a context window around the education section,
//! and asks a pluggable completion backend (local model server or
//! hosted API) for a structured record. Successes are merged into a CSV
//! sorted by spreadsheet row number.

pub mod backend;
pub mod context;
pub mod pdf;
pub mod runner;
pub mod scan;
pub mod table;

pub use backend::{BackendKind, CompletionBackend, OllamaBackend, OpenAiBackend, Record};
pub use runner::run;
