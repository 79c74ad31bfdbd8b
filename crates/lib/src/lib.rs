//! # Blog Repurposer
//!
//! Turns one blog post into a bundle of social and SEO assets. A request passes
//! through URL validation, content acquisition, metadata extraction and a single
//! structured AI call. See [`RepurposePipeline`] for the entry point.

pub mod acquire;
pub mod constants;
pub mod errors;
pub mod export;
pub mod generate;
pub mod history;
pub mod metadata;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod schema;
pub mod types;
pub mod validate;

pub use errors::{ErrorKind, ErrorResponse, PipelineError};
pub use generate::GenerationOptions;
pub use history::{FileHistoryStore, HistoryEntry, HistoryStore, MemoryHistoryStore};
pub use pipeline::RepurposePipeline;
pub use types::{BlogMeta, RepurposedContent, SourceRequest, ToneOption};
