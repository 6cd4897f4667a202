pub mod command;
pub mod extract;
pub mod host;
pub mod io;
pub mod links;
pub mod pipeline;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use command::*;
pub use extract::{ExtractionMode, RawTask, SENTINEL, TaskExtractor, Tasks};
pub use host::*;
pub use links::*;
pub use pipeline::{FieldPipeline, NotePlacement, PipelineOptions, TaskFields, rules::RULES};
