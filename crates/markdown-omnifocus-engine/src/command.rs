//! The two user-facing actions: extract the tasks of the whole document or of
//! the current selection, send them on, and optionally tick them off.

use std::fmt;

use crate::extract::{ExtractionMode, RawTask, TaskExtractor};
use crate::host::{Host, HostError};
use crate::links::VaultLinks;
use crate::pipeline::{FieldPipeline, PipelineOptions};

pub const NO_TASKS_MESSAGE: &str = "No tasks found in the selected text.";

/// Which text an extraction runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Document,
    Selection,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Document => write!(f, "document"),
            Scope::Selection => write!(f, "selection"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: ExtractionMode,
    /// Tick extracted items off in the source text afterwards
    pub mark_complete: bool,
    pub pipeline: PipelineOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing matched; the user has been told
    NoTasks,
    Sent { count: usize, marked_complete: bool },
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Failed to read {scope} text: {source}")]
    Read { scope: Scope, source: HostError },
    #[error("Failed to resolve the current file: {0}")]
    Location(HostError),
    #[error("Failed to send task {index} of {total}: {source}")]
    Dispatch {
        index: usize,
        total: usize,
        source: HostError,
    },
    #[error("Failed to mark tasks complete: {0}")]
    Rewrite(HostError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractCommand {
    pub scope: Scope,
}

impl ExtractCommand {
    pub fn new(scope: Scope) -> Self {
        Self { scope }
    }

    pub fn document() -> Self {
        Self::new(Scope::Document)
    }

    pub fn selection() -> Self {
        Self::new(Scope::Selection)
    }

    /// Extract, encode, then send.
    ///
    /// Every URL is built before the first one is opened. When opening one
    /// fails the run stops there: URLs already opened stay sent and the source
    /// text is left as it was.
    pub fn run(&self, host: &mut dyn Host, options: &RunOptions) -> Result<Outcome, CommandError> {
        let text = match self.scope {
            Scope::Document => host.document_text(),
            Scope::Selection => host.selected_text(),
        }
        .map_err(|source| CommandError::Read {
            scope: self.scope,
            source,
        })?;

        let extractor = TaskExtractor::new(options.mode);
        let tasks: Vec<RawTask> = extractor.extract(&text).collect();
        if tasks.is_empty() {
            log::warn!("No tasks found in {} ({} mode)", self.scope, options.mode);
            host.notify_user(NO_TASKS_MESSAGE);
            return Ok(Outcome::NoTasks);
        }

        let vault = host.collection_name().map_err(CommandError::Location)?;
        let file = host.current_file_path().map_err(CommandError::Location)?;
        let links = VaultLinks::new(vault);
        let base_note = format!("{}\n", links.file_url(&file));

        let pipeline = FieldPipeline::new(options.pipeline.clone(), &links, base_note);
        let urls = pipeline.process_all(&tasks);
        log::info!("Extracted {} task(s) from {} {}", urls.len(), self.scope, file);

        let total = urls.len();
        for (i, url) in urls.iter().enumerate() {
            log::debug!("Opening URL: {url}");
            host.open_external_command(url)
                .map_err(|source| CommandError::Dispatch {
                    index: i + 1,
                    total,
                    source,
                })?;
        }

        if options.mark_complete {
            let completed = extractor.mark_complete(&text);
            match self.scope {
                Scope::Document => host.replace_document_text(&completed),
                Scope::Selection => host.replace_selected_text(&completed),
            }
            .map_err(CommandError::Rewrite)?;
            log::info!("Marked {total} task(s) complete");
        }

        Ok(Outcome::Sent {
            count: total,
            marked_complete: options.mark_complete,
        })
    }
}
