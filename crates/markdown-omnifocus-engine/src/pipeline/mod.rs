//! # Field Pipeline
//!
//! Turns a [`RawTask`] into an OmniFocus `add` URL:
//!
//! 1. [`TaskFields::from_raw`] seeds the fields from the task.
//! 2. Every rule in [`RULES`] is folded over the fields, in order.
//! 3. The name is tidied and the note is combined with the base note.
//! 4. The fields are serialized as `<scheme>:///<action>?name=..&note=..&due=..`.
//!
//! Malformed annotations are left in the name untouched; building a URL
//! never fails.

mod fields;
pub mod rules;

pub use fields::TaskFields;
pub use rules::{RULES, Rule};

use serde::{Deserialize, Serialize};

use crate::extract::RawTask;
use crate::links::LinkResolver;

/// Where the base note goes relative to the task's own note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotePlacement {
    /// Task note first, base note as trailing context
    #[default]
    Append,
    /// Base note first, task note below it
    Prepend,
}

impl NotePlacement {
    /// Combine a trimmed note body with the base note.
    ///
    /// An empty body yields the base note alone whichever the placement.
    pub fn combine(self, body: &str, base_note: &str) -> String {
        if body.is_empty() {
            return base_note.to_string();
        }
        match self {
            NotePlacement::Append => format!("{body}\n\n{base_note}"),
            NotePlacement::Prepend => format!("{}\n\n{body}", base_note.trim_end()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// URL scheme of the receiving app
    pub scheme: String,
    /// Action path after the scheme
    pub action: String,
    pub note_placement: NotePlacement,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            scheme: "omnifocus".to_string(),
            action: "add".to_string(),
            note_placement: NotePlacement::default(),
        }
    }
}

/// Applies [`RULES`] to raw tasks and encodes the result.
///
/// Holds no per-task state; each call starts from fresh fields.
pub struct FieldPipeline<'a> {
    options: PipelineOptions,
    links: &'a dyn LinkResolver,
    base_note: String,
}

impl<'a> FieldPipeline<'a> {
    /// `base_note` is added to every task's note, usually a link back to the
    /// source document.
    pub fn new(
        options: PipelineOptions,
        links: &'a dyn LinkResolver,
        base_note: impl Into<String>,
    ) -> Self {
        Self {
            options,
            links,
            base_note: base_note.into(),
        }
    }

    /// Run every rule and finish the fields, without encoding
    pub fn fields(&self, task: &RawTask) -> TaskFields {
        let fields = RULES
            .iter()
            .fold(TaskFields::from_raw(task), |fields, rule| {
                rule.apply(fields, self.links)
            });
        self.finish(fields)
    }

    /// Encoded command URL for one task
    pub fn process(&self, task: &RawTask) -> String {
        self.url(&self.fields(task))
    }

    /// Encoded command URLs for each task, in input order
    pub fn process_all(&self, tasks: &[RawTask]) -> Vec<String> {
        tasks.iter().map(|task| self.process(task)).collect()
    }

    pub fn url(&self, fields: &TaskFields) -> String {
        format!(
            "{}:///{}?{}",
            self.options.scheme,
            self.options.action,
            fields.to_query()
        )
    }

    fn finish(&self, mut fields: TaskFields) -> TaskFields {
        // Stripped annotations leave stray and doubled spaces behind
        fields.name = fields.name.split_whitespace().collect::<Vec<_>>().join(" ");

        let note = {
            let body = rules::markdown_link_regex().replace_all(&fields.note, "$text <$url>");
            self.options
                .note_placement
                .combine(body.trim(), &self.base_note)
        };
        fields.note = note;
        fields
    }
}
