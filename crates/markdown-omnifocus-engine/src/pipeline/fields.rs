use indexmap::IndexMap;

use crate::extract::RawTask;
use crate::links::encode_component;

/// Structured task record built up by the rules.
///
/// Serializes to a query string in a fixed order: `name`, `note`, `due`, the
/// inline fields in the order first seen, then `context` when any was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub note: String,
    pub due: String,
    /// Fields from `[key:: value]` annotations
    pub extra: IndexMap<String, String>,
    /// Comma-joined tags
    pub context: Option<String>,
}

impl TaskFields {
    /// Fields as they stand before any rule runs.
    ///
    /// A task note is followed by a blank line so link lines appended by the
    /// rules start a new paragraph.
    pub fn from_raw(task: &RawTask) -> Self {
        let note = if task.has_note() {
            format!("{}\n\n", task.note().trim_end())
        } else {
            String::new()
        };
        Self {
            name: task.name().to_string(),
            note,
            ..Self::default()
        }
    }

    /// Record an inline field. A repeated key keeps its first position and
    /// takes the latest value.
    ///
    /// `due` and `context` write the declared fields; `name` and `note` are
    /// reserved and ignored.
    pub fn set_field(&mut self, key: &str, value: &str) {
        match key {
            "name" | "note" => log::debug!("Ignoring reserved inline field `{key}`"),
            "due" => self.due = value.to_string(),
            "context" => self.context = Some(value.to_string()),
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
    }

    /// Append a tag to `context`, keeping duplicates and order
    pub fn add_tag(&mut self, tag: &str) {
        match &mut self.context {
            Some(context) => {
                context.push(',');
                context.push_str(tag);
            }
            None => self.context = Some(tag.to_string()),
        }
    }

    /// Append one `label: url` line to the note
    pub fn push_note_link(&mut self, label: &str, url: &str) {
        self.note.push_str(label);
        self.note.push_str(": ");
        self.note.push_str(url);
        self.note.push('\n');
    }

    /// Every field as `(key, value)` in serialization order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        [
            ("name", self.name.as_str()),
            ("note", self.note.as_str()),
            ("due", self.due.as_str()),
        ]
        .into_iter()
        .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .chain(self.context.as_deref().map(|c| ("context", c)))
    }

    /// `key=value` pairs joined by `&`, values percent-encoded
    pub fn to_query(&self) -> String {
        self.entries()
            .map(|(key, value)| format!("{key}={}", encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
