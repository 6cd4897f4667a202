/// Unit separator used to carry a task's name and note through one string.
///
/// Never appears in markdown text typed by a person.
pub const SENTINEL: char = '\u{1f}';

/// One checklist item as found in the document, before any field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTask {
    name: String,
    note: String,
}

impl RawTask {
    pub fn new(name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            note: note.into(),
        }
    }

    /// Task text from the checklist line, trimmed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dedented continuation lines, or an empty string
    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }

    /// Join name and note with [`SENTINEL`]. A task without a note is just its name.
    pub fn to_wire(&self) -> String {
        if self.has_note() {
            format!("{}{SENTINEL}{}", self.name, self.note)
        } else {
            self.name.clone()
        }
    }

    /// Split on the first [`SENTINEL`]; anything after it is the note.
    pub fn from_wire(wire: &str) -> Self {
        match wire.split_once(SENTINEL) {
            Some((name, note)) => Self::new(name, note),
            None => Self::new(wire, ""),
        }
    }
}

impl From<&str> for RawTask {
    fn from(wire: &str) -> Self {
        Self::from_wire(wire)
    }
}
