//! # Task Extraction
//!
//! Finds checklist items in a markdown document and yields them as [`RawTask`]s.
//!
//! A checklist item is a single line:
//!
//! ```text
//! <indent><- or *> [ ] <text>
//! ```
//!
//! In [`ExtractionMode::Block`] the lines directly below an item are absorbed
//! as its note while each of them:
//!
//! - starts with the item's exact indent string followed by at least one more
//!   space or tab,
//! - then has a bullet (`-` or `*`), whitespace and some text,
//! - and that text does not itself start with a checkbox.
//!
//! Absorbed lines lose the item's indent plus one whitespace character. A blank
//! line, a line at or above the item's indent, or a nested checklist item ends
//! the block. Nested checklist items are still reported, as their own tasks.
//!
//! [`ExtractionMode::Line`] reports every checklist line and never absorbs notes.

mod raw_task;

pub use raw_task::{RawTask, SENTINEL};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Peekable;
use std::str::{FromStr, Lines};
use std::sync::OnceLock;

/// How checklist items and their continuation lines are recognised
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMode {
    /// Checklist item plus nested bullet lines as its note
    #[default]
    Block,
    /// Every checklist line on its own, no notes
    Line,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Block => write!(f, "block"),
            ExtractionMode::Line => write!(f, "line"),
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(ExtractionMode::Block),
            "line" => Ok(ExtractionMode::Line),
            other => Err(format!(
                "unknown extraction mode `{other}` (expected `block` or `line`)"
            )),
        }
    }
}

fn task_line_regex() -> &'static Regex {
    static TASK_LINE: OnceLock<Regex> = OnceLock::new();
    TASK_LINE.get_or_init(|| {
        Regex::new(r"^([ \t]*)([-*])[ \t]+\[ \][ \t]+(\S.*)$").expect("Invalid task line regex")
    })
}

fn continuation_regex() -> &'static Regex {
    static CONTINUATION: OnceLock<Regex> = OnceLock::new();
    CONTINUATION.get_or_init(|| {
        Regex::new(r"^[ \t]+[-*][ \t]+(\S.*)$").expect("Invalid continuation regex")
    })
}

fn checkbox_regex() -> &'static Regex {
    static CHECKBOX: OnceLock<Regex> = OnceLock::new();
    CHECKBOX.get_or_init(|| Regex::new(r"^\[.\]").expect("Invalid checkbox regex"))
}

/// A line recognised as an open checklist item, borrowed from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChecklistLine<'a> {
    indent: &'a str,
    bullet: &'a str,
    text: &'a str,
}

impl<'a> ChecklistLine<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let caps = task_line_regex().captures(line)?;
        Some(Self {
            indent: caps.get(1)?.as_str(),
            bullet: caps.get(2)?.as_str(),
            text: caps.get(3)?.as_str(),
        })
    }

    /// The same item with its box ticked
    fn completed(&self) -> String {
        format!("{}{} [x] {}", self.indent, self.bullet, self.text)
    }

    /// Returns `line` dedented by this item's indent plus one whitespace
    /// character when it continues the item's note.
    fn continuation<'l>(&self, line: &'l str) -> Option<&'l str> {
        let rest = line.strip_prefix(self.indent)?;
        let caps = continuation_regex().captures(rest)?;
        if checkbox_regex().is_match(caps.get(1)?.as_str()) {
            return None;
        }
        // `rest` starts with a single-byte space or tab, guaranteed by the regex
        Some(&rest[1..])
    }
}

/// Scans text for checklist items in a fixed [`ExtractionMode`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskExtractor {
    mode: ExtractionMode,
}

impl TaskExtractor {
    pub fn new(mode: ExtractionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    /// Lazily yield the tasks in `text`, in document order
    pub fn extract<'a>(&self, text: &'a str) -> Tasks<'a> {
        Tasks {
            lines: text.lines().peekable(),
            mode: self.mode,
        }
    }

    /// Tick the checkbox of every open checklist line in `text`.
    ///
    /// Bullets, indentation, note blocks and line endings are kept as they were.
    /// Ticked items no longer match, so applying this twice changes nothing more.
    /// Both modes recognise the same checklist lines, so the result does not
    /// depend on the mode.
    pub fn mark_complete(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 8);
        for line in text.split_inclusive('\n') {
            let content = line.trim_end_matches(['\n', '\r']);
            match ChecklistLine::parse(content) {
                Some(item) => {
                    out.push_str(&item.completed());
                    out.push_str(&line[content.len()..]);
                }
                None => out.push_str(line),
            }
        }
        out
    }
}

/// Iterator returned by [`TaskExtractor::extract`]
#[derive(Debug)]
pub struct Tasks<'a> {
    lines: Peekable<Lines<'a>>,
    mode: ExtractionMode,
}

impl Iterator for Tasks<'_> {
    type Item = RawTask;

    fn next(&mut self) -> Option<RawTask> {
        // Not a `for` loop: continuation lines are pulled from the same iterator
        while let Some(line) = self.lines.next() {
            let Some(item) = ChecklistLine::parse(line) else {
                continue;
            };

            let mut note_lines = Vec::new();
            if self.mode == ExtractionMode::Block {
                while let Some(dedented) = self
                    .lines
                    .peek()
                    .copied()
                    .and_then(|l| item.continuation(l))
                {
                    note_lines.push(dedented);
                    self.lines.next();
                }
            }

            return Some(RawTask::new(
                item.text.trim(),
                note_lines.join("\n").trim(),
            ));
        }
        None
    }
}
