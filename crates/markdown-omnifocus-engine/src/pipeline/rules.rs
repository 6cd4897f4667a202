//! # Field Rules
//!
//! Each [`Rule`] pairs a pattern with a handler. Applying a rule finds every
//! match in the task name as it stands, then folds the handler over those
//! matches. Handlers record what they found and strip the annotation from the
//! name.
//!
//! [`RULES`] runs in a fixed order and the order matters:
//!
//! 1. markdown links, so their URLs cannot be read as `//` date markers
//! 2. wiki links
//! 3. numeric dates, before the looser word-date rule can take their year
//! 4. word dates (`today`, `next week`, `Tue`)
//! 5. `[key:: value]` inline fields
//! 6. `#tags`

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::fields::TaskFields;
use crate::links::LinkResolver;

/// Turns one match into changes on the fields
pub type Handler = fn(&Captures<'_>, TaskFields, &dyn LinkResolver) -> TaskFields;

/// A named pattern and the handler run for each of its matches
pub struct Rule {
    pub name: &'static str,
    pattern: fn() -> &'static Regex,
    accepts: fn(&str, &Captures<'_>) -> bool,
    handler: Handler,
}

impl Rule {
    pub fn pattern(&self) -> &'static Regex {
        (self.pattern)()
    }

    /// Apply this rule to every match in the current name.
    ///
    /// Matches are collected before any handler runs, so a handler's edits to
    /// the name never create or hide matches for the same rule.
    pub fn apply(&self, fields: TaskFields, links: &dyn LinkResolver) -> TaskFields {
        let name = fields.name.clone();
        let fields = self
            .pattern()
            .captures_iter(&name)
            .filter(|caps| (self.accepts)(&name, caps))
            .fold(fields, |fields, caps| {
                log::debug!("Rule `{}` matched {:?}", self.name, &caps[0]);
                (self.handler)(&caps, fields, links)
            });
        fields
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern().as_str())
            .finish()
    }
}

/// All rules in the order they must run
pub static RULES: [Rule; 6] = [
    MARKDOWN_LINK_RULE,
    WIKI_LINK_RULE,
    DATE_RULE,
    RELATIVE_DATE_RULE,
    INLINE_FIELD_RULE,
    TAG_RULE,
];

pub const MARKDOWN_LINK_RULE: Rule = Rule {
    name: "markdown-link",
    pattern: markdown_link_regex,
    accepts: anywhere,
    handler: markdown_link,
};

pub const WIKI_LINK_RULE: Rule = Rule {
    name: "wiki-link",
    pattern: wiki_link_regex,
    accepts: anywhere,
    handler: wiki_link,
};

pub const DATE_RULE: Rule = Rule {
    name: "date",
    pattern: date_regex,
    accepts: not_after_colon,
    handler: date,
};

pub const RELATIVE_DATE_RULE: Rule = Rule {
    name: "relative-date",
    pattern: relative_date_regex,
    accepts: not_after_colon,
    handler: relative_date,
};

pub const INLINE_FIELD_RULE: Rule = Rule {
    name: "inline-field",
    pattern: inline_field_regex,
    accepts: anywhere,
    handler: inline_field,
};

pub const TAG_RULE: Rule = Rule {
    name: "tag",
    pattern: tag_regex,
    accepts: anywhere,
    handler: tag,
};

/// `[text](url)`
pub(crate) fn markdown_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[(?P<text>[^\]]+)\]\((?P<url>[^)]+)\)").expect("Invalid markdown link regex")
    })
}

/// `[[target]]` or `[[target|alias]]`
fn wiki_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\[(?P<target>[^\]|]+)(?:\|(?P<alias>[^\]]+))?\]\]")
            .expect("Invalid wiki link regex")
    })
}

fn anywhere(_: &str, _: &Captures<'_>) -> bool {
    true
}

/// Date markers may not follow `:` so `https://` is never a date
fn not_after_colon(name: &str, caps: &Captures<'_>) -> bool {
    let start = caps.get(0).map_or(0, |m| m.start());
    !name[..start].ends_with(':')
}

/// `// 2025-03-01` or `// 2025/03/01`
fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"//\s*(?P<date>\d{4}[-/]\d{2}[-/]\d{2})\s?")
            .expect("Invalid date regex")
    })
}

/// `// today`, `// next week`, `// Tue`
fn relative_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?P<marker>//\s*)(?P<date>(?:(?:next|last)\s)?\w+)\s?")
            .expect("Invalid relative date regex")
    })
}

/// `[key:: value]`, with the space before it
fn inline_field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\s?\[(?P<key>\w+)::\s*(?P<value>[^\]]+)\]")
            .expect("Invalid inline field regex")
    })
}

/// `#tag`, with the space before it
fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s?#(?P<tag>[a-z]\w*)").expect("Invalid tag regex"))
}

fn markdown_link(caps: &Captures<'_>, mut fields: TaskFields, _: &dyn LinkResolver) -> TaskFields {
    let text = &caps["text"];
    fields.name = fields.name.replacen(&caps[0], text, 1);
    fields.push_note_link(text, &caps["url"]);
    fields
}

fn wiki_link(caps: &Captures<'_>, mut fields: TaskFields, links: &dyn LinkResolver) -> TaskFields {
    let target = &caps["target"];
    let shown = caps
        .name("alias")
        .map_or_else(|| page_title(target), |m| m.as_str());
    fields.push_note_link(shown, &links.navigation_url(target));
    fields.name = fields.name.replacen(&caps[0], shown, 1);
    fields
}

/// `Guide#Setup` shows as `Guide`; a bare `#Setup` shows as `Setup`
fn page_title(target: &str) -> &str {
    match target.split(['#', '^']).next().map(str::trim) {
        Some(page) if !page.is_empty() => page,
        _ => target.trim_start_matches(['#', '^']).trim(),
    }
}

fn date(caps: &Captures<'_>, mut fields: TaskFields, _: &dyn LinkResolver) -> TaskFields {
    fields.due = caps["date"].to_string();
    fields.name = fields.name.replacen(&caps[0], "", 1);
    fields
}

fn relative_date(caps: &Captures<'_>, mut fields: TaskFields, _: &dyn LinkResolver) -> TaskFields {
    fields.due = caps["date"].to_string();
    // Strip the marker and the date words; the trailing space stays
    let annotated = format!("{}{}", &caps["marker"], &caps["date"]);
    fields.name = fields.name.replacen(&annotated, "", 1);
    fields
}

fn inline_field(caps: &Captures<'_>, mut fields: TaskFields, _: &dyn LinkResolver) -> TaskFields {
    let value = caps["value"].trim();
    if value.is_empty() {
        log::debug!("Inline field `{}` has no value", &caps["key"]);
    } else {
        fields.set_field(&caps["key"], value);
    }
    fields.name = fields.name.replacen(&caps[0], "", 1);
    fields
}

fn tag(caps: &Captures<'_>, mut fields: TaskFields, _: &dyn LinkResolver) -> TaskFields {
    fields.add_tag(&caps["tag"]);
    fields.name = fields.name.replacen(&caps[0], "", 1);
    fields
}
