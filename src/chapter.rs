//! Chapters and approximate word counting.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::markup::{strip_markup, MarkupMode, MarkupTokens};

/// Joins a source prefix and a chapter name into an identifier.
pub const SEPARATOR: &str = "_";

/// Number of characters of chapter text shown in info strings.
const SNIPPET_LENGTH: usize = 20;

/// Heuristic used to approximate the number of words in a chapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordCountRule {
    /// Spaces in the text plus the number of non-empty lines.
    SpacesPlusLines,
    /// For each non-empty line, its spaces plus one.
    SpacesPerLine,
}

impl WordCountRule {
    /// Approximate word count of plain `text`. Lines that begin with a
    /// chapter marker are ignored by both rules.
    pub fn count(self, text: &str) -> usize {
        let lines = text.lines().filter(|line| !line.starts_with("//"));
        match self {
            Self::SpacesPlusLines => {
                let (spaces, lines) = lines.fold((0, 0), |(spaces, count), line| {
                    (
                        spaces + line.matches(' ').count(),
                        count + usize::from(!line.is_empty()),
                    )
                });
                spaces + lines
            }
            Self::SpacesPerLine => lines
                .filter(|line| !line.is_empty())
                .map(|line| line.matches(' ').count() + 1)
                .sum(),
        }
    }
}

impl FromStr for WordCountRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "spaces-plus-lines" => Ok(Self::SpacesPlusLines),
            "spaces-per-line" => Ok(Self::SpacesPerLine),
            _ => Err(format!(
                "unknown word count rule '{s}' (expected 'spaces-plus-lines' or 'spaces-per-line')"
            )),
        }
    }
}

impl fmt::Display for WordCountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SpacesPlusLines => "spaces-plus-lines",
            Self::SpacesPerLine => "spaces-per-line",
        })
    }
}

/// A named run of prose taken from one batch file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chapter {
    prefix: String,
    name: String,
    text: String,
    /// Markup the text carries; counting looks through it.
    markup: MarkupMode,
}

impl Chapter {
    /// Create a chapter; `text` of `None` is distinct from empty text and is rejected.
    pub fn new(prefix: &str, name: &str, text: Option<String>) -> Result<Self> {
        let prefix = prefix.trim();
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName {
                prefix: prefix.to_string(),
            });
        }
        let text = text.ok_or_else(|| Error::MissingText(make_id(prefix, name)))?;
        Ok(Self {
            prefix: prefix.to_string(),
            name: name.to_string(),
            text,
            markup: MarkupMode::None,
        })
    }

    /// Mark the text as produced in `markup` mode.
    pub fn with_markup(mut self, markup: MarkupMode) -> Self {
        self.markup = markup;
        self
    }

    /// Base name of the batch file this chapter came from.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Accumulated text, in the form it is written out.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Identifier of the form `prefix_name`.
    pub fn id(&self) -> String {
        make_id(&self.prefix, &self.name)
    }

    /// Append the text of another chapter, keeping line boundaries intact.
    pub fn append_text(&mut self, text: &str) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(text);
    }

    /// Approximate words in the prose, ignoring any escape sequences.
    pub fn word_count(&self, rule: WordCountRule) -> usize {
        match self.markup {
            MarkupMode::None => rule.count(&self.text),
            MarkupMode::EscapeAndBreak => rule.count(&strip_markup(&self.text, &MarkupTokens::RTF)),
        }
    }

    /// One-line summary: `id "snippet..." (words)`.
    pub fn info_string(&self, rule: WordCountRule) -> String {
        let snippet: String = self
            .text
            .chars()
            .take(SNIPPET_LENGTH)
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        format!(
            "{} \"{}...\" ({})",
            self.id(),
            snippet,
            self.word_count(rule)
        )
    }
}

/// Build a chapter identifier from its parts.
pub fn make_id(prefix: &str, name: &str) -> String {
    format!("{prefix}{SEPARATOR}{name}")
}
