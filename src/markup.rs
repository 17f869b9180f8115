//! Conversion of the plain-text emphasis convention into RTF markup.

use std::fmt;
use std::str::FromStr;

use crate::chapter::WordCountRule;

/// Delimiter that opens and closes an emphasis span in source prose.
pub const EMPHASIS_DELIMITER: char = '*';

/// How chapter text is carried from batch files to the output document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkupMode {
    /// Lines are copied unmodified.
    #[default]
    None,
    /// Lines are escaped, emphasis is converted and line ends are explicit.
    EscapeAndBreak,
}

impl MarkupMode {
    /// Word count rule matching the shape of text this mode produces.
    pub fn default_word_count(self) -> WordCountRule {
        match self {
            Self::None => WordCountRule::SpacesPlusLines,
            Self::EscapeAndBreak => WordCountRule::SpacesPerLine,
        }
    }
}

impl FromStr for MarkupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "plain" => Ok(Self::None),
            "rtf" | "escape-and-break" => Ok(Self::EscapeAndBreak),
            _ => Err(format!("unknown markup mode '{s}' (expected 'none' or 'rtf')")),
        }
    }
}

impl fmt::Display for MarkupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::EscapeAndBreak => "rtf",
        })
    }
}

/// Escape sequences emitted in markup mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupTokens {
    pub indent: &'static str,
    pub emphasis_on: &'static str,
    pub emphasis_off: &'static str,
    pub line_end: &'static str,
    pub document_start: &'static str,
    pub document_end: &'static str,
}

impl MarkupTokens {
    pub const RTF: MarkupTokens = MarkupTokens {
        indent: "\\tab ",
        emphasis_on: "\\i\n",
        emphasis_off: "\\i0\n",
        line_end: "\\par\n",
        document_start: "{\\rtf1\\ansi\\deff0 {\\fonttbl {\\f0 Times New Roman;}}\n",
        document_end: "}\n",
    };
}

/// Escape characters that have meaning in RTF.
pub fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Recover the prose lines from text written by [`transform_line`].
///
/// Indents and emphasis tokens vanish, line ends become newlines and
/// escaped characters are restored. A surrounding document wrapper is dropped.
pub fn strip_markup(text: &str, tokens: &MarkupTokens) -> String {
    let text = text.strip_prefix(tokens.document_start).unwrap_or(text);
    let text = text.strip_suffix(tokens.document_end).unwrap_or(text);
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(token) = [tokens.indent, tokens.emphasis_on, tokens.emphasis_off]
            .into_iter()
            .find(|token| tail.starts_with(token))
        {
            rest = &tail[token.len()..];
        } else if let Some(after) = tail.strip_prefix(tokens.line_end) {
            out.push('\n');
            rest = after;
        } else {
            let mut chars = tail[1..].chars();
            out.extend(chars.next());
            rest = chars.as_str();
        }
    }
    out.push_str(rest);
    out
}

/// Transform one line given the emphasis state at its start.
///
/// Returns the transformed line and the emphasis state at its end.
pub fn transform_line(line: &str, in_emphasis: bool, tokens: &MarkupTokens) -> (String, bool) {
    let trimmed = line.trim();
    let mut out = String::with_capacity(trimmed.len() + tokens.line_end.len());
    if !trimmed.is_empty() {
        out.push_str(tokens.indent);
    }

    let mut in_emphasis = in_emphasis;
    let mut rest = escape_rtf(trimmed);
    while let Some(pos) = rest.find(EMPHASIS_DELIMITER) {
        out.push_str(&rest[..pos]);
        out.push_str(if in_emphasis {
            tokens.emphasis_off
        } else {
            tokens.emphasis_on
        });
        in_emphasis = !in_emphasis;
        rest = rest[pos + EMPHASIS_DELIMITER.len_utf8()..].to_string();
    }
    out.push_str(&rest);
    out.push_str(tokens.line_end);
    (out, in_emphasis)
}

/// Line transformer that carries emphasis state across one source file.
#[derive(Debug)]
pub struct MarkupTransformer {
    tokens: MarkupTokens,
    in_emphasis: bool,
}

impl MarkupTransformer {
    pub fn new(tokens: MarkupTokens) -> Self {
        Self {
            tokens,
            in_emphasis: false,
        }
    }

    /// Transform the next line of the current file.
    pub fn transform(&mut self, line: &str) -> String {
        let (out, in_emphasis) = transform_line(line, self.in_emphasis, &self.tokens);
        self.in_emphasis = in_emphasis;
        out
    }

    /// Whether an emphasis span is currently open.
    pub fn in_emphasis(&self) -> bool {
        self.in_emphasis
    }
}
