//! Rendering of assembled chapters into the output document.

use crate::assemble::OutputChapter;
use crate::markup::{escape_rtf, MarkupMode, MarkupTokens};

/// Default word that starts each chapter header.
pub const DEFAULT_HEADING: &str = "CHAPTER";

/// Renders output chapters in one markup mode.
#[derive(Clone, Debug)]
pub struct Renderer {
    mode: MarkupMode,
    tokens: MarkupTokens,
    heading: String,
}

impl Renderer {
    pub fn new(mode: MarkupMode, heading: &str) -> Self {
        Self {
            mode,
            tokens: MarkupTokens::RTF,
            heading: heading.to_string(),
        }
    }

    /// Header line for the chapter at 1-based `position`.
    pub fn header(&self, position: usize, label: Option<&str>) -> String {
        let mut header = format!("{} {position}", self.heading);
        if let Some(label) = label {
            header.push_str(&format!(" ({label})"));
        }
        match self.mode {
            MarkupMode::None => header + "\n\n",
            MarkupMode::EscapeAndBreak => {
                let line_end = self.tokens.line_end;
                escape_rtf(&header) + line_end + line_end
            }
        }
    }

    /// Render the whole document.
    pub fn render(&self, chapters: &[OutputChapter]) -> String {
        let mut out = String::new();
        if self.mode == MarkupMode::EscapeAndBreak {
            out.push_str(self.tokens.document_start);
        }
        for (i, chapter) in chapters.iter().enumerate() {
            out.push_str(&self.header(i + 1, chapter.label.as_deref()));
            out.push_str(chapter.chapter.text());
        }
        if self.mode == MarkupMode::EscapeAndBreak {
            out.push_str(self.tokens.document_end);
        }
        out
    }
}
