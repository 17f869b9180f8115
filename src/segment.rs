//! Splitting of batch files into chapters.

use lazy_static::lazy_static;
use log::{debug, trace, warn};
use regex::Regex;

use crate::batch::ChapterBatch;
use crate::chapter::{Chapter, WordCountRule};
use crate::error::Result;
use crate::markup::{MarkupMode, MarkupTokens, MarkupTransformer};
use crate::report::Reporter;

lazy_static! {
    /// A line starting with `//` ends the current chapter; the rest of the
    /// line optionally names the next one.
    pub static ref MARKER_RE: Regex = Regex::new(r"^//(?P<name>.*)").unwrap();
}

/// If `line` is a chapter marker, return the (trimmed, possibly empty) name it gives.
pub fn marker_name(line: &str) -> Option<&str> {
    MARKER_RE
        .captures(line)
        .map(|caps| caps.name("name").map_or("", |m| m.as_str().trim()))
}

/// What segmenting one file produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileSummary {
    /// Identifiers of the chapters read, in file order.
    pub chapters: Vec<String>,
    /// An emphasis span was still open at the end of the file.
    pub emphasis_open: bool,
}

/// Chapter under construction.
#[derive(Debug)]
struct ChapterBuilder {
    name: String,
    text: String,
}

#[derive(Debug)]
enum State {
    /// No chapter open; only before the first line.
    Idle,
    Open(ChapterBuilder),
}

/// Splits lines of a batch file into chapters.
#[derive(Clone, Debug)]
pub struct Segmenter {
    mode: MarkupMode,
    tokens: MarkupTokens,
    rule: WordCountRule,
}

impl Segmenter {
    /// Create a segmenter producing `mode` text, counted with `rule`.
    pub fn new(mode: MarkupMode, rule: WordCountRule) -> Self {
        Self {
            mode,
            tokens: MarkupTokens::RTF,
            rule,
        }
    }

    /// Word count rule used when reporting chapters.
    pub fn rule(&self) -> WordCountRule {
        self.rule
    }

    /// Segment `lines`, inserting each chapter into `batch` as soon as it is
    /// complete.
    pub fn segment_into<I, S>(
        &self,
        prefix: &str,
        lines: I,
        batch: &mut ChapterBatch,
        reporter: &mut dyn Reporter,
    ) -> Result<FileSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = FileSummary::default();
        let mut transformer = MarkupTransformer::new(self.tokens.clone());
        let mut state = State::Idle;
        let mut count = 0usize;

        for line in lines {
            let line = line.as_ref();
            let marker = marker_name(line);

            if marker.is_some() || matches!(state, State::Idle) {
                if let State::Open(builder) = std::mem::replace(&mut state, State::Idle) {
                    self.finish(prefix, builder, batch, reporter, &mut summary)?;
                }
                count += 1;
                let name = match marker {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => count.to_string(),
                };
                trace!("Open chapter '{name}' in '{prefix}'");
                state = State::Open(ChapterBuilder {
                    name,
                    text: String::new(),
                });
            }

            if marker.is_none() {
                if let State::Open(builder) = &mut state {
                    match self.mode {
                        MarkupMode::None => {
                            builder.text.push_str(line);
                            if !line.ends_with('\n') {
                                builder.text.push('\n');
                            }
                        }
                        MarkupMode::EscapeAndBreak => {
                            builder.text.push_str(&transformer.transform(line));
                        }
                    }
                }
            }
        }

        if let State::Open(builder) = state {
            self.finish(prefix, builder, batch, reporter, &mut summary)?;
        }

        summary.emphasis_open = transformer.in_emphasis();
        if summary.emphasis_open {
            warn!("Emphasis span still open at end of '{prefix}'");
        }
        Ok(summary)
    }

    fn finish(
        &self,
        prefix: &str,
        builder: ChapterBuilder,
        batch: &mut ChapterBatch,
        reporter: &mut dyn Reporter,
        summary: &mut FileSummary,
    ) -> Result<()> {
        let chapter =
            Chapter::new(prefix, &builder.name, Some(builder.text))?.with_markup(self.mode);
        let id = chapter.id();
        debug!(
            "Finish chapter '{id}' ({} words)",
            chapter.word_count(self.rule)
        );
        batch.insert(chapter)?;
        if let Some(chapter) = batch.get(&id) {
            reporter.chapter_added(chapter, self.rule)?;
        }
        summary.chapters.push(id);
        Ok(())
    }
}
