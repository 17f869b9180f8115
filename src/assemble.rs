//! Assembly of output chapters from a structure file.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::str::FromStr;

use log::{debug, warn};

use crate::batch::ChapterBatch;
use crate::chapter::{Chapter, WordCountRule};
use crate::error::{Error, Result};
use crate::report::Reporter;

/// How structure-file lines map onto output chapters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StructureMode {
    /// Consecutive chapters from the same batch merge; a blank line breaks the run.
    #[default]
    Merge,
    /// Each line is `id [label]` and becomes its own output chapter.
    Label,
}

impl FromStr for StructureMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "merge" => Ok(Self::Merge),
            "label" => Ok(Self::Label),
            _ => Err(format!(
                "unknown structure mode '{s}' (expected 'merge' or 'label')"
            )),
        }
    }
}

impl fmt::Display for StructureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Merge => "merge",
            Self::Label => "label",
        })
    }
}

/// A chapter of the output document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputChapter {
    pub chapter: Chapter,
    /// Label given in the structure file (label mode only).
    pub label: Option<String>,
    /// Approximate words in the assembled text.
    pub word_count: usize,
}

/// Result of applying a structure file to a batch.
#[derive(Debug, Default)]
pub struct Assembly {
    pub chapters: Vec<OutputChapter>,
    /// Identifiers the structure file referenced.
    pub referenced: HashSet<String>,
    /// Batch identifiers never referenced, in batch order.
    pub unused: Vec<String>,
    pub total_words: usize,
}

impl Assembly {
    /// Report per-chapter counts followed by unused chapters.
    pub fn report(&self, reporter: &mut dyn Reporter) -> io::Result<()> {
        for chapter in &self.chapters {
            reporter.output_chapter(chapter)?;
        }
        reporter.unused_chapters(&self.unused)
    }
}

/// Resolves structure-file lines against a batch.
#[derive(Clone, Debug)]
pub struct Assembler {
    mode: StructureMode,
    rule: WordCountRule,
}

impl Assembler {
    /// Create an assembler for `mode`, recounting words with `rule`.
    pub fn new(mode: StructureMode, rule: WordCountRule) -> Self {
        Self { mode, rule }
    }

    /// Resolve structure-file `lines` against `batch`.
    ///
    /// Fails at the first line that repeats an earlier identifier or names one
    /// the batch does not hold. Word counts are taken on the assembled text.
    pub fn assemble<I, S>(&self, lines: I, batch: &ChapterBatch) -> Result<Assembly>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assembly = Assembly::default();
        // Whether the next same-prefix reference may join the last output chapter.
        let mut can_merge = false;

        for (i, line) in lines.into_iter().enumerate() {
            let line_no = i + 1;
            let line = line.as_ref().trim();
            if line.is_empty() {
                can_merge = false;
                continue;
            }

            let (id, label) = match self.mode {
                StructureMode::Merge => (line, None),
                StructureMode::Label => split_label(line),
            };

            if !assembly.referenced.insert(id.to_string()) {
                return Err(Error::DuplicateReference {
                    id: id.to_string(),
                    line: line_no,
                });
            }
            let section = batch.get(id).ok_or_else(|| Error::ChapterNotFound {
                id: id.to_string(),
                line: line_no,
            })?;

            let merge = self.mode == StructureMode::Merge
                && can_merge
                && assembly
                    .chapters
                    .last()
                    .is_some_and(|c| c.chapter.prefix() == section.prefix());
            if let Some(current) = assembly.chapters.last_mut().filter(|_| merge) {
                debug!("Merge '{id}' into '{}'", current.chapter.id());
                current.chapter.append_text(section.text());
            } else {
                debug!(
                    "Start output chapter {} with '{id}'",
                    assembly.chapters.len() + 1
                );
                assembly.chapters.push(OutputChapter {
                    chapter: section.clone(),
                    label: label.map(str::to_string),
                    word_count: 0,
                });
            }
            can_merge = true;
        }

        for chapter in &mut assembly.chapters {
            chapter.word_count = chapter.chapter.word_count(self.rule);
        }
        assembly.total_words = assembly.chapters.iter().map(|c| c.word_count).sum();
        assembly.unused = batch.unused(&assembly.referenced);
        if !assembly.unused.is_empty() {
            warn!("{} batch chapters are not used", assembly.unused.len());
        }
        Ok(assembly)
    }
}

/// Split a label-mode line into its identifier and optional label.
fn split_label(line: &str) -> (&str, Option<&str>) {
    match line.split_once(char::is_whitespace) {
        Some((id, label)) => {
            let label = label.trim();
            (id, (!label.is_empty()).then_some(label))
        }
        None => (line, None),
    }
}
