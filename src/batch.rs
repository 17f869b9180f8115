//! The collection of chapters read from all batch files.

use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::chapter::{Chapter, WordCountRule};
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::segment::{FileSummary, Segmenter};

/// Chapters keyed on identifier, kept in the order they were read.
#[derive(Debug, Default)]
pub struct ChapterBatch {
    chapters: Vec<Chapter>,
    index: HashMap<String, usize>,
    sources: Vec<PathBuf>,
}

impl ChapterBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chapter, failing if its identifier is already taken.
    pub fn insert(&mut self, chapter: Chapter) -> Result<()> {
        let id = chapter.id();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateChapter(id));
        }
        self.index.insert(id, self.chapters.len());
        self.chapters.push(chapter);
        Ok(())
    }

    /// Chapter with identifier `id`, if any.
    pub fn get(&self, id: &str) -> Option<&Chapter> {
        self.index.get(id).map(|&i| &self.chapters[i])
    }

    /// Number of chapters held.
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether no chapters are held.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Chapters in reading order.
    pub fn iter(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter()
    }

    /// Batch files read so far, in order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Sum of the word counts of every chapter.
    pub fn total_words(&self, rule: WordCountRule) -> usize {
        self.chapters.iter().map(|c| c.word_count(rule)).sum()
    }

    /// Identifiers not present in `referenced`, in reading order.
    pub fn unused(&self, referenced: &HashSet<String>) -> Vec<String> {
        self.iter()
            .map(Chapter::id)
            .filter(|id| !referenced.contains(id))
            .collect()
    }

    /// Read a batch file and segment it into this batch.
    ///
    /// The file stem is used as the prefix of every chapter it holds.
    pub fn read_source(
        &mut self,
        path: &Path,
        segmenter: &Segmenter,
        reporter: &mut dyn Reporter,
    ) -> Result<FileSummary> {
        if self.sources.iter().any(|p| p == path) {
            return Err(Error::DuplicateSourceFile(path.to_path_buf()));
        }
        let prefix = path
            .file_stem()
            .map(|s| s.to_string_lossy().trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                format!("No file name to take a chapter prefix from in '{}'", path.display())
            })?;
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::SourceFileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        self.sources.push(path.to_path_buf());

        reporter.source_started(path)?;
        let summary =
            segmenter.segment_into(&prefix, contents.split_inclusive('\n'), self, reporter)?;
        info!(
            "Read {} chapters from '{}' with prefix '{prefix}'",
            summary.chapters.len(),
            path.display()
        );
        Ok(summary)
    }
}
