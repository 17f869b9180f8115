//! Author-facing transcript of a run.

use std::io::{self, Write};
use std::path::Path;

use crate::assemble::OutputChapter;
use crate::chapter::{Chapter, WordCountRule};

/// Width that output chapter ids are padded or cut to.
const ID_COLUMN: usize = 20;

/// Receives progress events from ingestion and assembly.
///
/// Every method defaults to doing nothing.
pub trait Reporter {
    /// A batch file is about to be segmented.
    fn source_started(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    /// A chapter was added to the batch.
    fn chapter_added(&mut self, _chapter: &Chapter, _rule: WordCountRule) -> io::Result<()> {
        Ok(())
    }

    /// The output document was written; `document` holds its full text.
    fn output_written(
        &mut self,
        _path: &Path,
        _document: &Chapter,
        _rule: WordCountRule,
    ) -> io::Result<()> {
        Ok(())
    }

    /// One assembled chapter, reported after the document is written.
    fn output_chapter(&mut self, _chapter: &OutputChapter) -> io::Result<()> {
        Ok(())
    }

    /// Batch chapters that the structure file never referenced.
    fn unused_chapters(&mut self, _ids: &[String]) -> io::Result<()> {
        Ok(())
    }
}

/// Reporter that discards everything.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Reporter that writes a plain transcript.
#[derive(Debug)]
pub struct TranscriptReporter<W: Write> {
    out: W,
}

impl<W: Write> TranscriptReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for TranscriptReporter<W> {
    fn source_started(&mut self, path: &Path) -> io::Result<()> {
        let name = path.display().to_string();
        writeln!(self.out)?;
        writeln!(self.out, "{name}")?;
        writeln!(self.out, "{}", "-".repeat(name.chars().count()))
    }

    fn chapter_added(&mut self, chapter: &Chapter, rule: WordCountRule) -> io::Result<()> {
        writeln!(self.out, "{}", chapter.info_string(rule))
    }

    fn output_written(
        &mut self,
        path: &Path,
        document: &Chapter,
        rule: WordCountRule,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "OUTPUT: {}", path.display())?;
        writeln!(self.out, "{}", document.info_string(rule))
    }

    fn output_chapter(&mut self, chapter: &OutputChapter) -> io::Result<()> {
        let id: String = chapter.chapter.id().chars().take(ID_COLUMN).collect();
        writeln!(
            self.out,
            "{id:<width$} {}",
            chapter.word_count,
            width = ID_COLUMN
        )
    }

    fn unused_chapters(&mut self, ids: &[String]) -> io::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        writeln!(self.out)?;
        writeln!(self.out, "Unused chapters:")?;
        for id in ids {
            writeln!(self.out, "{id}")?;
        }
        Ok(())
    }
}
