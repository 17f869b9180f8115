//! Manuscript assembly from chapter batch files.

use std::fs::OpenOptions;
use std::io::ErrorKind;

use clap::Parser;
use log::{debug, info, warn};

mod assemble;
mod batch;
mod chapter;
mod cli;
mod config;
mod error;
mod markup;
mod render;
mod report;
mod segment;


use assemble::{Assembler, Assembly};
use batch::ChapterBatch;
use chapter::Chapter;
use cli::Cli;
use config::Config;
use error::{Error, Result};
use render::Renderer;
use report::{NullReporter, Reporter, TranscriptReporter};
use segment::Segmenter;

/// Main entrypoint.
fn main() -> std::result::Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    info!(
        "building '{}' from {} batch files, markup:{} structure:{} word count:{}",
        config.output.display(),
        config.batches.len(),
        config.markup,
        config.structure_mode,
        config.word_count
    );

    let mut reporter: Box<dyn Reporter> = match &config.transcript {
        _ if config.quiet => Box::new(NullReporter),
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Box::new(TranscriptReporter::new(file))
        }
        None => Box::new(TranscriptReporter::new(std::io::stdout())),
    };

    let builder = BookBuilder::new(config);
    builder.process(&mut *reporter)?;
    Ok(())
}

/// Book building processor.
struct BookBuilder {
    config: Config,
    segmenter: Segmenter,
    assembler: Assembler,
    renderer: Renderer,
}

impl BookBuilder {
    /// Create a new builder, with components configured from `config`.
    pub fn new(config: Config) -> Self {
        let segmenter = Segmenter::new(config.markup, config.word_count);
        let assembler = Assembler::new(config.structure_mode, config.word_count);
        let renderer = Renderer::new(config.markup, &config.heading);
        Self {
            config,
            segmenter,
            assembler,
            renderer,
        }
    }

    /// Read the batches, assemble the book and write it out.
    pub fn process(&self, reporter: &mut dyn Reporter) -> Result<Assembly> {
        let batch = self.ingest(reporter)?;
        let assembly = self.build(&batch)?;
        self.write(&assembly, reporter)?;
        Ok(assembly)
    }

    /// Segment every batch file, in the order given.
    fn ingest(&self, reporter: &mut dyn Reporter) -> Result<ChapterBatch> {
        let mut batch = ChapterBatch::new();
        for path in &self.config.batches {
            batch.read_source(path, &self.segmenter, reporter)?;
        }
        if batch.is_empty() {
            warn!("No chapters found in the batch files");
        }
        info!(
            "Read {} chapters ({} words) from {} batch files",
            batch.len(),
            batch.total_words(self.segmenter.rule()),
            batch.sources().len()
        );
        Ok(batch)
    }

    /// Apply the structure file to the batch.
    fn build(&self, batch: &ChapterBatch) -> Result<Assembly> {
        let path = &self.config.structure;
        let structure = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::SourceFileNotFound(path.clone()),
            _ => Error::Io(e),
        })?;
        let assembly = self.assembler.assemble(structure.lines(), batch)?;
        debug!(
            "Assembled {} output chapters from {} references",
            assembly.chapters.len(),
            assembly.referenced.len()
        );
        Ok(assembly)
    }

    /// Write out the rendered document and report on it.
    fn write(&self, assembly: &Assembly, reporter: &mut dyn Reporter) -> Result<()> {
        let document = self.renderer.render(&assembly.chapters);
        let path = &self.config.output;
        std::fs::write(path, &document)?;
        info!(
            "Wrote {} chapters ({} words) to '{}'",
            assembly.chapters.len(),
            assembly.total_words,
            path.display()
        );

        let full = Chapter::new("output", "full", Some(document))?.with_markup(self.config.markup);
        reporter.output_written(path, &full, self.config.word_count)?;
        assembly.report(reporter)?;
        Ok(())
    }
}
