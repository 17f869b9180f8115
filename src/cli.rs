//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::assemble::StructureMode;
use crate::chapter::WordCountRule;
use crate::markup::MarkupMode;

/// Assemble a manuscript from chapter batch files and a structure file.
#[derive(Debug, Default, Parser)]
#[command(name = "bookbuilder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Structure file listing the chapters to include, in order
    pub structure: Option<PathBuf>,

    /// Output document
    pub output: Option<PathBuf>,

    /// Chapter batch files; each file's stem prefixes its chapter ids
    pub batches: Vec<PathBuf>,

    /// TOML manifest providing any of the settings below
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output markup: 'none' or 'rtf'
    #[arg(long)]
    pub markup: Option<MarkupMode>,

    /// Structure file convention: 'merge' or 'label'
    #[arg(long)]
    pub structure_mode: Option<StructureMode>,

    /// Word count rule: 'spaces-plus-lines' or 'spaces-per-line'
    #[arg(long)]
    pub word_count: Option<WordCountRule>,

    /// Append the transcript to this file instead of printing it
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Word that starts each chapter header
    #[arg(long)]
    pub heading: Option<String>,

    /// Do not write a transcript
    #[arg(short, long)]
    pub quiet: bool,
}
