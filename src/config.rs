//! Run configuration, from a TOML manifest and the command line.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::assemble::StructureMode;
use crate::chapter::WordCountRule;
use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::markup::MarkupMode;
use crate::render::DEFAULT_HEADING;

/// Fully resolved settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub structure: PathBuf,
    pub output: PathBuf,
    pub batches: Vec<PathBuf>,
    pub markup: MarkupMode,
    pub structure_mode: StructureMode,
    pub word_count: WordCountRule,
    /// Where to append the transcript; stdout when unset.
    pub transcript: Option<PathBuf>,
    pub heading: String,
    pub quiet: bool,
}

/// Settings from one source, any of which may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub structure: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub batches: Vec<PathBuf>,
    pub markup: Option<MarkupMode>,
    pub structure_mode: Option<StructureMode>,
    pub word_count: Option<WordCountRule>,
    pub transcript: Option<PathBuf>,
    pub heading: Option<String>,
    pub quiet: Option<bool>,
}

impl Settings {
    /// Settings given on the command line.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            structure: cli.structure.clone(),
            output: cli.output.clone(),
            batches: cli.batches.clone(),
            markup: cli.markup,
            structure_mode: cli.structure_mode,
            word_count: cli.word_count,
            transcript: cli.transcript.clone(),
            heading: cli.heading.clone(),
            quiet: cli.quiet.then_some(true),
        }
    }

    /// Settings from a parsed manifest; relative paths are taken from `base_dir`.
    pub fn from_toml(value: &toml::Value, base_dir: &Path) -> Result<Self> {
        let path = |key: &str| -> Result<Option<PathBuf>> {
            Ok(get_str(value, key)?.map(|p| base_dir.join(p)))
        };
        let batches = match value.get("batches") {
            Some(toml::Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    toml::Value::String(s) => Ok(base_dir.join(s)),
                    v => Err(Error::Config(format!(
                        "Unexpected value {:?} in 'batches', expected string",
                        v
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
            v => {
                return Err(Error::Config(format!(
                    "Unexpected value {:?} for 'batches', expected array",
                    v
                )))
            }
        };

        let quiet = match value.get("quiet") {
            Some(toml::Value::Boolean(b)) => Some(*b),
            None => None,
            v => {
                return Err(Error::Config(format!(
                    "Unexpected value {:?} for 'quiet', expected boolean",
                    v
                )))
            }
        };

        Ok(Self {
            structure: path("structure")?,
            output: path("output")?,
            batches,
            markup: get_parsed(value, "markup")?,
            structure_mode: get_parsed(value, "structure_mode")?,
            word_count: get_parsed(value, "word_count")?,
            transcript: path("transcript")?,
            heading: get_str(value, "heading")?.map(str::to_string),
            quiet,
        })
    }

    /// Read a manifest file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            format!(
                "Failed to read config file '{}': {:?}",
                path.display(),
                e
            )
        })?;
        let value = contents
            .parse::<toml::Value>()
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml(&value, base_dir)
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            structure: other.structure.or(self.structure),
            output: other.output.or(self.output),
            batches: if other.batches.is_empty() {
                self.batches
            } else {
                other.batches
            },
            markup: other.markup.or(self.markup),
            structure_mode: other.structure_mode.or(self.structure_mode),
            word_count: other.word_count.or(self.word_count),
            transcript: other.transcript.or(self.transcript),
            heading: other.heading.or(self.heading),
            quiet: other.quiet.or(self.quiet),
        }
    }

    /// Fill in defaults and check that the required inputs are present.
    pub fn resolve(self) -> Result<Config> {
        let structure = self
            .structure
            .ok_or_else(|| Error::Config("no structure file given".to_string()))?;
        let output = self
            .output
            .ok_or_else(|| Error::Config("no output file given".to_string()))?;
        if self.batches.is_empty() {
            return Err(Error::Config("no chapter batch files given".to_string()));
        }
        let markup = self.markup.unwrap_or_default();
        Ok(Config {
            structure,
            output,
            batches: self.batches,
            markup,
            structure_mode: self.structure_mode.unwrap_or_default(),
            word_count: self
                .word_count
                .unwrap_or_else(|| markup.default_word_count()),
            transcript: self.transcript,
            heading: self
                .heading
                .unwrap_or_else(|| DEFAULT_HEADING.to_string()),
            quiet: self.quiet.unwrap_or(false),
        })
    }
}

impl Config {
    /// Resolve configuration for a command-line invocation.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let manifest = match &cli.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        manifest.merge(Settings::from_cli(cli)).resolve()
    }
}

fn get_str<'a>(value: &'a toml::Value, key: &str) -> Result<Option<&'a str>> {
    match value.get(key) {
        Some(toml::Value::String(s)) => Ok(Some(s.as_str())),
        None => Ok(None),
        v => Err(Error::Config(format!(
            "Unexpected value {:?} for '{}', expected string",
            v, key
        ))),
    }
}

fn get_parsed<T>(value: &toml::Value, key: &str) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    get_str(value, key)?
        .map(|s| s.parse::<T>().map_err(Error::Config))
        .transpose()
}
