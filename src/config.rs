//! Run configuration.
//!
//! Turns parsed command line arguments into the values a run needs: source
//! patterns are expanded, the verbosity count becomes a log level. There is
//! no configuration file.

use log::LevelFilter;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{PdfMergerError, Result};
use crate::merge::MergeOptions;
use crate::utils::collect_paths_for_patterns;

/// Everything one invocation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source files in merge order. Empty means "ask".
    pub sources: Vec<PathBuf>,

    /// Destination file. `None` means "ask".
    pub destination: Option<PathBuf>,

    /// Import source outlines.
    pub bookmarks: bool,

    /// Never open a window.
    pub headless: bool,

    /// Number of `-v` flags.
    pub verbosity: u8,
}

impl Config {
    /// Options for [`merge_files`](crate::merge::merge_files).
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            bookmarks: self.bookmarks,
        }
    }
}

impl TryFrom<&Cli> for Config {
    type Error = PdfMergerError;

    fn try_from(cli: &Cli) -> Result<Self> {
        let mut sources = Vec::with_capacity(cli.sources.len());
        for source in &cli.sources {
            match source.to_str() {
                Some(pattern) => sources.extend(collect_paths_for_patterns([pattern])?),
                // Not valid UTF-8, so it cannot be a glob pattern either.
                None => sources.push(source.clone()),
            }
        }

        Ok(Self {
            sources,
            destination: cli.dst.clone(),
            bookmarks: cli.bookmarks,
            headless: cli.headless,
            verbosity: cli.verbose,
        })
    }
}

/// Map a `-v` count to a log level. Warnings are always shown.
pub fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
