//! pdfmerger - merge PDF files into a single document.
//!
//! The pieces, in the order a run uses them:
//!
//! - [`dialog`] settles which files to merge and where to write the result,
//!   asking with native file dialogs for whatever the command line left out
//! - [`merge`] loads the sources, splices their pages (and optionally their
//!   bookmarks) into one document and writes it
//! - [`progress`] keeps a progress window running in a child process while
//!   the merge blocks
//! - [`report`] shows failures in an error dialog
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::merge::{MergeOptions, merge_files};
//! use pdfmerger::progress::NoProgress;
//! use std::path::{Path, PathBuf};
//!
//! let sources = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let options = MergeOptions { bookmarks: true };
//! let summary = merge_files(&sources, Path::new("out.pdf"), options, &mut NoProgress)?;
//! assert_eq!(summary.files_merged, 2);
//! # Ok::<(), pdfmerger::PdfMergerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod dialog;
pub mod error;
pub mod io;
pub mod merge;
pub mod progress;
pub mod report;
pub mod utils;

pub use config::Config;
pub use error::{PdfMergerError, Result};

use log::{info, warn};

use crate::dialog::{NativeDialogs, Selection};
use crate::merge::{MergeSummary, merge_files};
use crate::progress::{NoProgress, ProgressIndicator, WindowProcess};

/// Run one invocation: resolve inputs, then merge.
///
/// Returns `Ok(None)` when the user cancelled a file dialog.
///
/// # Errors
///
/// Any merge failure, or missing arguments in headless mode.
pub fn run(config: &Config) -> Result<Option<MergeSummary>> {
    let selection = if config.headless {
        dialog::require_arguments(config.sources.clone(), config.destination.clone())?
    } else {
        dialog::resolve(
            config.sources.clone(),
            config.destination.clone(),
            &NativeDialogs,
        )
    };

    let (sources, destination) = match selection {
        Selection::Ready {
            sources,
            destination,
        } => (sources, destination),
        Selection::Cancelled => {
            info!("no files selected, nothing to do");
            return Ok(None);
        }
    };

    let mut indicator = progress_indicator(config.headless);
    let summary = merge_files(
        &sources,
        &destination,
        config.merge_options(),
        indicator.as_mut(),
    )?;

    info!(
        "merged {} file(s), {} pages, {} bookmarks into {}",
        summary.files_merged,
        summary.total_pages,
        summary.outline_entries,
        summary.destination.display()
    );
    Ok(Some(summary))
}

fn progress_indicator(headless: bool) -> Box<dyn ProgressIndicator> {
    if headless {
        return Box::new(NoProgress);
    }
    match WindowProcess::current_exe() {
        Ok(window) => Box::new(window),
        Err(err) => {
            warn!("no progress window: {err}");
            Box::new(NoProgress)
        }
    }
}
