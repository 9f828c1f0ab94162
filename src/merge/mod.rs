//! PDF merging.
//!
//! [`merge_files`] is the orchestration entry point: it loads each source in
//! order, appends it to a [`Merger`], and writes the result, keeping a
//! progress indicator alive for exactly that long.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::merge::{MergeOptions, merge_files};
//! use pdfmerger::progress::NoProgress;
//! use std::path::{Path, PathBuf};
//!
//! let sources = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let summary = merge_files(
//!     &sources,
//!     Path::new("merged.pdf"),
//!     MergeOptions::default(),
//!     &mut NoProgress,
//! )?;
//! println!("Merged {} pages", summary.total_pages);
//! # Ok::<(), pdfmerger::PdfMergerError>(())
//! ```

pub mod merger;
pub mod outline;

pub use merger::Merger;

use std::path::{Path, PathBuf};

use log::info;

use crate::error::{PdfMergerError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::progress::{ProgressGuard, ProgressIndicator};

/// Options controlling a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Copy each source's outline entries into the output outline.
    pub bookmarks: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self { bookmarks: true }
    }
}

/// What a successful merge produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of source documents merged.
    pub files_merged: usize,

    /// Pages in the written document.
    pub total_pages: usize,

    /// Top-level outline entries imported from the sources.
    pub outline_entries: usize,

    /// Where the document was written.
    pub destination: PathBuf,
}

/// Merge `sources`, in order, into a new PDF at `destination`.
///
/// `indicator` is started before the first source is opened and stopped
/// before this function returns, on success and on failure. Nothing is
/// written to `destination` unless every source loaded and was appended.
///
/// # Errors
///
/// - [`PdfMergerError::NoFilesToMerge`] if `sources` is empty
/// - any load error from [`PdfReader::load`]
/// - any write error from [`PdfWriter::write`]
pub fn merge_files(
    sources: &[PathBuf],
    destination: &Path,
    options: MergeOptions,
    indicator: &mut dyn ProgressIndicator,
) -> Result<MergeSummary> {
    if sources.is_empty() {
        return Err(PdfMergerError::NoFilesToMerge);
    }

    let _progress = ProgressGuard::start(indicator);

    let reader = PdfReader::new();
    let mut merger = Merger::new();

    for (index, source) in sources.iter().enumerate() {
        info!("[{}/{}] loading {}", index + 1, sources.len(), source.display());
        let loaded = reader.load(source)?;
        merger.append(loaded, options.bookmarks)?;
    }

    let files_merged = merger.files_merged();
    let outline_entries = merger.outline_entries();
    let mut document = merger.finish()?;
    let total_pages = document.get_pages().len();

    info!("writing {total_pages} pages to {}", destination.display());
    PdfWriter::new().write(&mut document, destination)?;

    Ok(MergeSummary {
        files_merged,
        total_pages,
        outline_entries,
        destination: destination.to_path_buf(),
    })
}
