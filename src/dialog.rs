//! Deciding which files to merge and where to put the result.
//!
//! Whatever the command line leaves out is asked for with native file
//! dialogs. Dismissing a dialog cancels the whole run; that is reported as
//! [`Selection::Cancelled`], not as an error.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{PdfMergerError, Result};

/// Title of the source selection dialog.
pub const OPEN_DIALOG_TITLE: &str = "Select PDF files to merge";

/// Title of the destination dialog.
pub const SAVE_DIALOG_TITLE: &str = "Save merged PDF as";

const PDF_EXTENSION: &str = "pdf";

/// Outcome of input resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Everything needed for a merge is known.
    Ready {
        /// Sources in merge order.
        sources: Vec<PathBuf>,
        /// Output path.
        destination: PathBuf,
    },
    /// The user dismissed a dialog.
    Cancelled,
}

/// File pickers used to fill in missing inputs.
pub trait FileDialogs {
    /// Ask for one or more PDF files. `None` when dismissed.
    fn open_files(&self, initial_dir: Option<&Path>) -> Option<Vec<PathBuf>>;

    /// Ask for a file to save to. `None` when dismissed.
    fn save_as(&self, initial_dir: Option<&Path>) -> Option<PathBuf>;
}

/// Native dialogs provided by the platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialogs;

impl FileDialogs for NativeDialogs {
    fn open_files(&self, initial_dir: Option<&Path>) -> Option<Vec<PathBuf>> {
        let mut dialog = rfd::FileDialog::new()
            .set_title(OPEN_DIALOG_TITLE)
            .add_filter("PDF", &[PDF_EXTENSION]);
        if let Some(dir) = initial_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_files()
    }

    fn save_as(&self, initial_dir: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title(SAVE_DIALOG_TITLE)
            .add_filter("PDF", &[PDF_EXTENSION]);
        if let Some(dir) = initial_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }
}

/// Fill in whatever of `sources` / `destination` is missing using `dialogs`.
///
/// - both given: used as they are
/// - neither given: ask for sources, then for the destination
/// - only sources: ask for the destination, starting in the first source's directory
/// - only destination: ask for sources, starting in the destination's directory
pub fn resolve(
    sources: Vec<PathBuf>,
    destination: Option<PathBuf>,
    dialogs: &dyn FileDialogs,
) -> Selection {
    let (sources, destination) = match (sources.is_empty(), destination) {
        (false, Some(destination)) => (sources, destination),
        (true, None) => {
            let Some(sources) = ask_sources(dialogs, None) else {
                return Selection::Cancelled;
            };
            let Some(destination) = ask_destination(dialogs, None) else {
                return Selection::Cancelled;
            };
            (sources, destination)
        }
        (false, None) => {
            let initial_dir = sources.first().and_then(|first| parent_dir(first));
            let Some(destination) = ask_destination(dialogs, initial_dir) else {
                return Selection::Cancelled;
            };
            (sources, destination)
        }
        (true, Some(destination)) => {
            let Some(sources) = ask_sources(dialogs, parent_dir(&destination)) else {
                return Selection::Cancelled;
            };
            (sources, destination)
        }
    };

    debug!(
        "merging {} file(s) into {}",
        sources.len(),
        destination.display()
    );
    Selection::Ready {
        sources,
        destination,
    }
}

/// Resolution without dialogs: both inputs must be present.
///
/// # Errors
///
/// Fails with [`PdfMergerError::InvalidArguments`] when either is missing.
pub fn require_arguments(sources: Vec<PathBuf>, destination: Option<PathBuf>) -> Result<Selection> {
    match destination {
        Some(destination) if !sources.is_empty() => Ok(Selection::Ready {
            sources,
            destination,
        }),
        _ => Err(PdfMergerError::invalid_arguments(
            "source files and --dst are both required in headless mode",
        )),
    }
}

fn ask_sources(dialogs: &dyn FileDialogs, initial_dir: Option<&Path>) -> Option<Vec<PathBuf>> {
    dialogs
        .open_files(initial_dir)
        .filter(|sources| !sources.is_empty())
}

fn ask_destination(dialogs: &dyn FileDialogs, initial_dir: Option<&Path>) -> Option<PathBuf> {
    dialogs.save_as(initial_dir).map(with_default_extension)
}

/// Append `.pdf` when the chosen name has no extension.
fn with_default_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(PDF_EXTENSION);
    }
    path
}

/// Directory containing `path`, unless that is the empty (current) directory.
fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}
