//! Command line interface.
//!
//! ```text
//! pdfmerger a.pdf b.pdf -d merged.pdf   # no dialogs
//! pdfmerger a.pdf b.pdf                 # asks where to save
//! pdfmerger -d merged.pdf               # asks which files to merge
//! pdfmerger                             # asks for both
//! ```

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Merge PDF files into a single document.
///
/// Source files and destination left off the command line are asked for
/// with file dialogs. Bookmarks of the source files are kept unless -b is
/// given.
#[derive(Parser, Debug)]
#[command(name = "pdfmerger")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
pub struct Cli {
    /// Source PDF files, merged in the order given (glob patterns allowed)
    #[arg(value_name = "S")]
    pub sources: Vec<PathBuf>,

    /// Path of the merged file
    #[arg(short = 'd', long = "dst", value_name = "D")]
    pub dst: Option<PathBuf>,

    /// Do not keep bookmarks from the source files
    #[arg(short = 'b', long = "bookmarks", action = ArgAction::SetFalse)]
    pub bookmarks: bool,

    /// Never open a window: no file dialogs, progress window or error dialog
    #[arg(long)]
    pub headless: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Run the progress window (used internally)
    #[arg(long = "progress-window", hide = true)]
    pub progress_window: bool,
}
