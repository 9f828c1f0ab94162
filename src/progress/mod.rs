//! Progress indication while a merge runs.
//!
//! The merge itself is synchronous and blocks the calling thread, so the
//! visible indicator lives in a separate process ([`WindowProcess`]) that can
//! keep animating. Indicators never report errors to their caller: a broken
//! indicator is logged and otherwise ignored.
//!
//! Use [`ProgressGuard`] to tie an indicator to a scope. It starts the
//! indicator on construction and stops it on drop, so the indicator is gone
//! before an error from inside the scope reaches the caller.
//!
//! # Examples
//!
//! ```
//! use pdfmerger::progress::{NoProgress, ProgressGuard};
//!
//! let mut indicator = NoProgress;
//! {
//!     let _progress = ProgressGuard::start(&mut indicator);
//!     // blocking work
//! }
//! ```

pub mod process;
pub mod window;

pub use process::WindowProcess;

/// Hidden command line flag that makes the binary run the progress window.
pub const PROGRESS_WINDOW_FLAG: &str = "--progress-window";

/// Something that shows the user that work is in progress.
pub trait ProgressIndicator {
    /// Begin showing progress. Calling `start` on a running indicator is a no-op.
    fn start(&mut self);

    /// Stop showing progress and release whatever backs the indicator.
    ///
    /// Must be synchronous: once it returns the indicator is gone.
    fn stop(&mut self);
}

/// Indicator that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressIndicator for NoProgress {
    fn start(&mut self) {}

    fn stop(&mut self) {}
}

/// Keeps an indicator running for as long as the guard lives.
pub struct ProgressGuard<'a> {
    indicator: &'a mut dyn ProgressIndicator,
}

impl<'a> ProgressGuard<'a> {
    /// Start `indicator` and return a guard that stops it when dropped.
    pub fn start(indicator: &'a mut dyn ProgressIndicator) -> Self {
        indicator.start();
        Self { indicator }
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.indicator.stop();
    }
}
