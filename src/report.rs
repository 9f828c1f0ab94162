//! Telling the user that a merge failed.

use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::error::PdfMergerError;

/// Title of the error dialog.
pub const ERROR_TITLE: &str = "PDFMergerError";

const ERROR_HEADLINE: &str = "An error occurred when merging the selected files:";

/// Text shown in the error dialog for `err`.
pub fn describe(err: &PdfMergerError) -> String {
    format!("{ERROR_HEADLINE}\n\n{err}")
}

/// Show a modal error dialog for `err` and block until it is dismissed.
pub fn show_error(err: &PdfMergerError) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(ERROR_TITLE)
        .set_description(describe(err))
        .set_buttons(MessageButtons::Ok)
        .show();
}
