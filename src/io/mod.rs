//! PDF file I/O.
//!
//! [`PdfReader`] opens and parses source documents, [`PdfWriter`] serializes the
//! merged result. Both keep their file handles scoped to a single call.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::PdfWriter;
