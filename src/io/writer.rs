//! Writing the merged PDF.

use lopdf::Document;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PdfMergerError, Result};

/// Serializes a PDF document to disk.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `doc` to `path`, creating or truncating the file.
    ///
    /// Missing parent directories are not created. A failure part way
    /// through leaves whatever was already written on disk.
    ///
    /// # Errors
    ///
    /// - [`PdfMergerError::FailedToCreateOutput`] if the file cannot be created
    /// - [`PdfMergerError::FailedToWrite`] if serialization or flushing fails
    pub fn write(&self, doc: &mut Document, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| PdfMergerError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);

        doc.save_to(&mut writer)
            .map_err(|err| PdfMergerError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(err),
            })?;

        writer.flush().map_err(|source| PdfMergerError::FailedToWrite {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("wrote {}", path.display());
        Ok(())
    }
}
