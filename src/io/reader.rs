//! Loading source PDFs.
//!
//! Loading is tolerant: anything `lopdf` can parse is accepted, even when the
//! page tree or outline has problems. Those are dealt with (or skipped) while
//! merging. Only files that cannot be opened or parsed at all are rejected.

use lopdf::{Document, Object};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{PdfMergerError, Result};

/// A parsed source document together with where it came from.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages reachable through the page tree.
    pub page_count: usize,
}

/// Reader for source PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// The file handle is closed before this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`PdfMergerError::FileNotFound`] / [`PdfMergerError::NotAFile`] for bad paths
    /// - [`PdfMergerError::FileNotAccessible`] when the file cannot be opened
    /// - [`PdfMergerError::FailedToLoadPdf`] when the content is not a parseable PDF
    /// - [`PdfMergerError::EncryptedPdf`] for encrypted documents that need a
    ///   user password
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path_exists(path)?;

        let file = File::open(path).map_err(|source| PdfMergerError::FileNotAccessible {
            path: path.to_path_buf(),
            source,
        })?;

        let mut document = Document::load_from(BufReader::new(file)).map_err(|err| match err {
            lopdf::Error::Decryption(_) => PdfMergerError::encrypted_pdf(path.to_path_buf()),
            err => PdfMergerError::failed_to_load_pdf(path.to_path_buf(), err.to_string()),
        })?;

        if document.trailer.has(b"Encrypt") {
            if !strip_encryption(&mut document) {
                return Err(PdfMergerError::encrypted_pdf(path.to_path_buf()));
            }
            log::info!("{} opened with the empty user password", path.display());
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            log::warn!("{} has no reachable pages", path.display());
        }
        log::debug!("loaded {} ({page_count} pages)", path.display());

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
        })
    }

    /// Check that `path` exists and is not a directory.
    pub fn check_path_exists(path: &Path) -> Result<()> {
        let exists = path
            .try_exists()
            .map_err(|source| PdfMergerError::FileNotAccessible {
                path: path.to_path_buf(),
                source,
            })?;
        if !exists {
            return Err(PdfMergerError::file_not_found(path.to_path_buf()));
        }

        if path.is_dir() {
            return Err(PdfMergerError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }
}

/// Turn a document lopdf decrypted on load into a plain one.
///
/// lopdf opens files protected by an owner password only (empty user
/// password) and hands out their objects decrypted, but leaves `/Encrypt` in
/// the trailer. Returns `false` when the document is still locked.
fn strip_encryption(document: &mut Document) -> bool {
    if document.encryption_state.take().is_none() {
        return false;
    }
    if let Some(Object::Reference(dict_id)) = document.trailer.remove(b"Encrypt") {
        document.objects.remove(&dict_id);
    }
    true
}
