//! Accumulating merge target.
//!
//! [`Merger`] owns the output document. Every appended source is renumbered
//! past the objects already present, its pages are re-parented under the
//! output page tree in source order, and (optionally) its top-level outline
//! entries are queued for the output outline. Named destinations of every
//! source are kept; on a name clash the later source wins.

use lopdf::{Document, Object, ObjectId, dictionary};
use log::{debug, info, warn};

use crate::error::{PdfMergerError, Result};
use crate::io::LoadedPdf;
use crate::merge::outline::{self, NamedDestinations};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Give up walking `/Parent` links after this many levels.
const MAX_PAGE_TREE_DEPTH: usize = 256;

/// Output document under construction.
pub struct Merger {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    outline: Vec<ObjectId>,
    destinations: NamedDestinations,
    files_merged: usize,
}

impl Merger {
    /// Create an empty merge target.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.4");
        let pages_id = document.new_object_id();
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            kids: Vec::new(),
            outline: Vec::new(),
            destinations: NamedDestinations::new(),
            files_merged: 0,
        }
    }

    /// Append every page of `source`, after the pages appended so far.
    ///
    /// With `import_outline` set, the source's top-level outline entries are
    /// queued as top-level entries of the output outline. A source whose
    /// outline cannot be read is still merged, without its bookmarks.
    ///
    /// # Errors
    ///
    /// Fails with [`PdfMergerError::MergeFailed`] when a page of the source
    /// is not a dictionary.
    pub fn append(&mut self, source: LoadedPdf, import_outline: bool) -> Result<()> {
        let LoadedPdf {
            document: mut doc,
            path,
            ..
        } = source;

        doc.renumber_objects_with(self.document.max_id + 1);

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for &page_id in &page_ids {
            if let Err(err) = inherit_page_attributes(&mut doc, page_id) {
                warn!(
                    "{}: page {page_id:?} keeps its own attributes only: {err}",
                    path.display()
                );
            }
        }

        let names = outline::named_destinations(&doc);
        let outline = if import_outline {
            match outline::import_outline(&mut doc, &names) {
                Ok(items) => items,
                Err(err) => {
                    warn!("{}: skipping unreadable outline: {err}", path.display());
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        if doc.version > self.document.version {
            self.document.version = doc.version.clone();
        }
        self.document.max_id = self.document.max_id.max(doc.max_id);
        self.document.objects.extend(doc.objects);

        for &page_id in &page_ids {
            self.document
                .get_dictionary_mut(page_id)
                .map_err(|err| {
                    PdfMergerError::merge_failed(format!(
                        "{}: page {page_id:?} is not a dictionary: {err}",
                        path.display()
                    ))
                })?
                .set("Parent", self.pages_id);
        }

        info!(
            "appended {} ({} pages, {} bookmarks)",
            path.display(),
            page_ids.len(),
            outline.len()
        );

        let clashes = names
            .keys()
            .filter(|name| self.destinations.contains_key(*name))
            .count();
        if clashes > 0 {
            warn!(
                "{}: {clashes} named destination(s) replace ones from earlier files",
                path.display()
            );
        }

        self.kids.extend(page_ids);
        self.outline.extend(outline);
        self.destinations.extend(names);
        self.files_merged += 1;

        Ok(())
    }

    /// Number of documents appended so far.
    pub fn files_merged(&self) -> usize {
        self.files_merged
    }

    /// Number of top-level outline entries queued so far.
    pub fn outline_entries(&self) -> usize {
        self.outline.len()
    }

    /// Close the page tree, outline and named destinations and return the
    /// merged document.
    ///
    /// # Errors
    ///
    /// Fails with [`PdfMergerError::NoFilesToMerge`] if nothing was appended.
    pub fn finish(self) -> Result<Document> {
        let Self {
            mut document,
            pages_id,
            kids,
            outline,
            destinations,
            files_merged,
        } = self;

        if files_merged == 0 {
            return Err(PdfMergerError::NoFilesToMerge);
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
                "Count" => count,
            }),
        );

        outline::attach_outline(&mut document, &outline)?;
        outline::attach_named_destinations(&mut document, &destinations)?;

        let pruned = document.prune_objects();
        debug!("dropped {} unreachable objects", pruned.len());
        document.renumber_objects();
        document.compress();

        Ok(document)
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy inheritable attributes from the page's ancestors onto the page itself,
/// so it renders the same once re-parented.
fn inherit_page_attributes(doc: &mut Document, page_id: ObjectId) -> lopdf::Result<()> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&[u8]> = INHERITABLE_PAGE_KEYS
        .into_iter()
        .filter(|key| !page.has(key))
        .collect();

    let mut inherited = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if missing.is_empty() || depth == MAX_PAGE_TREE_DEPTH {
            break;
        }
        let node = doc.get_dictionary(node_id)?;
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        page.set(key, value);
    }
    Ok(())
}
