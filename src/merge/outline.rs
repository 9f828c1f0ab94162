//! Outline (bookmark) import and assembly.
//!
//! Importing takes the top-level entries of a source document's outline and
//! makes them self-contained: named destinations are looked up in the source
//! catalog and replaced by explicit page destinations, because the source's
//! name tree does not survive the merge. Nested entries stay attached to their
//! parents and come along unchanged.
//!
//! Assembly links the imported entries of every source, in order, under a
//! single `/Outlines` root in the merged document. The resolved named
//! destinations of all sources are written back to the merged catalog so
//! links inside the pages keep working.

use std::collections::{BTreeMap, HashSet};

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};

use crate::error::Result;

/// Name -> explicit destination table.
pub type NamedDestinations = BTreeMap<Vec<u8>, Object>;

/// Collect the top-level outline entries of `doc`, in order.
///
/// Returns an empty list when the document has no outline. Destinations of
/// the returned entries and all their descendants are rewritten in place to
/// explicit destinations where the name can be resolved through `names`.
///
/// # Errors
///
/// Fails when an outline entry reference points at something that is not a
/// dictionary.
pub fn import_outline(doc: &mut Document, names: &NamedDestinations) -> Result<Vec<ObjectId>> {
    let Some(root_id) = outline_root(doc) else {
        return Ok(Vec::new());
    };

    let first = doc
        .get_dictionary(root_id)?
        .get(b"First")
        .and_then(Object::as_reference)
        .ok();

    let mut visited = HashSet::new();
    let top_level = sibling_chain(doc, first, &mut visited)?;

    let mut all_items = Vec::new();
    let mut walked = HashSet::new();
    collect_subtree(doc, &top_level, &mut walked, &mut all_items)?;

    let mut rewritten = 0;
    for item_id in all_items {
        if rewrite_named_destination(doc, item_id, names)? {
            rewritten += 1;
        }
    }
    if rewritten > 0 {
        log::debug!("resolved {rewritten} named outline destination(s)");
    }

    Ok(top_level)
}

/// Link `items` as the top-level entries of `doc`'s outline.
///
/// Each item gets the new root as `/Parent` and fresh `/Prev`/`/Next` links.
/// Returns the id of the outline root, or `None` when `items` is empty, in
/// which case the catalog is left without `/Outlines`.
pub fn attach_outline(doc: &mut Document, items: &[ObjectId]) -> Result<Option<ObjectId>> {
    let (Some(&first), Some(&last)) = (items.first(), items.last()) else {
        return Ok(None);
    };

    let root_id = doc.new_object_id();
    let mut visible = 0;

    for (index, &item_id) in items.iter().enumerate() {
        let item = doc.get_dictionary_mut(item_id)?;
        item.set("Parent", root_id);

        match index.checked_sub(1).map(|prev| items[prev]) {
            Some(prev_id) => item.set("Prev", prev_id),
            None => {
                item.remove(b"Prev");
            }
        }
        match items.get(index + 1) {
            Some(&next_id) => item.set("Next", next_id),
            None => {
                item.remove(b"Next");
            }
        }

        // A positive count means the entry is open and its descendants show.
        let open_descendants = item
            .get(b"Count")
            .and_then(Object::as_i64)
            .unwrap_or(0)
            .max(0);
        visible += 1 + open_descendants;
    }

    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => visible,
        }),
    );
    doc.catalog_mut()?.set("Outlines", root_id);

    Ok(Some(root_id))
}

/// Top-level outline entries currently attached to `doc`'s catalog.
pub fn top_level_entries(doc: &Document) -> Vec<ObjectId> {
    let Some(root_id) = outline_root(doc) else {
        return Vec::new();
    };
    let first = doc
        .get_dictionary(root_id)
        .and_then(|root| root.get(b"First"))
        .and_then(Object::as_reference)
        .ok();
    sibling_chain(doc, first, &mut HashSet::new()).unwrap_or_default()
}

/// Publish `names` in `doc`'s catalog, both as a `/Dests` dictionary (for
/// name destinations) and as a flat `/Names` `/Dests` tree (for string
/// destinations). Nothing is written when `names` is empty.
pub fn attach_named_destinations(doc: &mut Document, names: &NamedDestinations) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }

    let mut dests = Dictionary::new();
    let mut pairs = Vec::with_capacity(names.len() * 2);
    // BTreeMap order is the byte order the name tree requires.
    for (name, dest) in names {
        dests.set(name.clone(), dest.clone());
        pairs.push(Object::String(name.clone(), StringFormat::Literal));
        pairs.push(dest.clone());
    }

    let dests_id = doc.add_object(dests);
    let tree_id = doc.add_object(dictionary! { "Names" => pairs });
    let catalog = doc.catalog_mut()?;
    catalog.set("Dests", dests_id);
    catalog.set("Names", dictionary! { "Dests" => tree_id });

    log::debug!("published {} named destination(s)", names.len());
    Ok(())
}

fn outline_root(doc: &Document) -> Option<ObjectId> {
    doc.catalog()
        .ok()?
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .ok()
}

/// Follow `/Next` links starting at `first`. Stops at the first repeated entry.
fn sibling_chain(
    doc: &Document,
    first: Option<ObjectId>,
    visited: &mut HashSet<ObjectId>,
) -> Result<Vec<ObjectId>> {
    let mut chain = Vec::new();
    let mut current = first;

    while let Some(item_id) = current {
        if !visited.insert(item_id) {
            log::warn!("outline entry {item_id:?} is linked twice, stopping there");
            break;
        }
        chain.push(item_id);
        current = doc
            .get_dictionary(item_id)?
            .get(b"Next")
            .and_then(Object::as_reference)
            .ok();
    }

    Ok(chain)
}

fn collect_subtree(
    doc: &Document,
    items: &[ObjectId],
    visited: &mut HashSet<ObjectId>,
    out: &mut Vec<ObjectId>,
) -> Result<()> {
    for &item_id in items {
        if !visited.insert(item_id) {
            continue;
        }
        out.push(item_id);

        let first_child = doc
            .get_dictionary(item_id)?
            .get(b"First")
            .and_then(Object::as_reference)
            .ok();
        let children = sibling_chain(doc, first_child, &mut HashSet::new())?;
        collect_subtree(doc, &children, visited, out)?;
    }
    Ok(())
}

/// Build the name -> explicit destination table from `/Dests` and the
/// `/Names` `/Dests` name tree of the catalog. Names that do not resolve to
/// an explicit destination are left out.
pub fn named_destinations(doc: &Document) -> NamedDestinations {
    let mut names = NamedDestinations::new();
    let Ok(catalog) = doc.catalog() else {
        return names;
    };

    if let Some(dests) = catalog.get(b"Dests").ok().and_then(|obj| resolve_dict(doc, obj)) {
        for (key, value) in dests.iter() {
            if let Some(explicit) = explicit_destination(doc, value) {
                names.insert(key.clone(), explicit);
            }
        }
    }

    let tree = catalog
        .get(b"Names")
        .ok()
        .and_then(|obj| resolve_dict(doc, obj))
        .and_then(|name_dict| name_dict.get(b"Dests").ok())
        .and_then(|obj| resolve_dict(doc, obj));
    if let Some(tree) = tree {
        walk_name_tree(doc, tree, &mut names, &mut HashSet::new());
    }

    names
}

fn walk_name_tree(
    doc: &Document,
    node: &Dictionary,
    names: &mut NamedDestinations,
    visited: &mut HashSet<ObjectId>,
) {
    if let Some(pairs) = node.get(b"Names").ok().and_then(|obj| resolve_array(doc, obj)) {
        for pair in pairs.chunks(2) {
            let [key, value] = pair else { continue };
            let key = match key {
                Object::String(bytes, _) | Object::Name(bytes) => bytes.clone(),
                _ => continue,
            };
            if let Some(explicit) = explicit_destination(doc, value) {
                names.insert(key, explicit);
            }
        }
    }

    if let Some(kids) = node.get(b"Kids").ok().and_then(|obj| resolve_array(doc, obj)) {
        for kid in kids {
            let Ok(kid_id) = kid.as_reference() else { continue };
            if !visited.insert(kid_id) {
                continue;
            }
            if let Ok(kid) = doc.get_dictionary(kid_id) {
                walk_name_tree(doc, kid, names, visited);
            }
        }
    }
}

/// A destination value is either an array or a dictionary holding it in `/D`.
fn explicit_destination(doc: &Document, value: &Object) -> Option<Object> {
    match resolve(doc, value)? {
        array @ Object::Array(_) => Some(array.clone()),
        Object::Dictionary(dict) => dict
            .get(b"D")
            .ok()
            .and_then(|d| resolve(doc, d))
            .filter(|d| matches!(d, Object::Array(_)))
            .cloned(),
        _ => None,
    }
}

/// Replace a named `/Dest` (or a GoTo action to a named destination) on
/// `item_id` with the explicit destination. Returns whether anything changed.
fn rewrite_named_destination(
    doc: &mut Document,
    item_id: ObjectId,
    names: &NamedDestinations,
) -> Result<bool> {
    let item = doc.get_dictionary(item_id)?;

    if let Ok(dest) = item.get(b"Dest") {
        let Some(name) = destination_name(dest) else {
            return Ok(false);
        };
        let Some(explicit) = names.get(name).cloned() else {
            log::debug!("outline entry {item_id:?} names an unknown destination");
            return Ok(false);
        };
        doc.get_dictionary_mut(item_id)?.set("Dest", explicit);
        return Ok(true);
    }

    let Some(action) = item.get(b"A").ok().and_then(|obj| resolve_dict(doc, obj)) else {
        return Ok(false);
    };
    let is_goto = action
        .get(b"S")
        .and_then(Object::as_name)
        .is_ok_and(|kind| kind == b"GoTo");
    let explicit = action
        .get(b"D")
        .ok()
        .and_then(destination_name)
        .and_then(|name| names.get(name))
        .cloned();

    match explicit {
        Some(explicit) if is_goto => {
            let item = doc.get_dictionary_mut(item_id)?;
            item.remove(b"A");
            item.set("Dest", explicit);
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn destination_name(dest: &Object) -> Option<&[u8]> {
    match dest {
        Object::Name(name) | Object::String(name, _) => Some(name.as_slice()),
        _ => None,
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, obj).and_then(|obj| obj.as_dict().ok())
}

fn resolve_array<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Vec<Object>> {
    resolve(doc, obj).and_then(|obj| obj.as_array().ok())
}
