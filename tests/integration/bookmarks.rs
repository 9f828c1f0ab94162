//! Outline import across merged documents.

use crate::common::{
    Destinations, Entry, Workspace, add_named_link, child_targets, load_merged, outline_count,
    outline_targets, target_page,
};
use lopdf::Object;
use pdfmerger::merge::outline::{named_destinations, top_level_entries};
use pdfmerger::merge::{MergeOptions, merge_files};
use pdfmerger::progress::NoProgress;
use rstest::rstest;

const WITH_BOOKMARKS: MergeOptions = MergeOptions { bookmarks: true };
const WITHOUT_BOOKMARKS: MergeOptions = MergeOptions { bookmarks: false };

#[rstest]
#[case::explicit(Destinations::Explicit)]
#[case::named(Destinations::Named)]
fn test_bookmarks_point_into_their_own_pages(#[case] destinations: Destinations) {
    let ws = Workspace::new();
    let a = ws.pdf_with_bookmarks("A", 3, &[("Intro", 1), ("Results", 3)], destinations);
    let b = ws.pdf_with_bookmarks("B", 2, &[("Appendix", 2)], destinations);
    let output = ws.path("merged.pdf");

    let summary = merge_files(&[a, b], &output, WITH_BOOKMARKS, &mut NoProgress).expect("merge");
    assert_eq!(summary.outline_entries, 3);

    let merged = load_merged(&output);
    assert_eq!(
        outline_targets(&merged),
        [
            ("Intro".to_string(), 1),
            ("Results".to_string(), 3),
            ("Appendix".to_string(), 5),
        ]
    );
}

#[test]
fn test_disabled_bookmarks_produce_no_outline() {
    let ws = Workspace::new();
    let a = ws.pdf_with_bookmarks("A", 2, &[("Intro", 1)], Destinations::Explicit);
    let output = ws.path("merged.pdf");

    let summary = merge_files(&[a], &output, WITHOUT_BOOKMARKS, &mut NoProgress).expect("merge");
    assert_eq!(summary.outline_entries, 0);
    assert_eq!(summary.total_pages, 2);

    let merged = load_merged(&output);
    let catalog = merged.catalog().expect("catalog");
    assert!(!catalog.has(b"Outlines"));
}

#[test]
fn test_sources_without_outline_mix_with_ones_that_have_it() {
    let ws = Workspace::new();
    let plain = ws.pdf("Plain", 2);
    let marked = ws.pdf_with_bookmarks("Marked", 1, &[("Only", 1)], Destinations::Explicit);
    let output = ws.path("merged.pdf");

    merge_files(&[plain, marked], &output, WITH_BOOKMARKS, &mut NoProgress).expect("merge");

    let merged = load_merged(&output);
    assert_eq!(outline_targets(&merged), [("Only".to_string(), 3)]);
}

#[test]
fn test_same_bookmarks_twice_are_not_deduplicated() {
    let ws = Workspace::new();
    let a = ws.pdf_with_bookmarks("A", 2, &[("Chapter", 2)], Destinations::Explicit);
    let output = ws.path("merged.pdf");

    merge_files(&[a.clone(), a], &output, WITH_BOOKMARKS, &mut NoProgress).expect("merge");

    let merged = load_merged(&output);
    assert_eq!(
        outline_targets(&merged),
        [("Chapter".to_string(), 2), ("Chapter".to_string(), 4)]
    );
}

#[rstest]
#[case::explicit(Destinations::Explicit)]
#[case::named(Destinations::Named)]
fn test_nested_entries_stay_under_their_parents(#[case] destinations: Destinations) {
    let ws = Workspace::new();
    let a = ws.pdf_with_outline(
        "A",
        4,
        &[
            Entry::leaf("Part 1", 1).with_children(vec![
                Entry::leaf("Section 1.1", 2),
                Entry::leaf("Section 1.2", 3),
            ]),
            Entry::leaf("Part 2", 4),
        ],
        destinations,
    );
    let b = ws.pdf_with_outline(
        "B",
        2,
        &[Entry::leaf("Appendix", 1).with_children(vec![Entry::leaf("Tables", 2)])],
        destinations,
    );
    let output = ws.path("merged.pdf");

    let summary = merge_files(&[a, b], &output, WITH_BOOKMARKS, &mut NoProgress).expect("merge");
    assert_eq!(summary.outline_entries, 3);

    let merged = load_merged(&output);
    assert_eq!(
        outline_targets(&merged),
        [
            ("Part 1".to_string(), 1),
            ("Part 2".to_string(), 4),
            ("Appendix".to_string(), 5),
        ]
    );

    let top = top_level_entries(&merged);
    assert_eq!(
        child_targets(&merged, top[0]),
        [("Section 1.1".to_string(), 2), ("Section 1.2".to_string(), 3)]
    );
    assert!(child_targets(&merged, top[1]).is_empty());
    assert_eq!(child_targets(&merged, top[2]), [("Tables".to_string(), 6)]);

    // Three top-level entries plus three visible children.
    assert_eq!(outline_count(&merged), 6);
}

#[test]
fn test_named_destinations_are_kept_for_page_links() {
    let ws = Workspace::new();
    let a = ws.pdf_with_bookmarks("A", 2, &[("Intro", 1), ("Results", 2)], Destinations::Named);
    add_named_link(&a, 2, "Intro");
    let b = ws.pdf_with_bookmarks("B", 1, &[("Appendix", 1)], Destinations::Named);
    let output = ws.path("merged.pdf");

    merge_files(&[a, b], &output, WITHOUT_BOOKMARKS, &mut NoProgress).expect("merge");

    let merged = load_merged(&output);
    let names = named_destinations(&merged);
    assert_eq!(names.len(), 3);
    assert_eq!(target_page(&merged, &names[b"Intro".as_slice()]), 1);
    assert_eq!(target_page(&merged, &names[b"Results".as_slice()]), 2);
    assert_eq!(target_page(&merged, &names[b"Appendix".as_slice()]), 3);

    let page_two = merged.get_pages()[&2];
    let annots = merged
        .get_dictionary(page_two)
        .and_then(|page| page.get(b"Annots"))
        .and_then(Object::as_array)
        .expect("annotations");
    let link = merged
        .get_dictionary(annots[0].as_reference().expect("annotation reference"))
        .expect("link annotation");
    assert_eq!(
        link.get(b"Dest").expect("link destination"),
        &Object::Name(b"Intro".to_vec())
    );
}
