//! The progress indicator brackets the merge exactly once.

use crate::common::{RecordingIndicator, Workspace};
use pdfmerger::merge::{MergeOptions, merge_files};

#[test]
fn test_indicator_stopped_after_output_is_written() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 2);
    let output = ws.path("merged.pdf");
    let mut indicator = RecordingIndicator::watching(&output);

    merge_files(&[a], &output, MergeOptions::default(), &mut indicator).expect("merge");

    assert_eq!(indicator.events, ["start", "stop"]);
    assert_eq!(indicator.destination_existed_at_stop, Some(true));
}

#[test]
fn test_indicator_stopped_when_a_source_fails() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 1);
    let output = ws.path("merged.pdf");
    let mut indicator = RecordingIndicator::watching(&output);

    let result = merge_files(
        &[a, ws.path("missing.pdf")],
        &output,
        MergeOptions::default(),
        &mut indicator,
    );

    assert!(result.is_err());
    assert_eq!(indicator.events, ["start", "stop"]);
    assert_eq!(indicator.destination_existed_at_stop, Some(false));
}

#[test]
fn test_indicator_untouched_for_empty_selection() {
    let ws = Workspace::new();
    let mut indicator = RecordingIndicator::default();

    let result = merge_files(
        &[],
        &ws.path("merged.pdf"),
        MergeOptions::default(),
        &mut indicator,
    );

    assert!(result.is_err());
    assert!(indicator.events.is_empty());
}
