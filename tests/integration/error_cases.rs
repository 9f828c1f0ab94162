//! Failures surface as typed errors and leave no output behind.

use crate::common::Workspace;
use pdfmerger::PdfMergerError;
use pdfmerger::config::Config;
use pdfmerger::merge::{MergeOptions, merge_files};
use pdfmerger::progress::NoProgress;

#[test]
fn test_empty_source_list() {
    let ws = Workspace::new();
    let output = ws.path("merged.pdf");

    let result = merge_files(&[], &output, MergeOptions::default(), &mut NoProgress);

    assert!(matches!(result, Err(PdfMergerError::NoFilesToMerge)));
    assert!(!output.exists());
}

#[test]
fn test_missing_source_writes_nothing() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 1);
    let missing = ws.path("missing.pdf");
    let output = ws.path("merged.pdf");

    let result = merge_files(
        &[a, missing.clone()],
        &output,
        MergeOptions::default(),
        &mut NoProgress,
    );

    match result {
        Err(PdfMergerError::FileNotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_corrupt_source_is_rejected() {
    let ws = Workspace::new();
    let corrupt = ws.path("corrupt.pdf");
    std::fs::write(&corrupt, b"this is not a pdf at all").expect("write corrupt file");
    let output = ws.path("merged.pdf");

    let result = merge_files(&[corrupt], &output, MergeOptions::default(), &mut NoProgress);

    assert!(matches!(result, Err(PdfMergerError::FailedToLoadPdf { .. })));
    assert!(!output.exists());
}

#[test]
fn test_directory_as_source() {
    let ws = Workspace::new();
    let output = ws.path("merged.pdf");

    let result = merge_files(
        &[ws.path("")],
        &output,
        MergeOptions::default(),
        &mut NoProgress,
    );

    assert!(matches!(result, Err(PdfMergerError::NotAFile { .. })));
}

#[test]
fn test_destination_directory_is_not_created() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 1);
    let output = ws.path("no/such/dir/merged.pdf");

    let result = merge_files(&[a], &output, MergeOptions::default(), &mut NoProgress);

    let err = result.expect_err("missing directory");
    assert!(matches!(err, PdfMergerError::FailedToCreateOutput { .. }));
    assert_eq!(err.exit_code(), 5);
    assert!(!ws.path("no").exists());
}

#[test]
fn test_headless_run_without_destination() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 1);

    let config = Config {
        sources: vec![a],
        destination: None,
        bookmarks: true,
        headless: true,
        verbosity: 0,
    };

    let err = pdfmerger::run(&config).expect_err("destination required");
    assert!(matches!(err, PdfMergerError::InvalidArguments { .. }));
}

#[test]
fn test_headless_run_without_sources() {
    let ws = Workspace::new();

    let config = Config {
        sources: Vec::new(),
        destination: Some(ws.path("merged.pdf")),
        bookmarks: true,
        headless: true,
        verbosity: 0,
    };

    assert!(pdfmerger::run(&config).is_err());
    assert!(!ws.path("merged.pdf").exists());
}
