//! Page splicing through the public merge entry point.

use crate::common::{Workspace, load_merged, page_labels};
use pdfmerger::cli::Cli;
use pdfmerger::config::Config;
use pdfmerger::merge::{MergeOptions, merge_files};
use pdfmerger::progress::NoProgress;
use rstest::rstest;

#[test]
fn test_merge_two_files_keeps_page_order() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 3);
    let b = ws.pdf("B", 2);
    let output = ws.path("merged.pdf");

    let summary = merge_files(
        &[a, b],
        &output,
        MergeOptions::default(),
        &mut NoProgress,
    )
    .expect("merge");

    assert_eq!(summary.files_merged, 2);
    assert_eq!(summary.total_pages, 5);
    assert_eq!(summary.destination, output);

    let merged = load_merged(&output);
    assert_eq!(page_labels(&merged), ["A-1", "A-2", "A-3", "B-1", "B-2"]);
}

#[test]
fn test_source_order_decides_page_order() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 1);
    let b = ws.pdf("B", 2);
    let output = ws.path("merged.pdf");

    merge_files(&[b, a], &output, MergeOptions::default(), &mut NoProgress).expect("merge");

    let merged = load_merged(&output);
    assert_eq!(page_labels(&merged), ["B-1", "B-2", "A-1"]);
}

#[test]
fn test_same_file_twice_is_included_twice() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 2);
    let output = ws.path("merged.pdf");

    let summary = merge_files(
        &[a.clone(), a],
        &output,
        MergeOptions::default(),
        &mut NoProgress,
    )
    .expect("merge");

    assert_eq!(summary.total_pages, 4);
    let merged = load_merged(&output);
    assert_eq!(page_labels(&merged), ["A-1", "A-2", "A-1", "A-2"]);
}

#[rstest]
#[case(&[1])]
#[case(&[4, 1])]
#[case(&[2, 3, 5])]
fn test_total_pages_is_sum_of_sources(#[case] sizes: &[usize]) {
    let ws = Workspace::new();
    let sources: Vec<_> = sizes
        .iter()
        .enumerate()
        .map(|(index, &pages)| ws.pdf(&format!("S{index}"), pages))
        .collect();
    let output = ws.path("merged.pdf");

    let summary =
        merge_files(&sources, &output, MergeOptions::default(), &mut NoProgress).expect("merge");

    let expected: usize = sizes.iter().sum();
    assert_eq!(summary.total_pages, expected);
    assert_eq!(load_merged(&output).get_pages().len(), expected);
}

#[test]
fn test_existing_destination_is_overwritten() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 1);
    let output = ws.path("merged.pdf");
    std::fs::write(&output, b"stale contents").expect("write stale file");

    merge_files(&[a], &output, MergeOptions::default(), &mut NoProgress).expect("merge");

    let merged = load_merged(&output);
    assert_eq!(page_labels(&merged), ["A-1"]);
}

#[test]
fn test_headless_run_merges_command_line_files() {
    let ws = Workspace::new();
    let a = ws.pdf("A", 2);
    let b = ws.pdf("B", 1);
    let output = ws.path("out.pdf");

    let config = Config {
        sources: vec![a, b],
        destination: Some(output.clone()),
        bookmarks: true,
        headless: true,
        verbosity: 0,
    };

    let summary = pdfmerger::run(&config)
        .expect("run")
        .expect("not cancelled");
    assert_eq!(summary.total_pages, 3);
    assert!(output.exists());
}

#[test]
fn test_headless_run_expands_glob_sources() {
    use clap::Parser;
    use std::ffi::OsString;

    let ws = Workspace::new();
    ws.pdf("part1", 1);
    ws.pdf("part2", 2);
    let output = ws.path("combined.pdf");
    let pattern = ws.path("part*.pdf");

    let cli = Cli::parse_from([
        OsString::from("pdfmerger"),
        pattern.into_os_string(),
        OsString::from("--dst"),
        output.clone().into_os_string(),
        OsString::from("--headless"),
    ]);
    let config = Config::try_from(&cli).expect("config");
    assert_eq!(config.sources.len(), 2);

    let summary = pdfmerger::run(&config).expect("run").expect("not cancelled");
    assert_eq!(summary.total_pages, 3);

    let merged = load_merged(&output);
    assert_eq!(page_labels(&merged), ["part1-1", "part2-1", "part2-2"]);
}
