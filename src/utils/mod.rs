//! Source path expansion.

use crate::error::{PdfMergerError, Result};
use std::path::{Path, PathBuf};

/// Expand glob patterns into filesystem paths, keeping argument order.
///
/// An argument naming an existing path is taken literally, even when it
/// contains glob characters (`scan[1].pdf`). Matches of one pattern come back
/// sorted, as `glob` yields them. A pattern that matches nothing (or is not a
/// glob at all) is kept verbatim so that a missing file is reported by the
/// merge instead of silently dropped.
///
/// # Errors
///
/// Fails on malformed patterns and on unreadable directories met while
/// matching.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        resolved_paths.extend(collect_paths_for_pattern(pattern.as_ref())?);
    }

    Ok(resolved_paths)
}

fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    if !is_glob(pattern) || Path::new(pattern).exists() {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let paths = glob::glob(pattern).map_err(|err| {
        PdfMergerError::invalid_arguments(format!("bad pattern '{pattern}': {err}"))
    })?;

    let mut resolved_paths = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| PdfMergerError::other(err.to_string()))?;
        resolved_paths.push(path);
    }

    if resolved_paths.is_empty() {
        log::warn!("'{pattern}' matched no files");
        resolved_paths.push(PathBuf::from(pattern));
    }

    Ok(resolved_paths)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
