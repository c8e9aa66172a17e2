//! Capture file discovery and parsing.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use wire::Capture;

/// A parsed capture record and its 1-based line number.
#[derive(Debug, Clone)]
pub struct CaptureLine {
    pub line: usize,
    pub capture: Capture,
}

/// Parses JSON-lines capture records. Blank lines are skipped.
pub fn read_captures(reader: impl BufRead, source: &str) -> Result<Vec<CaptureLine>> {
    let mut records = Vec::new();
    for (index, text) in reader.lines().enumerate() {
        let line = index + 1;
        let text = text.with_context(|| format!("read {source}:{line}"))?;
        if text.trim().is_empty() {
            continue;
        }
        let capture = serde_json::from_str(&text)
            .with_context(|| format!("{source}:{line}: parse capture json"))?;
        records.push(CaptureLine { line, capture });
    }
    Ok(records)
}

/// Lists the capture files to decode.
///
/// A file path is returned as is. For a directory, its regular files are
/// returned sorted by path, filtered by `glob` against either the full path
/// or the file name.
pub fn collect_capture_files(path: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("read dir {}", path.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
