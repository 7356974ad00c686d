//! Input discovery and natural ordering.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::FileError;

/// Extensions treated as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// List the image files directly inside `dir`, in natural order.
///
/// Subdirectories and files with other extensions are ignored.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, FileError> {
    let read_err = |source: std::io::Error| FileError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_image(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
    tracing::debug!(dir = %dir.display(), count = files.len(), "Listed input images");
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Text(String),
    Number(&'a str),
}

fn digit_runs() -> Option<&'static Regex> {
    static DIGITS: OnceLock<Option<Regex>> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").ok()).as_ref()
}

/// Split into alternating text and digit runs. Text is lowercased, digit
/// runs lose their leading zeros.
fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let Some(digits) = digit_runs() else {
        return vec![Chunk::Text(s.to_lowercase())];
    };

    let mut out = Vec::new();
    let mut last = 0;
    for m in digits.find_iter(s) {
        if m.start() > last {
            out.push(Chunk::Text(s[last..m.start()].to_lowercase()));
        }
        let trimmed = m.as_str().trim_start_matches('0');
        out.push(Chunk::Number(if trimmed.is_empty() { "0" } else { trimmed }));
        last = m.end();
    }
    if last < s.len() {
        out.push(Chunk::Text(s[last..].to_lowercase()));
    }
    out
}

fn cmp_chunk(a: &Chunk, b: &Chunk) -> Ordering {
    match (a, b) {
        // Arbitrary-length digit runs: more digits means larger.
        (Chunk::Number(x), Chunk::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
    }
}

/// Compare strings so that embedded numbers order by value:
/// `img2` < `img10`. Ties fall back to plain byte order so the sort is
/// total and stable across runs.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (ca, cb) = (chunks(a), chunks(b));
    ca.iter()
        .zip(&cb)
        .map(|(x, y)| cmp_chunk(x, y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| ca.len().cmp(&cb.len()))
        .then_with(|| a.cmp(b))
}
