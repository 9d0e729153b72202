//! Input handling for symbolic sequences.
//!
//! The generator consumes `&[MotifUnit]`; everything here is the thin
//! boundary that turns raw text or files into that form.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::motif::MotifUnit;

/// Errors returned while loading sequence text.
#[derive(thiserror::Error, Debug)]
pub enum ReadSourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Split comma-separated text into units.
///
/// Every substring between commas becomes a unit verbatim, including empty
/// strings produced by leading, trailing or doubled commas. Nothing is
/// trimmed or rejected here; interpreting malformed input is the caller's
/// concern.
pub fn tokenize(text: &str) -> Vec<MotifUnit> {
    text.split(',').map(MotifUnit::new).collect()
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("bgz"))
        .unwrap_or(false)
}

/// Read the entire sequence text from `path`, transparently decompressing
/// gzip input, with any trailing line break removed.
pub fn read_sequence_text(path: &Path) -> Result<String, ReadSourceError> {
    if !path.exists() {
        return Err(ReadSourceError::NotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let mut text = String::new();
    if is_gzip(path) {
        BufReader::new(MultiGzDecoder::new(file)).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }

    while text.ends_with('\n') || text.ends_with('\r') {
        text.pop();
    }
    Ok(text)
}
