use std::fs;
use std::path::Path;

use crate::error::Result;

use super::parse::{LrcDocument, parse_document};

/// Read and parse a lyric file.
///
/// Invalid UTF-8 is replaced rather than rejected and a leading BOM is dropped,
/// since lyric files come from all sorts of editors.
pub fn load_document(path: &Path) -> Result<LrcDocument> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let doc = parse_document(text);
    tracing::debug!(path = %path.display(), lines = doc.timeline.len(), "parsed lyric file");
    Ok(doc)
}
