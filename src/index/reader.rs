use crate::error::{IndexError, Result};
use crate::index::format::RawIndex;
use crate::index::types::DocIndex;
use memchr::{memchr, memmem, memrchr};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

/// Call wrapping the payload in a generated `searchindex.js`
const SET_INDEX_CALL: &[u8] = b"setIndex(";

/// Open and parse a search index file (memory-mapped)
pub fn open(path: &Path) -> Result<DocIndex> {
    let start = Instant::now();
    let file = File::open(path)?;

    if file.metadata()?.len() == 0 {
        return Err(IndexError::missing_payload(format!(
            "{} is empty",
            path.display()
        )));
    }

    // SAFETY: the index is a read-only build artifact; it is not expected to
    // change while mapped.
    let mmap = unsafe { Mmap::map(&file)? };
    let index = from_bytes(&mmap)?;

    tracing::debug!(
        path = %path.display(),
        pages = index.page_count(),
        objects = index.objects.len(),
        terms = index.terms.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "loaded search index"
    );

    Ok(index)
}

/// Parse an index from raw bytes (bare JSON or `Search.setIndex(...)`)
pub fn from_bytes(bytes: &[u8]) -> Result<DocIndex> {
    let payload = extract_payload(bytes)?;
    let raw: RawIndex = serde_json::from_slice(payload)?;
    raw.into_index()
}

/// Parse an index from a string
pub fn from_str(source: &str) -> Result<DocIndex> {
    from_bytes(source.as_bytes())
}

/// Locate the JSON object inside the file contents
fn extract_payload(bytes: &[u8]) -> Result<&[u8]> {
    let trimmed = bytes.trim_ascii();

    if trimmed.first() == Some(&b'{') {
        return Ok(trimmed);
    }

    let call = memmem::find(trimmed, SET_INDEX_CALL).ok_or_else(|| {
        IndexError::missing_payload("expected a JSON object or a setIndex(...) call")
    })?;
    let args = &trimmed[call + SET_INDEX_CALL.len()..];

    let open = memchr(b'{', args)
        .ok_or_else(|| IndexError::missing_payload("setIndex(...) has no object argument"))?;
    let close = memrchr(b'}', args)
        .filter(|&close| close > open)
        .ok_or_else(|| IndexError::missing_payload("setIndex(...) object is not closed"))?;

    Ok(&args[open..=close])
}
