//! Reading the serialized workflow embedded in image files.
//!
//! The visual editor stores its graph as PNG text chunks under the keyword
//! `workflow` (editor shape) and the submitted flat graph under `prompt`.

use crate::error::MetadataError;
use std::fs;
use std::path::Path;

mod png;

pub use png::{TextChunk, text_chunks};

/// Text-chunk keywords that may hold a workflow, in order of preference.
pub const WORKFLOW_KEYS: [&str; 2] = ["workflow", "prompt"];

/// Returns the embedded workflow text of a PNG image, if any.
///
/// When a keyword appears more than once the last chunk wins.
pub fn workflow_text_from_bytes(bytes: &[u8]) -> Result<Option<String>, MetadataError> {
    let chunks = text_chunks(bytes)?;
    Ok(WORKFLOW_KEYS.iter().find_map(|key| {
        chunks
            .iter()
            .rev()
            .find(|chunk| chunk.keyword == *key)
            .map(|chunk| chunk.text.clone())
    }))
}

pub fn workflow_text_from_file(path: &Path) -> Result<Option<String>, MetadataError> {
    let bytes = fs::read(path).map_err(|e| MetadataError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    workflow_text_from_bytes(&bytes)
}
