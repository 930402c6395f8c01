use thiserror::Error;

/// Errors that can occur while turning serialized text into a workflow document.
///
/// Only the top-level shape is checked here. Irregular graph content (broken links,
/// unknown node types, unwired samplers) never produces an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Failed to decode workflow JSON: {0}")]
    Decode(String),

    #[error("Workflow graph is malformed: {0}")]
    MalformedGraph(String),
}

/// Errors that can occur while reading embedded text from an image file.
#[derive(Error, Debug, Clone)]
pub enum MetadataError {
    #[error("Could not read image file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Input is not a PNG image (bad signature)")]
    NotPng,

    #[error("PNG data ends inside chunk '{chunk}'")]
    Truncated { chunk: String },

    #[error("Could not decompress text chunk '{keyword}': {message}")]
    Decompress { keyword: String, message: String },
}

/// Errors that can occur while writing extraction results to disk.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Failed to serialize output: {0}")]
    Serialize(String),
}
