use crate::error::WorkflowError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub(crate) mod definition;

pub use definition::{ApiNode, ApiWorkflow, EditorWorkflow};

/// The two serialized shapes a workflow document comes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentShape {
    /// `{ "nodes": [...], "links": [...] }` as saved by the visual editor.
    Editor,
    /// `{ "<id>": { "class_type": ..., "inputs": {...} } }` as submitted for execution.
    Api,
}

impl fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentShape::Editor => f.write_str("editor graph"),
            DocumentShape::Api => f.write_str("API graph"),
        }
    }
}

/// A parsed workflow document, its shape decided once at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowDocument {
    Editor(EditorWorkflow),
    Api(ApiWorkflow),
}

impl WorkflowDocument {
    /// Classifies an already-decoded JSON value.
    ///
    /// A top-level object with a `nodes` key is an editor graph; any other object is
    /// a flat graph. Fails only when the top level is not an object, or when `nodes`
    /// or `links` are present but are not arrays.
    pub fn from_value(value: Value) -> Result<Self, WorkflowError> {
        let Value::Object(mut map) = value else {
            return Err(WorkflowError::MalformedGraph(
                "top-level workflow must be a JSON object".to_string(),
            ));
        };

        if let Some(nodes) = map.remove("nodes") {
            let Value::Array(nodes) = nodes else {
                return Err(WorkflowError::MalformedGraph(
                    "'nodes' must be an array".to_string(),
                ));
            };
            let links = match map.remove("links") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(links)) => links,
                Some(_) => {
                    return Err(WorkflowError::MalformedGraph(
                        "'links' must be an array".to_string(),
                    ));
                }
            };
            return Ok(WorkflowDocument::Editor(EditorWorkflow { nodes, links }));
        }

        let entries = map
            .into_iter()
            .filter_map(|(id, entry)| match entry {
                Value::Object(entry) => Some(ApiNode::from_entry(id, entry)),
                _ => None,
            })
            .collect();
        Ok(WorkflowDocument::Api(ApiWorkflow { entries }))
    }

    pub fn shape(&self) -> DocumentShape {
        match self {
            WorkflowDocument::Editor(_) => DocumentShape::Editor,
            WorkflowDocument::Api(_) => DocumentShape::Api,
        }
    }
}

impl FromStr for WorkflowDocument {
    type Err = WorkflowError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| WorkflowError::Decode(e.to_string()))?;
        Self::from_value(value)
    }
}
