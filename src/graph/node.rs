use crate::nodes::{NodeId, NodeKind};
use crate::workflow::definition::RawEditorNode;
use serde::Deserialize;
use serde_json::Value;

/// A declared input slot. The position in `Node::inputs` is the slot index links refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSlot {
    pub name: Option<String>,
}

/// A parsed editor node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Type tag exactly as serialized, kept for unknown kinds.
    pub type_tag: String,
    pub kind: NodeKind,
    pub inputs: Vec<InputSlot>,
    /// Literal values attached to the node. Usually an array, occasionally an object.
    pub widgets: Value,
}

/// Outcome of parsing one entry of the `nodes` array.
pub(crate) enum ParsedNode {
    Node(Node),
    /// An object we could not use (no integer id, unexpected field types).
    Skipped,
    /// Not an object at all.
    NotARecord,
}

impl Node {
    pub(crate) fn parse(entry: &Value) -> ParsedNode {
        if !entry.is_object() {
            return ParsedNode::NotARecord;
        }
        let Ok(raw) = RawEditorNode::deserialize(entry) else {
            return ParsedNode::Skipped;
        };
        let Some(id) = raw.id.as_i64() else {
            return ParsedNode::Skipped;
        };
        let type_tag = raw.type_tag.unwrap_or_default();
        ParsedNode::Node(Node {
            id,
            kind: NodeKind::from_type_tag(&type_tag),
            type_tag,
            inputs: raw
                .inputs
                .unwrap_or_default()
                .into_iter()
                .map(|slot| InputSlot { name: slot.name })
                .collect(),
            widgets: raw.widgets_values,
        })
    }

    /// Index of the first declared input called `name`.
    pub fn input_slot_index(&self, name: &str) -> Option<usize> {
        self.inputs
            .iter()
            .position(|slot| slot.name.as_deref() == Some(name))
    }

    pub fn widget(&self, position: usize) -> Option<&Value> {
        self.widgets.as_array()?.get(position)
    }
}
