use crate::nodes::NodeKind;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Node record as the visual editor serializes it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEditorNode {
    #[serde(default)]
    pub id: Value,
    #[serde(rename = "type", default)]
    pub type_tag: Option<String>,
    #[serde(default)]
    pub inputs: Option<Vec<RawInputSlot>>,
    #[serde(default, alias = "widgetsValues")]
    pub widgets_values: Value,
}

/// Declared input slot of an editor node. Only the name matters for resolution.
#[derive(Debug, Deserialize)]
pub(crate) struct RawInputSlot {
    #[serde(default)]
    pub name: Option<String>,
}

/// Editor-shaped workflow: node and link records, still unparsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorWorkflow {
    pub nodes: Vec<Value>,
    pub links: Vec<Value>,
}

/// One entry of a flat, id-keyed ("API") workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiNode {
    pub id: String,
    pub class_type: String,
    pub kind: NodeKind,
    pub inputs: Map<String, Value>,
}

impl ApiNode {
    pub(crate) fn from_entry(id: String, mut entry: Map<String, Value>) -> Self {
        let class_type = entry
            .get("class_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let inputs = match entry.remove("inputs") {
            Some(Value::Object(inputs)) => inputs,
            _ => Map::new(),
        };
        Self {
            id,
            kind: NodeKind::from_type_tag(&class_type),
            class_type,
            inputs,
        }
    }

    pub fn input(&self, name: &str) -> Option<&Value> {
        self.inputs.get(name)
    }
}

/// Flat workflow: entries in document order. Entries that were not objects are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiWorkflow {
    pub entries: Vec<ApiNode>,
}

impl ApiWorkflow {
    pub fn first_of_kind(&self, kind: NodeKind) -> Option<&ApiNode> {
        self.entries.iter().find(|node| node.kind == kind)
    }
}
