use crate::nodes::NodeId;
use serde_json::Value;

/// A directed edge from one node's output slot to another node's input slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Option<i64>,
    pub source: NodeId,
    pub source_slot: usize,
    pub target: NodeId,
    pub target_slot: usize,
    /// Advisory data type (`"CONDITIONING"`, `"IMAGE"`, ...). Never enforced.
    pub data_type: Option<String>,
}

impl Link {
    /// Parses either serialized link form:
    ///
    /// - `[id, source, source_slot, target, target_slot, type]`
    /// - `{"id", "origin_id", "origin_slot", "target_id", "target_slot", "type"}`
    ///
    /// Returns `None` for anything else, including entries with missing fields or
    /// non-integer ids and slots.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(fields) if fields.len() >= 5 => Some(Link {
                id: fields[0].as_i64(),
                source: fields[1].as_i64()?,
                source_slot: slot(&fields[2])?,
                target: fields[3].as_i64()?,
                target_slot: slot(&fields[4])?,
                data_type: fields.get(5).and_then(data_type),
            }),
            Value::Object(fields) => Some(Link {
                id: fields.get("id").and_then(Value::as_i64),
                source: fields.get("origin_id")?.as_i64()?,
                source_slot: slot(fields.get("origin_slot")?)?,
                target: fields.get("target_id")?.as_i64()?,
                target_slot: slot(fields.get("target_slot")?)?,
                data_type: fields.get("type").and_then(data_type),
            }),
            _ => None,
        }
    }
}

fn slot(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|n| usize::try_from(n).ok())
}

fn data_type(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}
