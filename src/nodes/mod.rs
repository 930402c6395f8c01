use serde_json::Value;
use std::fmt;

mod catalog;

pub use catalog::NodeKind;

/// Identity of a node inside one serialized graph.
pub type NodeId = i64;

/// Which of the two prompts a reader is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptSide {
    Positive,
    Negative,
}

impl PromptSide {
    /// The input name samplers and bridges use for this side.
    pub fn input_name(&self) -> &'static str {
        match self {
            PromptSide::Positive => "positive",
            PromptSide::Negative => "negative",
        }
    }
}

impl fmt::Display for PromptSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input_name())
    }
}

/// How literal prompt text is laid out in an encoder's widget values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRule {
    /// One prompt at widget position 0.
    Single,
    /// Positive prompt at position 0, negative prompt at position 1.
    Dual,
}

impl TextRule {
    /// Widget position holding the prompt for the given side.
    pub fn position(&self, side: Option<PromptSide>) -> usize {
        match (self, side) {
            (TextRule::Dual, Some(PromptSide::Negative)) => 1,
            _ => 0,
        }
    }

    /// Reads and normalizes the prompt for `side` out of a widget-value array.
    ///
    /// Widget values that are not an array (some node types serialize an object
    /// there) have no positions and yield `None`.
    pub fn extract(&self, widgets: &Value, side: Option<PromptSide>) -> Option<String> {
        widgets
            .as_array()?
            .get(self.position(side))
            .and_then(normalize_text)
    }
}

/// The part a node type plays when recovering prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Sampler exposing inputs named `positive` and `negative`.
    PosNegSampler,
    /// Sampler taking a single aggregated `text_embeds` input.
    EmbedsSampler,
    /// Forwards positive/negative conditioning without text of its own.
    Bridge,
    /// Holds literal prompt text in its widget values.
    Encoder(TextRule),
    /// Terminal sink (save/decode) marking the live path.
    Output,
    Other,
}

/// Turns a raw widget or input value into prompt text.
///
/// Strings are trimmed, numbers and booleans use their JSON text, everything else
/// is absent. An empty result is absent too, so callers never see `Some("")`.
pub fn normalize_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}
