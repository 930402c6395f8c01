use crate::graph::Node;
use crate::nodes::PromptSide;
use crate::trace::{ResolutionEvent, ResolutionObserver};

/// Reads prompt text from an encoder node using its kind's extraction rule.
///
/// `side` only matters for encoders that pack both prompts into one node. Node
/// types without a rule yield `None`.
pub fn read_text(node: &Node, side: Option<PromptSide>) -> Option<String> {
    node.kind.text_rule()?.extract(&node.widgets, side)
}

/// Like `read_text`, but reports source nodes that have no rule.
pub(crate) fn read_source(
    node: Option<&Node>,
    side: PromptSide,
    observer: &mut dyn ResolutionObserver,
) -> Option<String> {
    let node = node?;
    if node.kind.text_rule().is_none() {
        observer.observe(ResolutionEvent::NoTextRule {
            node_id: node.id,
            type_tag: node.type_tag.clone(),
        });
        return None;
    }
    read_text(node, Some(side))
}

/// Reads both prompts from a node that holds them at positions 0 and 1.
pub fn read_pair(node: &Node) -> (Option<String>, Option<String>) {
    (
        read_text(node, Some(PromptSide::Positive)),
        read_text(node, Some(PromptSide::Negative)),
    )
}
