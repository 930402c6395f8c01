use super::{ResolvedPrompts, Strategy, conclude};
use crate::nodes::{NodeKind, normalize_text};
use crate::trace::ResolutionObserver;
use crate::workflow::{ApiNode, ApiWorkflow};

const POSITIVE_FIELD: &str = "positive_prompt";
const NEGATIVE_FIELD: &str = "negative_prompt";
const PROMPT_FIELD: &str = "prompt";

/// Resolves prompts from a flat, id-keyed workflow by reading named input fields.
///
/// The first dual-prompt encoder wins; otherwise the first single-prompt edit
/// encoder supplies the positive prompt only. Values that are not literals (for
/// example `["12", 0]` link references) count as absent.
pub(crate) fn resolve_api(
    workflow: &ApiWorkflow,
    observer: &mut dyn ResolutionObserver,
) -> Option<ResolvedPrompts> {
    if let Some(node) = workflow.first_of_kind(NodeKind::WanVideoTextEncode) {
        let positive = field(node, POSITIVE_FIELD);
        let negative = field(node, NEGATIVE_FIELD);
        if let Some(found) = conclude(Strategy::ApiGraph, positive, negative, observer) {
            return Some(found);
        }
    }

    let positive = workflow
        .first_of_kind(NodeKind::TextEncodeQwenImageEdit)
        .and_then(|node| field(node, PROMPT_FIELD));
    conclude(Strategy::ApiGraph, positive, None, observer)
}

fn field(node: &ApiNode, name: &str) -> Option<String> {
    node.input(name).and_then(normalize_text)
}
