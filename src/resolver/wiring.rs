use crate::graph::{Node, WorkflowGraph};
use crate::nodes::{NodeId, NodeKind, NodeRole, PromptSide};
use crate::trace::{ResolutionEvent, ResolutionObserver};
use std::fmt;

/// Input name of the aggregated-embedding samplers.
pub const TEXT_EMBEDS_INPUT: &str = "text_embeds";

/// The two ways a sampler receives its prompt conditioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerMode {
    /// Separate `positive` and `negative` inputs. Qualifies when at least one is wired.
    PosNeg,
    /// One `text_embeds` input. Qualifies only when it is wired.
    TextEmbeds,
}

impl SamplerMode {
    pub fn role(&self) -> NodeRole {
        match self {
            SamplerMode::PosNeg => NodeRole::PosNegSampler,
            SamplerMode::TextEmbeds => NodeRole::EmbedsSampler,
        }
    }

    pub fn inputs(&self) -> &'static [&'static str] {
        match self {
            SamplerMode::PosNeg => &["positive", "negative"],
            SamplerMode::TextEmbeds => &[TEXT_EMBEDS_INPUT],
        }
    }
}

impl fmt::Display for SamplerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplerMode::PosNeg => f.write_str("pos/neg"),
            SamplerMode::TextEmbeds => f.write_str("text_embeds"),
        }
    }
}

/// Finds the live sampler of a graph and follows its inputs upstream.
pub struct WiringResolver<'g> {
    graph: &'g WorkflowGraph,
    output_kinds: Vec<NodeKind>,
    max_hops: usize,
}

impl<'g> WiringResolver<'g> {
    pub fn new(graph: &'g WorkflowGraph, max_hops: usize) -> Self {
        Self {
            graph,
            output_kinds: NodeKind::outputs(),
            max_hops,
        }
    }

    /// Picks the sampler for `mode` among the allow-listed kinds.
    ///
    /// Of the qualifying candidates, the first (in node order) that reaches an output
    /// node wins; if none does, the first qualifying candidate is used.
    pub fn select_sampler(
        &self,
        mode: SamplerMode,
        observer: &mut dyn ResolutionObserver,
    ) -> Option<&'g Node> {
        let kinds = NodeKind::with_role(mode.role());
        let candidates: Vec<&'g Node> = self
            .graph
            .nodes_by_type(&kinds)
            .into_iter()
            .filter(|node| {
                let wired = self.is_wired(node, mode);
                observer.observe(ResolutionEvent::CandidateInspected {
                    node_id: node.id,
                    kind: node.kind,
                    mode,
                    wired,
                });
                wired
            })
            .collect();

        let reachable = candidates
            .iter()
            .copied()
            .find(|node| self.reaches_output(node.id));
        let selected = reachable.or_else(|| candidates.first().copied())?;

        observer.observe(ResolutionEvent::SamplerSelected {
            node_id: selected.id,
            mode,
            reaches_output: reachable.is_some(),
        });
        Some(selected)
    }

    fn is_wired(&self, node: &Node, mode: SamplerMode) -> bool {
        let mut wired = mode
            .inputs()
            .iter()
            .map(|name| self.graph.source_of_input(node, name).is_some());
        match mode {
            SamplerMode::PosNeg => wired.any(|w| w),
            SamplerMode::TextEmbeds => wired.all(|w| w),
        }
    }

    pub fn reaches_output(&self, id: NodeId) -> bool {
        self.graph.reaches(id, &self.output_kinds, self.max_hops)
    }

    /// Follows the input called `input` of `node` one link upstream.
    pub fn source_for(
        &self,
        node: &Node,
        input: &'static str,
        observer: &mut dyn ResolutionObserver,
    ) -> Option<&'g Node> {
        let source = self.graph.source_of_input(node, input);
        observer.observe(ResolutionEvent::SourceResolved {
            node_id: node.id,
            input,
            source,
        });
        source.and_then(|id| self.graph.node(id))
    }

    pub fn source_for_side(
        &self,
        node: &Node,
        side: PromptSide,
        observer: &mut dyn ResolutionObserver,
    ) -> Option<&'g Node> {
        self.source_for(node, side.input_name(), observer)
    }
}
