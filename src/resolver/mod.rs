use crate::error::WorkflowError;
use crate::graph::WorkflowGraph;
use crate::nodes::{NodeKind, NodeRole, PromptSide, TextRule};
use crate::trace::{ResolutionEvent, ResolutionObserver, TracingObserver};
use crate::workflow::{EditorWorkflow, WorkflowDocument};
use serde::Serialize;
use std::fmt;

mod api;
pub mod encoder;
pub mod wiring;

use api::resolve_api;
use encoder::{read_pair, read_source};
pub use wiring::{SamplerMode, TEXT_EMBEDS_INPUT, WiringResolver};

/// Breadth-first layers explored when checking whether a sampler reaches an output.
pub const DEFAULT_MAX_HOPS: usize = 200;

/// The resolution strategies, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Sampler with named `positive`/`negative` inputs.
    PosNegSampler,
    /// Sampler with one `text_embeds` input, fed by a bridge or a dual-prompt encoder.
    EmbedsSampler,
    /// First dual-prompt encoder anywhere, regardless of wiring.
    StandaloneEncoder,
    /// Named input fields of a flat, id-keyed document.
    ApiGraph,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::PosNegSampler => "pos/neg sampler wiring",
            Strategy::EmbedsSampler => "text_embeds sampler wiring",
            Strategy::StandaloneEncoder => "standalone dual encoder",
            Strategy::ApiGraph => "API graph fields",
        };
        f.write_str(name)
    }
}

/// The recovered prompt pair. Serializes as `{"positive": ..., "negative": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedPrompts {
    pub positive: Option<String>,
    pub negative: Option<String>,
    /// The strategy that produced the prompts. `None` when nothing was found.
    #[serde(skip)]
    pub strategy: Option<Strategy>,
}

impl ResolvedPrompts {
    /// `true` when no prompt could be determined.
    pub fn is_empty(&self) -> bool {
        self.positive.is_none() && self.negative.is_none()
    }

    /// The positive prompt, falling back to the negative one.
    pub fn primary(&self) -> Option<&str> {
        self.positive.as_deref().or(self.negative.as_deref())
    }
}

/// Records the outcome of one strategy and returns the prompts if any were found.
pub(crate) fn conclude(
    strategy: Strategy,
    positive: Option<String>,
    negative: Option<String>,
    observer: &mut dyn ResolutionObserver,
) -> Option<ResolvedPrompts> {
    let prompts = ResolvedPrompts {
        positive,
        negative,
        strategy: Some(strategy),
    };
    let matched = !prompts.is_empty();
    observer.observe(ResolutionEvent::StrategyFinished { strategy, matched });
    matched.then_some(prompts)
}

/// Recovers positive and negative prompts from workflow documents.
///
/// The resolver is plain configuration: it holds no per-document state and can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct PromptResolver {
    max_hops: usize,
}

pub struct ResolverBuilder {
    max_hops: usize,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Bounds the output-reachability search. Zero disables the reachability preference.
    pub fn max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn build(self) -> PromptResolver {
        PromptResolver {
            max_hops: self.max_hops,
        }
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for PromptResolver {
    fn default() -> Self {
        ResolverBuilder::new().build()
    }
}

impl PromptResolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Resolves prompts, logging every decision through `tracing`.
    pub fn resolve(&self, document: &WorkflowDocument) -> Result<ResolvedPrompts, WorkflowError> {
        self.resolve_observed(document, &mut TracingObserver)
    }

    /// Resolves prompts, reporting every decision to `observer`.
    ///
    /// Strategies are tried in a fixed order and the first one that yields at least
    /// one prompt wins. An empty result means no prompt could be determined; the
    /// only error is a structurally malformed editor graph.
    pub fn resolve_observed(
        &self,
        document: &WorkflowDocument,
        observer: &mut dyn ResolutionObserver,
    ) -> Result<ResolvedPrompts, WorkflowError> {
        observer.observe(ResolutionEvent::ShapeDetected {
            shape: document.shape(),
        });
        let found = match document {
            WorkflowDocument::Editor(workflow) => self.resolve_editor(workflow, observer)?,
            WorkflowDocument::Api(workflow) => resolve_api(workflow, observer),
        };
        Ok(found.unwrap_or_default())
    }

    fn resolve_editor(
        &self,
        workflow: &EditorWorkflow,
        observer: &mut dyn ResolutionObserver,
    ) -> Result<Option<ResolvedPrompts>, WorkflowError> {
        let graph = WorkflowGraph::from_workflow(workflow, observer)?;
        let wiring = WiringResolver::new(&graph, self.max_hops);

        let found = from_posneg_sampler(&wiring, observer)
            .or_else(|| from_embeds_sampler(&wiring, observer))
            .or_else(|| from_standalone_encoder(&graph, observer));
        Ok(found)
    }
}

/// Strategy 1: follow a sampler's `positive`/`negative` inputs to their encoders.
fn from_posneg_sampler(
    wiring: &WiringResolver<'_>,
    observer: &mut dyn ResolutionObserver,
) -> Option<ResolvedPrompts> {
    let Some(sampler) = wiring.select_sampler(SamplerMode::PosNeg, observer) else {
        return conclude(Strategy::PosNegSampler, None, None, observer);
    };
    let positive_src = wiring.source_for_side(sampler, PromptSide::Positive, observer);
    let negative_src = wiring.source_for_side(sampler, PromptSide::Negative, observer);
    let positive = read_source(positive_src, PromptSide::Positive, observer);
    let negative = read_source(negative_src, PromptSide::Negative, observer);
    conclude(Strategy::PosNegSampler, positive, negative, observer)
}

/// Strategy 2: follow a sampler's `text_embeds` input to a bridge (one more level
/// upstream) or to a dual-prompt encoder.
fn from_embeds_sampler(
    wiring: &WiringResolver<'_>,
    observer: &mut dyn ResolutionObserver,
) -> Option<ResolvedPrompts> {
    let source = wiring
        .select_sampler(SamplerMode::TextEmbeds, observer)
        .and_then(|sampler| wiring.source_for(sampler, TEXT_EMBEDS_INPUT, observer));

    let (positive, negative) = match source {
        Some(bridge) if bridge.kind.role() == NodeRole::Bridge => {
            let positive_src = wiring.source_for_side(bridge, PromptSide::Positive, observer);
            let negative_src = wiring.source_for_side(bridge, PromptSide::Negative, observer);
            (
                read_source(positive_src, PromptSide::Positive, observer),
                read_source(negative_src, PromptSide::Negative, observer),
            )
        }
        Some(encoder) if encoder.kind.text_rule() == Some(TextRule::Dual) => read_pair(encoder),
        _ => (None, None),
    };
    conclude(Strategy::EmbedsSampler, positive, negative, observer)
}

/// Strategy 3: read the first dual-prompt encoder in the graph, wired or not.
fn from_standalone_encoder(
    graph: &WorkflowGraph,
    observer: &mut dyn ResolutionObserver,
) -> Option<ResolvedPrompts> {
    let (positive, negative) = graph
        .first_of_kind(NodeKind::WanVideoTextEncode)
        .map(read_pair)
        .unwrap_or_default();
    conclude(Strategy::StandaloneEncoder, positive, negative, observer)
}
