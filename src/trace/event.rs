use crate::nodes::{NodeId, NodeKind};
use crate::resolver::{SamplerMode, Strategy};
use crate::workflow::DocumentShape;
use std::fmt;

/// A structured record of one decision taken while resolving prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionEvent {
    ShapeDetected {
        shape: DocumentShape,
    },
    /// A node entry was an object but had no usable integer id or fields.
    NodeSkipped {
        index: usize,
    },
    /// A link entry had the wrong arity or non-integer ids.
    LinkSkipped {
        index: usize,
    },
    CandidateInspected {
        node_id: NodeId,
        kind: NodeKind,
        mode: SamplerMode,
        wired: bool,
    },
    SamplerSelected {
        node_id: NodeId,
        mode: SamplerMode,
        reaches_output: bool,
    },
    SourceResolved {
        node_id: NodeId,
        input: &'static str,
        source: Option<NodeId>,
    },
    /// A resolved source node has a type with no text extraction rule.
    NoTextRule {
        node_id: NodeId,
        type_tag: String,
    },
    StrategyFinished {
        strategy: Strategy,
        matched: bool,
    },
}

impl fmt::Display for ResolutionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionEvent::ShapeDetected { shape } => write!(f, "processing {}", shape),
            ResolutionEvent::NodeSkipped { index } => write!(f, "skipped node entry {}", index),
            ResolutionEvent::LinkSkipped { index } => write!(f, "skipped link entry {}", index),
            ResolutionEvent::CandidateInspected {
                node_id,
                kind,
                mode,
                wired,
            } => write!(
                f,
                "{} candidate {} ({}): wired={}",
                mode, node_id, kind, wired
            ),
            ResolutionEvent::SamplerSelected {
                node_id,
                mode,
                reaches_output,
            } => {
                if *reaches_output {
                    write!(f, "selected {} sampler {} (reaches output)", mode, node_id)
                } else {
                    write!(f, "selected first {} sampler {} (no output reach)", mode, node_id)
                }
            }
            ResolutionEvent::SourceResolved {
                node_id,
                input,
                source,
            } => match source {
                Some(source) => write!(f, "node {} input '{}' <- node {}", node_id, input, source),
                None => write!(f, "node {} input '{}' is not wired", node_id, input),
            },
            ResolutionEvent::NoTextRule { node_id, type_tag } => {
                write!(f, "no text reader for node {} ({})", node_id, type_tag)
            }
            ResolutionEvent::StrategyFinished { strategy, matched } => {
                let outcome = if *matched { "matched" } else { "no match" };
                write!(f, "strategy '{}': {}", strategy, outcome)
            }
        }
    }
}
