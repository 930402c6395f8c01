use crate::error::WorkflowError;
use crate::nodes::{NodeId, NodeKind};
use crate::trace::{ResolutionEvent, ResolutionObserver};
use crate::workflow::EditorWorkflow;
use ahash::AHashMap;
use serde_json::Value;

mod link;
mod node;
mod reachability;

pub use link::Link;
pub use node::{InputSlot, Node};

use node::ParsedNode;

/// Read-only, indexed view of an editor workflow graph.
///
/// Built fresh for each resolution call. Holds two indices over the accepted links:
/// a reverse index `(target, target_slot) -> source` and a forward index
/// `source -> [targets]`.
#[derive(Debug, Clone, Default)]
pub struct WorkflowGraph {
    nodes: Vec<Node>,
    positions: AHashMap<NodeId, usize>,
    links: Vec<Link>,
    // Key: (target node, target slot), Value: source node. Last link wins.
    in_edges: AHashMap<(NodeId, usize), NodeId>,
    out_edges: AHashMap<NodeId, Vec<NodeId>>,
}

impl WorkflowGraph {
    /// Builds the graph and its indices from raw node and link records.
    ///
    /// Fails only if a node entry is not a JSON object. Nodes without an integer id
    /// and links that cannot be parsed are skipped and reported to `observer`.
    pub fn build(
        nodes: &[Value],
        links: &[Value],
        observer: &mut dyn ResolutionObserver,
    ) -> Result<Self, WorkflowError> {
        let mut graph = WorkflowGraph::default();

        for (index, entry) in nodes.iter().enumerate() {
            match Node::parse(entry) {
                ParsedNode::Node(node) => graph.insert_node(node),
                ParsedNode::Skipped => observer.observe(ResolutionEvent::NodeSkipped { index }),
                ParsedNode::NotARecord => {
                    return Err(WorkflowError::MalformedGraph(format!(
                        "node entry {} is not an object",
                        index
                    )));
                }
            }
        }

        for (index, entry) in links.iter().enumerate() {
            let Some(link) = Link::from_value(entry) else {
                observer.observe(ResolutionEvent::LinkSkipped { index });
                continue;
            };
            graph
                .in_edges
                .insert((link.target, link.target_slot), link.source);
            graph
                .out_edges
                .entry(link.source)
                .or_default()
                .push(link.target);
            graph.links.push(link);
        }

        Ok(graph)
    }

    pub fn from_workflow(
        workflow: &EditorWorkflow,
        observer: &mut dyn ResolutionObserver,
    ) -> Result<Self, WorkflowError> {
        Self::build(&workflow.nodes, &workflow.links, observer)
    }

    // A repeated id replaces the earlier record but keeps its place in node order.
    fn insert_node(&mut self, node: Node) {
        match self.positions.get(&node.id) {
            Some(&position) => self.nodes[position] = node,
            None => {
                self.positions.insert(node.id, self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.positions.get(&id).map(|&position| &self.nodes[position])
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every accepted link, in document order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes whose kind is one of `kinds`, in document order.
    pub fn nodes_by_type(&self, kinds: &[NodeKind]) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|node| kinds.contains(&node.kind))
            .collect()
    }

    pub fn first_of_kind(&self, kind: NodeKind) -> Option<&Node> {
        self.nodes.iter().find(|node| node.kind == kind)
    }

    /// The node feeding input slot `target_slot` of node `target`.
    pub fn source_of(&self, target: NodeId, target_slot: usize) -> Option<NodeId> {
        self.in_edges.get(&(target, target_slot)).copied()
    }

    /// Follows the input called `name` one link upstream.
    pub fn source_of_input(&self, node: &Node, name: &str) -> Option<NodeId> {
        let slot = node.input_slot_index(name)?;
        self.source_of(node.id, slot)
    }

    pub fn input_slot_index(&self, node: &Node, name: &str) -> Option<usize> {
        node.input_slot_index(name)
    }

    /// Direct downstream neighbours of `id`, one entry per outgoing link.
    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        self.out_edges.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}
