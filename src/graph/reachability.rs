use super::WorkflowGraph;
use crate::nodes::{NodeId, NodeKind};
use ahash::AHashSet;

impl WorkflowGraph {
    /// Breadth-first search downstream of `start` for a node of one of `output_kinds`.
    ///
    /// Explores at most `max_hops` layers and never revisits a node, so it terminates
    /// on cyclic graphs. The start node itself is not tested.
    pub fn reaches(&self, start: NodeId, output_kinds: &[NodeKind], max_hops: usize) -> bool {
        let mut seen = AHashSet::new();
        seen.insert(start);
        let mut frontier = vec![start];

        for _ in 0..max_hops {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for &id in &frontier {
                for &target in self.successors(id) {
                    if !seen.insert(target) {
                        continue;
                    }
                    if self
                        .node(target)
                        .is_some_and(|node| output_kinds.contains(&node.kind))
                    {
                        return true;
                    }
                    next.push(target);
                }
            }
            frontier = next;
        }
        false
    }
}
