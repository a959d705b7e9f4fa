//! Hop-distance layering: assigns every subcomponent of a chip to a column.
//!
//! Phases:
//!   1. Build the interior graph (subcomponents + one node per boundary side)
//!   2. Drop feedback edges found by depth-first search from each boundary,
//!      so both wavefronts are bounded on circuits with loops
//!   3. Longest-path wavefront forward from the boundary inputs
//!   4. Longest-path wavefront backward from the boundary outputs
//!   5. Blend both sides into a final column, then clamp so nothing sits
//!      right of what it drives toward the outputs

use std::collections::HashSet;

use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Control, DfsEvent, EdgeRef, Reversed, depth_first_search};

use super::types::ColumnAssignment;
use crate::circuit::{BoundaryPin, Connection, PinTarget};
use crate::error::LayoutError;

/// Node weight in the interior graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InteriorNode {
    Subcomponent(usize),
    Boundary(BoundaryPin),
}

/// Precomputed adjacency of one chip interior with feedback edges removed.
pub struct InteriorGraph {
    n_subcomponents: usize,
    /// Node index of subcomponent `i` is `i`; boundary nodes follow.
    input_node: usize,
    output_node: usize,
    /// Forward adjacency for the input-side wavefront.
    successors: Vec<Vec<usize>>,
    /// Backward adjacency for the output-side wavefront.
    predecessors: Vec<Vec<usize>>,
    /// `predecessors` inverted: edges of the output-side view, pointing
    /// toward the outputs.
    downstream: Vec<Vec<usize>>,
    /// Number of connections dropped as feedback by the input-side view.
    pub feedback_edges: usize,
}

impl InteriorGraph {
    pub fn build(n_subcomponents: usize, connections: &[Connection]) -> Self {
        let mut graph: DiGraph<InteriorNode, usize> = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..n_subcomponents)
            .map(|i| graph.add_node(InteriorNode::Subcomponent(i)))
            .collect();
        let input = graph.add_node(InteriorNode::Boundary(BoundaryPin::Input));
        let output = graph.add_node(InteriorNode::Boundary(BoundaryPin::Output));

        let node_of = |target: PinTarget| -> Option<NodeIndex> {
            match target {
                PinTarget::Subcomponent(i) => nodes.get(i).copied(),
                PinTarget::Boundary(BoundaryPin::Input) => Some(input),
                PinTarget::Boundary(BoundaryPin::Output) => Some(output),
            }
        };

        for (ci, connection) in connections.iter().enumerate() {
            let (Some(src), Some(dst)) = (connection.source.component, connection.destination.component)
            else {
                continue;
            };
            if let (Some(a), Some(b)) = (node_of(src), node_of(dst)) {
                graph.add_edge(a, b, ci);
            }
        }

        // Each wavefront gets its own acyclic view: back edges of a DFS from
        // its boundary node (then sweeping unreached nodes), forward for the
        // input side and over the reversed graph for the output side.
        let mut forward_feedback: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        let starts = std::iter::once(input).chain(graph.node_indices());
        depth_first_search(&graph, starts, |event| {
            if let DfsEvent::BackEdge(u, v) = event {
                forward_feedback.insert((u, v));
            }
            Control::<()>::Continue
        });
        let mut backward_feedback: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        let starts = std::iter::once(output).chain(graph.node_indices());
        depth_first_search(Reversed(&graph), starts, |event| {
            if let DfsEvent::BackEdge(u, v) = event {
                backward_feedback.insert((v, u));
            }
            Control::<()>::Continue
        });

        let n_nodes = graph.node_count();
        let mut successors = vec![Vec::new(); n_nodes];
        let mut predecessors = vec![Vec::new(); n_nodes];
        let mut downstream = vec![Vec::new(); n_nodes];
        let mut feedback_edges = 0;
        for edge in graph.edge_references() {
            let (a, b) = (edge.source(), edge.target());
            if forward_feedback.contains(&(a, b)) {
                feedback_edges += 1;
            } else {
                successors[a.index()].push(b.index());
            }
            if !backward_feedback.contains(&(a, b)) {
                predecessors[b.index()].push(a.index());
                downstream[a.index()].push(b.index());
            }
        }
        for list in successors
            .iter_mut()
            .chain(predecessors.iter_mut())
            .chain(downstream.iter_mut())
        {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            n_subcomponents,
            input_node: input.index(),
            output_node: output.index(),
            successors,
            predecessors,
            downstream,
            feedback_edges,
        }
    }

    /// Longest hop distance of every subcomponent from `start`, walking
    /// `adjacency`. Subcomponents wired straight to the start node sit at 0.
    /// Returns the distances and the number of distinct levels reached.
    fn hop_distances(&self, start: usize, adjacency: &[Vec<usize>]) -> (Vec<Option<usize>>, usize) {
        let mut hops: Vec<Option<usize>> = vec![None; self.n_subcomponents];
        let mut frontier = vec![start];
        let mut distance = 0;

        loop {
            let mut next: Vec<usize> = Vec::new();
            for &node in &frontier {
                for &succ in &adjacency[node] {
                    if succ >= self.n_subcomponents {
                        continue;
                    }
                    // Keep the maximum distance seen, not the first.
                    if hops[succ].is_none_or(|h| h < distance) {
                        hops[succ] = Some(distance);
                        if !next.contains(&succ) {
                            next.push(succ);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
            distance += 1;
        }

        (hops, distance)
    }

    pub fn left_hops(&self) -> (Vec<Option<usize>>, usize) {
        self.hop_distances(self.input_node, &self.successors)
    }

    pub fn right_hops(&self) -> (Vec<Option<usize>>, usize) {
        self.hop_distances(self.output_node, &self.predecessors)
    }

    /// Pull every subcomponent that reaches an output no further right than
    /// the subcomponents it drives on the way there. Nodes are visited nearest
    /// the outputs first, so each successor is final when read.
    fn clamp_toward_outputs(&self, columns: &mut [usize], right_hops: &[Option<usize>]) {
        let mut order: Vec<usize> = (0..self.n_subcomponents)
            .filter(|&i| right_hops[i].is_some())
            .collect();
        order.sort_by_key(|&i| right_hops[i]);
        for i in order {
            let limit = self.downstream[i]
                .iter()
                .filter(|&&j| j < self.n_subcomponents && right_hops[j].is_some())
                .map(|&j| columns[j])
                .min();
            if let Some(limit) = limit {
                columns[i] = columns[i].min(limit);
            }
        }
    }
}

/// Assign a column to every subcomponent.
///
/// Fails on the first subcomponent that neither boundary reaches.
pub fn assign_columns(
    n_subcomponents: usize,
    connections: &[Connection],
) -> Result<ColumnAssignment, LayoutError> {
    let graph = InteriorGraph::build(n_subcomponents, connections);
    let (left_hops, left_levels) = graph.left_hops();
    let (right_hops, right_levels) = graph.right_hops();
    let n_columns = left_levels.max(right_levels);

    let mut columns = Vec::with_capacity(n_subcomponents);
    for i in 0..n_subcomponents {
        let left = left_hops[i];
        let right = right_hops[i].map(|r| n_columns - 1 - r);
        let column = match (left, right) {
            (Some(l), Some(r)) => {
                let blend = n_columns as f64 * (l as f64 / (l + r + 1) as f64);
                blend.round() as usize
            }
            (Some(l), None) => l,
            (None, Some(r)) => r,
            (None, None) => return Err(LayoutError::UnplacedSubcomponent { index: i }),
        };
        columns.push(column);
    }
    graph.clamp_toward_outputs(&mut columns, &right_hops);

    debug!(
        "layering: {} subcomponents in {} columns ({} feedback edges) -> {:?}",
        n_subcomponents, n_columns, graph.feedback_edges, columns
    );

    Ok(ColumnAssignment {
        columns,
        n_columns,
        left_hops,
        right_hops,
    })
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_layering.rs"]
mod tests;
