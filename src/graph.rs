//! Directed reference graph and cycle detection.
//!
//! The detector is a depth-first traversal with an explicit stack (no
//! native recursion, so stack depth stays bounded on large graphs). A
//! global visited set prevents re-expanding nodes across traversal starts;
//! a per-path on-stack set closes cycles. When a neighbor already on the
//! current stack is met, the suffix of the path starting at that neighbor
//! is reported as a cycle. Overlapping cycles reachable via multiple paths
//! may be reported more than once; callers must not rely on deduplication.

use crate::models::edge::Edge;
use std::collections::{BTreeMap, HashSet};

/// Adjacency representation: node -> ordered (neighbor, edge) pairs.
/// BTreeMap keeps traversal starts sorted so detection is deterministic.
pub type Adjacency = BTreeMap<String, Vec<(String, Edge)>>;

#[derive(Debug, Clone)]
/// One closed walk in the reference graph. `nodes` lists each participant
/// once starting at the entry node; `edges` holds the participating edges
/// including the closing edge back to the entry.
pub struct Cycle {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
}

impl Cycle {
    /// Arrow-joined path that closes back to its own start node,
    /// e.g. `"A → B → A"`.
    pub fn path_string(&self) -> String {
        let mut parts: Vec<&str> = self.nodes.iter().map(String::as_str).collect();
        if let Some(first) = parts.first().copied() {
            parts.push(first);
        }
        parts.join(" → ")
    }

    /// Weakest link among the cycle's edges.
    pub fn min_confidence(&self) -> f64 {
        self.edges
            .iter()
            .map(|e| e.confidence)
            .fold(f64::INFINITY, f64::min)
    }

    /// Whether any participating edge has one of the given types.
    pub fn has_edge_type(&self, types: &[&str]) -> bool {
        self.edges
            .iter()
            .any(|e| types.contains(&e.edge_type.as_str()))
    }
}

/// Build the adjacency representation from a flat edge list. Edges keep
/// their input order per source node.
pub fn build_graph(edges: &[Edge]) -> Adjacency {
    let mut graph: Adjacency = BTreeMap::new();
    for e in edges {
        graph
            .entry(e.src_file.clone())
            .or_default()
            .push((e.dst_file.clone(), e.clone()));
    }
    graph
}

/// Find all cycles reachable in the graph. Terminates when traversal has
/// exhausted every node; no depth or edge-count bound is imposed.
pub fn find_cycles(graph: &Adjacency) -> Vec<Cycle> {
    let mut cycles: Vec<Cycle> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for start in graph.keys() {
        if visited.contains(start.as_str()) {
            continue;
        }
        // Frame: (node, index of next neighbor to expand).
        let mut stack: Vec<(&str, usize)> = vec![(start.as_str(), 0)];
        let mut path: Vec<&str> = vec![start.as_str()];
        let mut path_edges: Vec<&Edge> = Vec::new();
        let mut on_stack: HashSet<&str> = HashSet::new();
        visited.insert(start.as_str());
        on_stack.insert(start.as_str());

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let neighbors: &[(String, Edge)] =
                graph.get(node).map(|v| v.as_slice()).unwrap_or(&[]);
            if frame.1 < neighbors.len() {
                let i = frame.1;
                frame.1 += 1;
                let (nbr, edge) = &neighbors[i];
                if on_stack.contains(nbr.as_str()) {
                    // Back edge: the suffix of the path from the repeated
                    // node through this closing edge is a cycle.
                    let pos = path
                        .iter()
                        .position(|n| *n == nbr.as_str())
                        .unwrap_or(0);
                    let nodes: Vec<String> =
                        path[pos..].iter().map(|n| n.to_string()).collect();
                    let mut cycle_edges: Vec<Edge> =
                        path_edges[pos..].iter().map(|e| (*e).clone()).collect();
                    cycle_edges.push(edge.clone());
                    cycles.push(Cycle {
                        nodes,
                        edges: cycle_edges,
                    });
                } else if !visited.contains(nbr.as_str()) {
                    visited.insert(nbr.as_str());
                    on_stack.insert(nbr.as_str());
                    path.push(nbr.as_str());
                    path_edges.push(edge);
                    stack.push((nbr.as_str(), 0));
                }
            } else {
                stack.pop();
                on_stack.remove(node);
                path.pop();
                path_edges.truncate(path.len().saturating_sub(1));
            }
        }
    }
    cycles
}
