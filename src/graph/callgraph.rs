//! Directed call graph.
//!
//! Nodes are [`NodeKey`]s, edges mean "caller invoked callee at
//! least once". Self-loops and cycles from recursive calls are
//! representable and never removed. Iteration order carries no
//! meaning; equality is on the node and edge sets.

use crate::graph::keys::NodeKey;
use crate::stats::schema::Timing;
use std::collections::{HashMap, HashSet};

/// A directed graph of caller→callee relationships with timing
/// attributes on nodes and edges.
///
/// Built once per profiling run and read-only afterwards. Node and
/// edge insertion are idempotent; attributes are last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    nodes: HashMap<NodeKey, Timing>,
    edges: HashMap<(NodeKey, NodeKey), Timing>,
    successors: HashMap<NodeKey, HashSet<NodeKey>>,
    predecessors: HashMap<NodeKey, HashSet<NodeKey>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, overwriting its timing if it already exists.
    /// Never duplicates the node.
    pub fn add_node(&mut self, key: NodeKey, timing: Timing) {
        self.nodes.insert(key, timing);
    }

    /// Add a directed edge `caller -> callee`, overwriting its
    /// timing if it already exists. Missing endpoints are inserted
    /// with default timing and keep any timing they already have.
    pub fn add_edge(&mut self, caller: NodeKey, callee: NodeKey, timing: Timing) {
        self.ensure_node(&caller);
        self.ensure_node(&callee);

        self.successors
            .entry(caller.clone())
            .or_default()
            .insert(callee.clone());
        self.predecessors
            .entry(callee.clone())
            .or_default()
            .insert(caller.clone());

        self.edges.insert((caller, callee), timing);
    }

    fn ensure_node(&mut self, key: &NodeKey) {
        if !self.nodes.contains_key(key) {
            self.nodes.insert(key.clone(), Timing::default());
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn contains_edge(&self, caller: &NodeKey, callee: &NodeKey) -> bool {
        self.edges
            .contains_key(&(caller.clone(), callee.clone()))
    }

    pub fn node_timing(&self, key: &NodeKey) -> Option<&Timing> {
        self.nodes.get(key)
    }

    pub fn edge_timing(&self, caller: &NodeKey, callee: &NodeKey) -> Option<&Timing> {
        self.edges.get(&(caller.clone(), callee.clone()))
    }

    /// Iterate over all node keys. Order is unspecified.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.keys()
    }

    /// Iterate over all edges as `(caller, callee, timing)`.
    /// Order is unspecified.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey, &Timing)> {
        self.edges
            .iter()
            .map(|((caller, callee), timing)| (caller, callee, timing))
    }

    /// Nodes that `key` calls.
    pub fn successors(&self, key: &NodeKey) -> impl Iterator<Item = &NodeKey> {
        self.successors.get(key).into_iter().flatten()
    }

    /// Nodes that call `key`.
    pub fn predecessors(&self, key: &NodeKey) -> impl Iterator<Item = &NodeKey> {
        self.predecessors.get(key).into_iter().flatten()
    }
}

impl PartialEq for CallGraph {
    /// Order-independent comparison of the node and edge sets with
    /// their attributes. Adjacency maps are derived from the edges
    /// and not compared separately.
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}
