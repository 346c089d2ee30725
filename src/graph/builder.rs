//! Build a call graph from a statistics snapshot.

use crate::graph::callgraph::CallGraph;
use crate::graph::keys::KeyGenerator;
use crate::stats::schema::RawStatEntry;
use log::debug;

/// Build the call graph for one profiling run.
///
/// Each entry contributes a node keyed by the generator; each of its
/// caller relationships contributes a directed `caller -> callee`
/// edge. Repeated keys (recursion, multiple call sites) deduplicate
/// into single nodes and edges. Top-level entries with no callers
/// still appear as nodes. No cycle detection: self-recursive and
/// mutually-recursive patterns are preserved as-is.
///
/// Deterministic: the same snapshot always yields the same node and
/// edge sets, regardless of entry order.
pub fn create_graph(stats: &[RawStatEntry], keys: &KeyGenerator<'_>) -> CallGraph {
    let mut graph = CallGraph::new();

    for entry in stats {
        let callee = keys.generate_key(&entry.code);
        graph.add_node(callee.clone(), entry.timing);

        for caller in &entry.callers {
            let caller_key = keys.generate_key(&caller.code);
            graph.add_edge(caller_key, callee.clone(), caller.timing);
        }
    }

    debug!(
        "Built call graph: {} nodes, {} edges from {} entries",
        graph.node_count(),
        graph.edge_count(),
        stats.len()
    );

    graph
}
