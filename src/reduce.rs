//! Threshold-based graph reduction.
//!
//! Filters edges below a SPOF-score threshold, annotates surviving nodes
//! with their degree, and optionally removes isolated nodes. The threshold
//! is deliberately not validated: out-of-range values yield a trivially
//! empty or fully populated graph, which is the documented permissive
//! behavior for a visualization aid.

use crate::model::{CollaborationModule, RankedNode, ReducedGraph};
use std::collections::{HashMap, HashSet};

/// Reduce a module to the edges with `spof_score >= threshold`.
///
/// `total_nodes` always reports the pre-removal count; `isolated_count` is
/// the number of degree-0 nodes after thresholding, whether or not they are
/// dropped from the node list.
pub fn reduce(module: &CollaborationModule, threshold: f64, drop_isolated: bool) -> ReducedGraph {
    let surviving: Vec<_> = module
        .edges
        .iter()
        .filter(|e| e.spof_score >= threshold)
        .cloned()
        .collect();

    // Degree = surviving-edge endpoint occurrences per node.
    let mut degrees: HashMap<&str, usize> = HashMap::new();
    for node in &module.nodes {
        degrees.insert(node.id.as_str(), 0);
    }
    for edge in &surviving {
        *degrees.entry(edge.source.as_str()).or_insert(0) += 1;
        *degrees.entry(edge.target.as_str()).or_insert(0) += 1;
    }

    let isolated_count = module
        .nodes
        .iter()
        .filter(|n| degrees.get(n.id.as_str()).copied().unwrap_or(0) == 0)
        .count();

    let nodes: Vec<RankedNode> = module
        .nodes
        .iter()
        .filter_map(|n| {
            let degree = degrees.get(n.id.as_str()).copied().unwrap_or(0);
            if drop_isolated && degree == 0 {
                return None;
            }
            Some(RankedNode {
                node: n.clone(),
                degree,
            })
        })
        .collect();

    // Re-filter against the retained id set so the endpoint invariant holds
    // even after isolate removal.
    let retained: HashSet<&str> = nodes.iter().map(|n| n.node.id.as_str()).collect();
    let edges: Vec<_> = surviving
        .into_iter()
        .filter(|e| retained.contains(e.source.as_str()) && retained.contains(e.target.as_str()))
        .collect();

    tracing::debug!(
        module = module.id.as_str(),
        threshold,
        kept_nodes = nodes.len(),
        kept_edges = edges.len(),
        isolated = isolated_count,
        "reduced collaboration module"
    );

    ReducedGraph {
        nodes,
        edges,
        total_nodes: module.nodes.len(),
        isolated_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{generate, ContextKind, TimeRange};
    use crate::model::sample_roster;
    use pretty_assertions::assert_eq;

    fn module() -> CollaborationModule {
        let names = sample_roster(3, 10);
        generate("team-42", &names, ContextKind::Team, TimeRange::Max).unwrap()
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let module = module();
        let reduced = reduce(&module, 0.0, false);
        assert_eq!(reduced.edges.len(), module.edges.len());
        assert_eq!(reduced.nodes.len(), module.nodes.len());
        assert_eq!(reduced.isolated_count, 0);
        assert_eq!(reduced.total_nodes, module.nodes.len());
    }

    #[test]
    fn impossible_threshold_empties_the_graph() {
        let module = module();
        let reduced = reduce(&module, 1.01, true);
        assert!(reduced.edges.is_empty());
        assert!(reduced.nodes.is_empty());
        assert_eq!(reduced.isolated_count, module.nodes.len());
        assert_eq!(reduced.total_nodes, module.nodes.len());
    }

    #[test]
    fn degree_sum_equals_twice_edge_count() {
        let module = module();
        for threshold in [0.0, 0.3, 0.5, 0.7, 0.9] {
            let reduced = reduce(&module, threshold, false);
            let degree_sum: usize = reduced.nodes.iter().map(|n| n.degree).sum();
            assert_eq!(degree_sum, 2 * reduced.edges.len(), "threshold {threshold}");
        }
    }

    #[test]
    fn pruning_is_monotonic_in_threshold() {
        let module = module();
        let mut previous = usize::MAX;
        for threshold in [0.0, 0.2, 0.4, 0.6, 0.8, 1.0] {
            let count = reduce(&module, threshold, false).edges.len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn isolate_removal_preserves_endpoint_invariant() {
        let module = module();
        let reduced = reduce(&module, 0.85, true);
        let ids: std::collections::HashSet<&str> =
            reduced.nodes.iter().map(|n| n.node.id.as_str()).collect();
        for edge in &reduced.edges {
            assert!(ids.contains(edge.source.as_str()));
            assert!(ids.contains(edge.target.as_str()));
        }
        for node in &reduced.nodes {
            assert!(node.degree > 0);
        }
    }

    #[test]
    fn isolates_are_counted_but_kept_when_not_dropping() {
        let module = module();
        let dropped = reduce(&module, 0.9, true);
        let kept = reduce(&module, 0.9, false);
        assert_eq!(dropped.isolated_count, kept.isolated_count);
        assert_eq!(kept.nodes.len(), module.nodes.len());
        assert_eq!(
            dropped.nodes.len(),
            module.nodes.len() - dropped.isolated_count
        );
    }
}
