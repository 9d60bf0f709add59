//! Human-readable insight extraction over a reduced graph.
//!
//! The output is a contract, not decoration: exactly one insight for an
//! empty reduced graph, exactly three (in fixed order) otherwise, with
//! stable ids, so downstream panels and tests can assert on them.

use crate::model::{CollaborationModule, ReducedGraph};
use serde::{Deserialize, Serialize};

/// One templated insight line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub text: String,
}

impl Insight {
    fn new(id: &str, text: String) -> Self {
        Self {
            id: id.to_string(),
            text,
        }
    }
}

pub const NO_CONNECTIONS_ID: &str = "no-connections";
pub const THRESHOLD_SUMMARY_ID: &str = "threshold-summary";
pub const TOP_AUTHORSHIP_ID: &str = "top-authorship";
pub const HUB_DENSITY_ID: &str = "hub-density";

/// Compute the insight list for a reduced graph.
pub fn insights(
    module: &CollaborationModule,
    reduced: &ReducedGraph,
    threshold: f64,
) -> Vec<Insight> {
    if reduced.nodes.is_empty() {
        return vec![Insight::new(
            NO_CONNECTIONS_ID,
            format!(
                "No collaborators in {} stay connected at a {:.2} risk threshold. \
                 Lower the threshold to surface the network.",
                module.name, threshold
            ),
        )];
    }

    // Ties broken by first occurrence in node order.
    let mut top_doa = &reduced.nodes[0];
    let mut hub = &reduced.nodes[0];
    for n in &reduced.nodes[1..] {
        if n.node.doa_normalized > top_doa.node.doa_normalized {
            top_doa = n;
        }
        if n.degree > hub.degree {
            hub = n;
        }
    }

    let avg_doa = reduced
        .nodes
        .iter()
        .map(|n| n.node.doa_normalized)
        .sum::<f64>()
        / reduced.nodes.len() as f64;

    vec![
        Insight::new(
            THRESHOLD_SUMMARY_ID,
            format!(
                "{} of {} collaborators and {} connections clear the {:.2} risk threshold \
                 ({} isolated collaborators at this cutoff).",
                reduced.nodes.len(),
                reduced.total_nodes,
                reduced.edges.len(),
                threshold,
                reduced.isolated_count
            ),
        ),
        Insight::new(
            TOP_AUTHORSHIP_ID,
            format!(
                "{} carries the highest degree of authorship at {:.0}%, making them the \
                 most likely single point of failure in this view.",
                top_doa.node.label,
                top_doa.node.doa_normalized * 100.0
            ),
        ),
        Insight::new(
            HUB_DENSITY_ID,
            format!(
                "{} is the collaboration hub with {} active connections; the visible \
                 network has {:.0}% edge density and an average authorship of {:.0}%.",
                hub.node.label,
                hub.degree,
                reduced.density() * 100.0,
                avg_doa * 100.0
            ),
        ),
    ]
}
