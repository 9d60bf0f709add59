//! Deterministic collaboration-network generation.
//!
//! Given a context identifier, a participant roster, and a time range,
//! builds a weighted undirected graph: one node per participant with a
//! synthetic degree-of-authorship score, a Hamiltonian ring backbone that
//! keeps the graph connected regardless of later thresholding, and a
//! probabilistic subset of the remaining pairs gated by an affinity cutoff.
//!
//! The same inputs always produce the same module, down to the float bits.

use crate::model::{slugify, CollaborationEdge, CollaborationModule, ParticipantNode};
use crate::noise::{clamp, hash_string, noise};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Kind of context a network is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Team,
    Repo,
}

impl ContextKind {
    pub fn key(self) -> &'static str {
        match self {
            ContextKind::Team => "team",
            ContextKind::Repo => "repo",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Analysis window the network is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "max")]
    Max,
}

impl TimeRange {
    pub fn key(self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1m",
            TimeRange::ThreeMonths => "3m",
            TimeRange::OneYear => "1y",
            TimeRange::Max => "max",
        }
    }

    pub fn from_key(key: &str) -> Option<TimeRange> {
        match key {
            "1m" => Some(TimeRange::OneMonth),
            "3m" => Some(TimeRange::ThreeMonths),
            "1y" => Some(TimeRange::OneYear),
            "max" => Some(TimeRange::Max),
            _ => None,
        }
    }

    pub fn all() -> [TimeRange; 4] {
        [
            TimeRange::OneMonth,
            TimeRange::ThreeMonths,
            TimeRange::OneYear,
            TimeRange::Max,
        ]
    }

    /// The fixed generation preset for this window.
    pub fn config(self) -> RangeConfig {
        match self {
            TimeRange::OneMonth => RANGE_1M,
            TimeRange::ThreeMonths => RANGE_3M,
            TimeRange::OneYear => RANGE_1Y,
            TimeRange::Max => RANGE_MAX,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-window generation preset.
///
/// Shorter windows use a higher affinity cutoff and higher DOA volatility:
/// recency windows should visually read as sparser and less certain than
/// full-history windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeConfig {
    /// Added to the module seed so windows never share a seed space.
    pub seed_offset: i64,
    /// Minimum pair affinity for a supplementary edge to exist.
    pub affinity_cutoff: f64,
    /// Amplitude of the per-node DOA perturbation.
    pub doa_volatility: f64,
}

pub const RANGE_1M: RangeConfig = RangeConfig {
    seed_offset: 101,
    affinity_cutoff: 0.72,
    doa_volatility: 0.40,
};

pub const RANGE_3M: RangeConfig = RangeConfig {
    seed_offset: 211,
    affinity_cutoff: 0.66,
    doa_volatility: 0.30,
};

pub const RANGE_1Y: RangeConfig = RangeConfig {
    seed_offset: 307,
    affinity_cutoff: 0.58,
    doa_volatility: 0.18,
};

pub const RANGE_MAX: RangeConfig = RangeConfig {
    seed_offset: 401,
    affinity_cutoff: 0.50,
    doa_volatility: 0.10,
};

// Seed offsets separating the independent noise draws for one pair.
const RING_SPOF_OFFSET: i64 = 19;
const AFFINITY_OFFSET: i64 = 31;
const RING_STRENGTH_OFFSET: i64 = 47;
const PAIR_STRENGTH_OFFSET: i64 = 67;
const VOLATILITY_OFFSET: i64 = 13;

/// Generate the collaboration network for one context.
///
/// Returns `None` for an empty roster — absence, not an error. Duplicate
/// names (same slug) collapse into one node, first occurrence wins.
pub fn generate(
    context_id: &str,
    names: &[String],
    kind: ContextKind,
    range: TimeRange,
) -> Option<CollaborationModule> {
    if names.is_empty() {
        return None;
    }

    let cfg = range.config();
    let module_seed = hash_string(&format!(
        "{}:{}-collaboration:{}",
        context_id,
        kind.key(),
        range.key()
    )) + cfg.seed_offset;

    // One node per distinct slug, input order preserved.
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut nodes: Vec<ParticipantNode> = Vec::new();
    for name in names {
        let id = slugify(name);
        if !seen_ids.insert(id.clone()) {
            continue;
        }
        let i = nodes.len();
        let seed = hash_string(&format!("{}:{}:overall:{}", context_id, name, i)) + module_seed;
        let volatility_shift =
            (noise((seed + VOLATILITY_OFFSET) as f64) - 0.5) * cfg.doa_volatility;
        let doa = clamp(
            0.05 + noise(seed as f64) * 0.95 + volatility_shift,
            0.05,
            1.0,
        );
        nodes.push(ParticipantNode {
            id,
            label: name.clone(),
            doa_normalized: doa,
        });
    }

    let n = nodes.len();
    let mut edges: Vec<CollaborationEdge> = Vec::new();
    let mut connected: HashSet<(String, String)> = HashSet::new();

    // Ring backbone: every node to its cyclic successor, so the graph stays
    // connected under any threshold the backbone itself clears.
    for i in 0..n {
        let j = (i + 1) % n;
        if i == j {
            break; // single node, no self-loop
        }
        let (a, b) = canonical_pair(&nodes[i].id, &nodes[j].id);
        if !connected.insert((a.to_string(), b.to_string())) {
            continue; // n == 2: the two ring steps are the same pair
        }
        let ring_seed = pair_seed(a, b, module_seed);
        edges.push(CollaborationEdge {
            source: nodes[i].id.clone(),
            target: nodes[j].id.clone(),
            spof_score: clamp(0.7 + noise((ring_seed + RING_SPOF_OFFSET) as f64) * 0.25, 0.0, 1.0),
            collaboration_strength: clamp(
                0.6 + noise((ring_seed + RING_STRENGTH_OFFSET) as f64) * 0.4,
                0.15,
                1.0,
            ),
        });
    }

    // Supplementary edges: remaining pairs gated by affinity.
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = canonical_pair(&nodes[i].id, &nodes[j].id);
            if connected.contains(&(a.to_string(), b.to_string())) {
                continue;
            }
            let seed = pair_seed(a, b, module_seed);
            let affinity = noise((seed + AFFINITY_OFFSET) as f64);
            if affinity < cfg.affinity_cutoff {
                continue;
            }
            connected.insert((a.to_string(), b.to_string()));
            let avg_doa = (nodes[i].doa_normalized + nodes[j].doa_normalized) / 2.0;
            edges.push(CollaborationEdge {
                source: nodes[i].id.clone(),
                target: nodes[j].id.clone(),
                spof_score: clamp(avg_doa + (affinity - 0.5) * 0.35, 0.0, 1.0),
                collaboration_strength: clamp(
                    0.15 + noise((seed + PAIR_STRENGTH_OFFSET) as f64) * 0.85,
                    0.15,
                    1.0,
                ),
            });
        }
    }

    tracing::debug!(
        context = context_id,
        kind = kind.key(),
        range = range.key(),
        nodes = n,
        edges = edges.len(),
        "generated collaboration module"
    );

    Some(CollaborationModule {
        id: format!("{}-collaboration", slugify(context_id)),
        name: format!("{} collaboration network", context_id),
        nodes,
        edges,
    })
}

fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Per-pair seed over the canonically ordered ids, shared by backbone and
/// supplementary draws so edge values are orientation-independent.
fn pair_seed(a: &str, b: &str, module_seed: i64) -> i64 {
    hash_string(&format!("{}:{}", a, b)) + module_seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_roster_yields_no_graph() {
        assert!(generate("team-42", &[], ContextKind::Team, TimeRange::Max).is_none());
    }

    #[test]
    fn generation_is_byte_identical_across_calls() {
        let names = roster(&["Ada", "Grace", "Linus", "Margaret"]);
        let a = generate("team-42", &names, ContextKind::Team, TimeRange::ThreeMonths).unwrap();
        let b = generate("team-42", &names, ContextKind::Team, TimeRange::ThreeMonths).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn different_contexts_diverge() {
        let names = roster(&["Ada", "Grace", "Linus"]);
        let a = generate("team-42", &names, ContextKind::Team, TimeRange::Max).unwrap();
        let b = generate("team-43", &names, ContextKind::Team, TimeRange::Max).unwrap();
        assert_ne!(a.nodes[0].doa_normalized, b.nodes[0].doa_normalized);

        let c = generate("team-42", &names, ContextKind::Repo, TimeRange::Max).unwrap();
        assert_ne!(a.nodes[0].doa_normalized, c.nodes[0].doa_normalized);
    }

    #[test]
    fn ring_backbone_gives_every_node_degree_two_or_more() {
        let names = roster(&["Ada", "Grace", "Linus", "Margaret", "Alan"]);
        let module = generate("team-1", &names, ContextKind::Team, TimeRange::Max).unwrap();
        for node in &module.nodes {
            let degree = module.edges.iter().filter(|e| e.touches(&node.id)).count();
            assert!(degree >= 2, "{} has degree {}", node.id, degree);
        }
    }

    #[test]
    fn ring_spof_scores_clear_the_connectivity_floor() {
        let names = roster(&["Ada", "Grace", "Linus", "Margaret"]);
        let module = generate("repo-7", &names, ContextKind::Repo, TimeRange::OneMonth).unwrap();
        // The first n edges are the backbone (n > 2 roster, no dedup hit).
        for edge in module.edges.iter().take(names.len()) {
            assert!(edge.spof_score >= 0.7, "backbone spof {}", edge.spof_score);
        }
    }

    #[test]
    fn no_self_loops_or_duplicate_pairs() {
        let names = roster(&[
            "Ada", "Grace", "Linus", "Margaret", "Alan", "Barbara", "Dennis", "Radia",
        ]);
        for range in TimeRange::all() {
            let module = generate("team-9", &names, ContextKind::Team, range).unwrap();
            let mut pairs = HashSet::new();
            for edge in &module.edges {
                assert_ne!(edge.source, edge.target);
                assert!(pairs.insert((edge.pair().0.to_string(), edge.pair().1.to_string())));
            }
        }
    }

    #[test]
    fn value_ranges_hold() {
        let names = roster(&["Ada", "Grace", "Linus", "Margaret", "Alan", "Barbara"]);
        let module = generate("team-5", &names, ContextKind::Team, TimeRange::OneYear).unwrap();
        for node in &module.nodes {
            assert!((0.05..=1.0).contains(&node.doa_normalized));
        }
        for edge in &module.edges {
            assert!((0.0..=1.0).contains(&edge.spof_score));
            assert!((0.15..=1.0).contains(&edge.collaboration_strength));
        }
    }

    #[test]
    fn duplicate_names_collapse_to_one_node() {
        let names = roster(&["Ada", "ada", "Grace"]);
        let module = generate("team-2", &names, ContextKind::Team, TimeRange::Max).unwrap();
        assert_eq!(module.nodes.len(), 2);
        assert_eq!(module.nodes[0].label, "Ada");
    }

    #[test]
    fn single_node_has_no_edges() {
        let module =
            generate("team-solo", &roster(&["Ada"]), ContextKind::Team, TimeRange::Max).unwrap();
        assert_eq!(module.nodes.len(), 1);
        assert!(module.edges.is_empty());
    }

    #[test]
    fn two_nodes_share_exactly_one_edge_from_the_ring() {
        let module = generate(
            "team-pair",
            &roster(&["Ada", "Grace"]),
            ContextKind::Team,
            TimeRange::Max,
        )
        .unwrap();
        assert_eq!(module.edges.len(), 1);
        assert!(module.edges[0].spof_score >= 0.7);
    }

    #[test]
    fn shorter_windows_are_no_denser_than_full_history() {
        let names = roster(&[
            "Ada Lovelace",
            "Grace Hopper",
            "Linus Torvalds",
            "Margaret Hamilton",
            "Alan Turing",
            "Barbara Liskov",
            "Dennis Ritchie",
            "Radia Perlman",
            "Ken Thompson",
            "Frances Allen",
            "Edsger Dijkstra",
            "Katherine Johnson",
            "Donald Knuth",
            "Hedy Lamarr",
        ]);
        let short = generate("team-8", &names, ContextKind::Team, TimeRange::OneMonth).unwrap();
        let full = generate("team-8", &names, ContextKind::Team, TimeRange::Max).unwrap();
        // Not guaranteed per-seed in general, but the cutoff spread (0.72 vs
        // 0.50) makes it hold for any realistic roster size.
        assert!(short.edges.len() <= full.edges.len());
    }

    #[test]
    fn node_order_preserves_input_order() {
        let names = roster(&["Linus", "Ada", "Grace"]);
        let module = generate("team-3", &names, ContextKind::Team, TimeRange::Max).unwrap();
        let ids: Vec<&str> = module.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["linus", "ada", "grace"]);
    }
}
