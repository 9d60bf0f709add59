//! Skein - deterministic collaboration networks for engineering analytics.
//!
//! Builds a weighted collaboration graph from a context identifier and a
//! participant roster, prunes it against a risk threshold, extracts
//! human-readable insights, and positions it with a force-directed layout.
//! Every stage is a pure function of its inputs: the same identifier always
//! reproduces the same network, bit for bit, which is what lets the
//! dashboard regenerate data on every render and still match previous
//! renders exactly.

pub mod config;
pub mod generate;
pub mod insights;
pub mod layout;
pub mod model;
pub mod noise;
pub mod reduce;

pub use config::SkeinConfig;
pub use generate::{generate, ContextKind, RangeConfig, TimeRange};
pub use insights::{insights, Insight};
pub use layout::{layout, LayoutStrategy};
pub use model::{CollaborationModule, LaidOutGraph, ReducedGraph};
pub use reduce::reduce;

use serde::{Deserialize, Serialize};

/// Knobs for one full pipeline run, downstream of generation.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub threshold: f64,
    pub drop_isolated: bool,
    pub width: u32,
    pub height: u32,
    pub strategy: LayoutStrategy,
}

/// Everything one pipeline run produces, ready to serialize for a
/// rendering consumer or a snapshot test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub module: CollaborationModule,
    pub reduced: ReducedGraph,
    pub insights: Vec<Insight>,
    pub layout: LaidOutGraph,
}

/// Run generate -> reduce -> { insights, layout } for one context.
///
/// Returns `None` for an empty roster, mirroring the generator.
pub fn run_pipeline(
    context_id: &str,
    names: &[String],
    kind: ContextKind,
    range: TimeRange,
    options: &PipelineOptions,
) -> Option<PipelineReport> {
    let module = generate(context_id, names, kind, range)?;
    let reduced = reduce(&module, options.threshold, options.drop_isolated);
    let insights = insights(&module, &reduced, options.threshold);
    let layout = layout(&reduced, options.width, options.height, options.strategy);

    Some(PipelineReport {
        module,
        reduced,
        insights,
        layout,
    })
}
