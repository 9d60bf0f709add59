//! Skein CLI - generate collaboration-network snapshots as JSON.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use skein::config::SkeinConfig;
use skein::generate::{ContextKind, TimeRange};
use skein::layout::LayoutStrategy;
use skein::model::sample_roster;
use skein::{run_pipeline, PipelineOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skein")]
#[command(about = "Deterministic collaboration networks for engineering analytics")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "skein.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the full pipeline for one context and write a JSON report
    Generate {
        /// Context identifier, e.g. "team-42" or "acme/platform"
        context_id: String,

        /// Comma-separated participant names; a sample roster is used if omitted
        #[arg(short, long)]
        names: Option<String>,

        /// Context kind
        #[arg(short, long, value_enum, default_value = "team")]
        kind: ContextKindArg,

        /// Time range
        #[arg(short, long, value_enum)]
        range: Option<TimeRangeArg>,

        /// SPOF-score threshold for edge pruning
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Keep isolated nodes instead of dropping them
        #[arg(long)]
        keep_isolated: bool,

        /// Layout strategy
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for the sample roster
        #[arg(short = 'S', long)]
        roster_seed: Option<u64>,

        /// Size of the sample roster
        #[arg(long)]
        roster_size: Option<usize>,
    },

    /// Generate every strategy and time range for comparison
    Showcase {
        /// Context identifier
        #[arg(default_value = "acme-platform")]
        context_id: String,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Seed for consistent rosters
        #[arg(short = 'S', long, default_value = "42")]
        seed: u64,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,
    },
}

#[derive(Clone, ValueEnum, Debug)]
enum ContextKindArg {
    Team,
    Repo,
}

impl ContextKindArg {
    fn to_kind(&self) -> ContextKind {
        match self {
            ContextKindArg::Team => ContextKind::Team,
            ContextKindArg::Repo => ContextKind::Repo,
        }
    }
}

#[derive(Clone, ValueEnum, Debug)]
enum TimeRangeArg {
    /// Last month
    #[value(name = "1m")]
    OneMonth,
    /// Last three months
    #[value(name = "3m")]
    ThreeMonths,
    /// Last year
    #[value(name = "1y")]
    OneYear,
    /// Full history
    Max,
}

impl TimeRangeArg {
    fn to_range(&self) -> TimeRange {
        match self {
            TimeRangeArg::OneMonth => TimeRange::OneMonth,
            TimeRangeArg::ThreeMonths => TimeRange::ThreeMonths,
            TimeRangeArg::OneYear => TimeRange::OneYear,
            TimeRangeArg::Max => TimeRange::Max,
        }
    }
}

#[derive(Clone, ValueEnum, Debug)]
enum StrategyArg {
    /// Concentric shells seeded by degree ranking
    Shell,
    /// Free force simulation from canvas center
    Free,
}

impl StrategyArg {
    fn to_strategy(&self) -> LayoutStrategy {
        match self {
            StrategyArg::Shell => LayoutStrategy::Shell,
            StrategyArg::Free => LayoutStrategy::Free,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skein=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = SkeinConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Generate {
            context_id,
            names,
            kind,
            range,
            threshold,
            keep_isolated,
            strategy,
            width,
            height,
            output,
            roster_seed,
            roster_size,
        } => {
            let roster: Vec<String> = match names {
                Some(names) => names
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                None => sample_roster(
                    roster_seed.unwrap_or(config.roster.seed),
                    roster_size.unwrap_or(config.roster.size),
                ),
            };

            let range = range.map(|r| r.to_range()).unwrap_or_else(|| {
                TimeRange::from_key(&config.pipeline.time_range).unwrap_or(TimeRange::Max)
            });
            let strategy = strategy.map(|s| s.to_strategy()).unwrap_or_else(|| {
                LayoutStrategy::from_key(&config.pipeline.strategy).unwrap_or(LayoutStrategy::Shell)
            });

            let options = PipelineOptions {
                threshold: threshold.unwrap_or(config.pipeline.threshold),
                drop_isolated: !keep_isolated && config.pipeline.drop_isolated,
                width: width.unwrap_or(config.output.width),
                height: height.unwrap_or(config.output.height),
                strategy,
            };

            println!(
                "Generating {} ({}, {}) with {} participants...",
                context_id,
                kind.to_kind(),
                range,
                roster.len()
            );

            let Some(report) =
                run_pipeline(&context_id, &roster, kind.to_kind(), range, &options)
            else {
                println!("No participants supplied, nothing to generate.");
                return Ok(());
            };

            println!(
                "  {} nodes, {} edges; {} of {} visible at threshold {:.2}",
                report.module.nodes.len(),
                report.module.edges.len(),
                report.reduced.nodes.len(),
                report.reduced.total_nodes,
                options.threshold
            );
            for insight in &report.insights {
                println!("  - {}", insight.text);
            }

            let output_dir = PathBuf::from(&config.output.directory);
            fs::create_dir_all(&output_dir)?;

            let output_path = output.unwrap_or_else(|| {
                output_dir.join(format!(
                    "{}_{}_{}.json",
                    report.module.id,
                    range,
                    options.strategy.key()
                ))
            });

            fs::write(&output_path, serde_json::to_string_pretty(&report)?)?;
            println!("Saved to {}", output_path.display());
        }

        Commands::Showcase {
            context_id,
            output_dir,
            seed,
            width,
            height,
        } => {
            let output_dir = output_dir
                .unwrap_or_else(|| PathBuf::from(&config.output.directory).join("showcase"));
            fs::create_dir_all(&output_dir)?;

            let roster = sample_roster(seed, config.roster.size);
            println!(
                "Generating showcase for {} with seed {} ({} participants)...",
                context_id,
                seed,
                roster.len()
            );

            for strategy in LayoutStrategy::all() {
                for range in TimeRange::all() {
                    let options = PipelineOptions {
                        threshold: config.pipeline.threshold,
                        drop_isolated: config.pipeline.drop_isolated,
                        width: width.unwrap_or(config.output.width),
                        height: height.unwrap_or(config.output.height),
                        strategy,
                    };

                    let Some(report) =
                        run_pipeline(&context_id, &roster, ContextKind::Team, range, &options)
                    else {
                        continue;
                    };

                    let filename = format!("{}_{}.json", range, strategy.key());
                    let path = output_dir.join(&filename);
                    fs::write(&path, serde_json::to_string_pretty(&report)?)?;
                    println!(
                        "  Created {} ({} nodes, {} edges)",
                        filename,
                        report.layout.nodes.len(),
                        report.layout.edges.len()
                    );
                }
            }

            println!("Done! Showcase saved to {}", output_dir.display());
        }
    }

    Ok(())
}
