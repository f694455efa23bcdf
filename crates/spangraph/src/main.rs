mod output;
mod telemetry;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use spangraph_core::config::Config;
use spangraph_core::model::DependencyGraph;
use spangraph_core::pipeline::{self, ReductionStats};

use crate::output::{print_graph_human, print_reduction_human};
use crate::telemetry::init_cli_tracing;

#[derive(Parser, Debug)]
#[command(name = "spangraph")]
#[command(about = "Reduce span exports and build service dependency graphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    json: bool,

    #[arg(long, global = true, help = "Write artifacts as compact JSON")]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Strip spans down to identity, timing and HTTP attributes")]
    Reduce {
        #[arg(long, help = "Span file or glob pattern")]
        input: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    #[command(about = "Build the service dependency graph from spans")]
    Graph {
        #[arg(long, help = "Span file or glob pattern (defaults to the reduced file)")]
        input: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    #[command(about = "Reduce spans, then build the graph from the reduced file")]
    Run {
        #[arg(long, help = "Span file or glob pattern")]
        input: Option<String>,
        #[arg(long)]
        reduced: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    #[command(about = "Print a previously written dependency graph")]
    Show { path: Option<PathBuf> },
}

#[derive(Debug, Serialize)]
struct ReduceReport<'a> {
    output: &'a Path,
    #[serde(flatten)]
    stats: ReductionStats,
    reduction_percent: f64,
}

impl<'a> ReduceReport<'a> {
    fn new(output: &'a Path, stats: ReductionStats) -> Self {
        Self {
            output,
            stats,
            reduction_percent: stats.reduction_percent(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    reduction: ReduceReport<'a>,
    graph: &'a DependencyGraph,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_tracing(cli.json);

    let mut cfg = Config::load().context("load config")?;
    if cli.compact {
        cfg.pretty = false;
    }
    tracing::debug!(?cfg, "loaded config");

    match cli.command {
        Commands::Reduce { input, output } => {
            let input = input.unwrap_or(cfg.trace_input);
            let output = output.unwrap_or(cfg.reduced_path);
            let outcome = pipeline::reduce_file(&input, &output, cfg.pretty)
                .with_context(|| format!("reduce spans from {input}"))?;

            if cli.json {
                let report = ReduceReport::new(&output, outcome.stats);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_reduction_human(&outcome.stats, &output);
            }
            Ok(())
        }
        Commands::Graph { input, output } => {
            let input = input.unwrap_or_else(|| cfg.reduced_path.display().to_string());
            let output = output.unwrap_or(cfg.graph_path);
            let graph = pipeline::graph_file(&input, &output, cfg.pretty)
                .with_context(|| format!("build dependency graph from {input}"))?;

            print_graph(&graph, cli.json)?;
            if !cli.json {
                println!("\nOutput saved to: {}", output.display());
            }
            Ok(())
        }
        Commands::Run {
            input,
            reduced,
            output,
        } => {
            let input = input.unwrap_or(cfg.trace_input);
            let reduced = reduced.unwrap_or(cfg.reduced_path);
            let output = output.unwrap_or(cfg.graph_path);
            let (stats, graph) = pipeline::run_all(&input, &reduced, &output, cfg.pretty)
                .with_context(|| format!("run pipeline on {input}"))?;

            if cli.json {
                let report = RunReport {
                    reduction: ReduceReport::new(&reduced, stats),
                    graph: &graph,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_reduction_human(&stats, &reduced);
                println!();
                print_graph_human(&graph);
                println!("\nOutput saved to: {}", output.display());
            }
            Ok(())
        }
        Commands::Show { path } => {
            let path = path.unwrap_or(cfg.graph_path);
            let graph = pipeline::load_graph(&path)
                .with_context(|| format!("load graph from {}", path.display()))?;
            print_graph(&graph, cli.json)
        }
    }
}

fn print_graph(graph: &DependencyGraph, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(graph)?);
        return Ok(());
    }
    print_graph_human(graph);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_with_paths() {
        let cli = Cli::try_parse_from([
            "spangraph",
            "--json",
            "run",
            "--input",
            "traces/*.json",
            "--reduced",
            "out/reduced.json",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(!cli.compact);
        match cli.command {
            Commands::Run {
                input,
                reduced,
                output,
            } => {
                assert_eq!(input.as_deref(), Some("traces/*.json"));
                assert_eq!(reduced, Some(PathBuf::from("out/reduced.json")));
                assert_eq!(output, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["spangraph", "show", "graph.json", "--compact"]).unwrap();
        assert!(cli.compact);
        assert!(matches!(
            cli.command,
            Commands::Show { path: Some(ref p) } if p == Path::new("graph.json")
        ));
    }

    #[test]
    fn reduce_report_flattens_stats() {
        let stats = ReductionStats {
            input_spans: 2,
            output_spans: 2,
            input_bytes: 200,
            output_bytes: 50,
        };
        let value = serde_json::to_value(ReduceReport::new(Path::new("r.json"), stats)).unwrap();
        assert_eq!(value["output"], "r.json");
        assert_eq!(value["input_spans"], 2);
        assert_eq!(value["reduction_percent"], 75.0);
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["spangraph", "serve"]).is_err());
    }
}
