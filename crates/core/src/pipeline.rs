use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpangraphError};
use crate::graph::build_graph;
use crate::model::{DependencyGraph, ReducedSpan, Span};
use crate::reduce::reduce_spans;
use crate::source::{encode_json, read_spans, write_json, write_payload};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ReductionStats {
    pub input_spans: usize,
    pub output_spans: usize,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl ReductionStats {
    /// Size saved by reduction, as a percentage of the input, one decimal.
    pub fn reduction_percent(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        let saved = self.input_bytes as f64 - self.output_bytes as f64;
        (saved / self.input_bytes as f64 * 1000.0).round() / 10.0
    }
}

#[derive(Debug, Clone)]
pub struct ReduceOutcome {
    pub spans: Vec<ReducedSpan>,
    pub stats: ReductionStats,
}

pub fn reduce_file(input: &str, output: &Path, pretty: bool) -> Result<ReduceOutcome> {
    let batch = read_spans(input)?;
    tracing::info!(files = batch.files.len(), spans = batch.spans.len(), "reducing spans");

    let spans = reduce_spans(&batch.spans);
    let output_bytes = write_json(output, &spans, pretty)?;

    let stats = ReductionStats {
        input_spans: batch.spans.len(),
        output_spans: spans.len(),
        input_bytes: batch.bytes,
        output_bytes,
    };
    tracing::info!(
        output = %output.display(),
        reduction_percent = stats.reduction_percent(),
        "wrote reduced spans"
    );
    Ok(ReduceOutcome { spans, stats })
}

pub fn graph_file(input: &str, output: &Path, pretty: bool) -> Result<DependencyGraph> {
    let batch = read_spans(input)?;
    graph_spans(&batch.spans, output, pretty)
}

pub fn graph_spans(spans: &[Span], output: &Path, pretty: bool) -> Result<DependencyGraph> {
    let graph = build_graph(spans);
    write_json(output, &graph, pretty)?;
    tracing::info!(output = %output.display(), "wrote dependency graph");
    Ok(graph)
}

/// Reduces `input` to `reduced`, then builds the graph from the reduced spans.
///
/// Both artifacts are encoded before either is written. If the graph cannot be
/// written, the reduced artifact is removed again.
pub fn run_all(
    input: &str,
    reduced: &Path,
    output: &Path,
    pretty: bool,
) -> Result<(ReductionStats, DependencyGraph)> {
    let batch = read_spans(input)?;
    tracing::info!(files = batch.files.len(), spans = batch.spans.len(), "reducing spans");

    let reduced_spans = reduce_spans(&batch.spans);
    let reduced_payload = encode_json(&reduced_spans, pretty)?;
    let stats = ReductionStats {
        input_spans: batch.spans.len(),
        output_spans: reduced_spans.len(),
        input_bytes: batch.bytes,
        output_bytes: reduced_payload.len() as u64,
    };

    let spans: Vec<Span> = reduced_spans.into_iter().map(Span::from).collect();
    let graph = build_graph(&spans);
    let graph_payload = encode_json(&graph, pretty)?;

    write_payload(reduced, &reduced_payload)?;
    if let Err(err) = write_payload(output, &graph_payload) {
        if let Err(cleanup) = std::fs::remove_file(reduced) {
            tracing::warn!(
                path = %reduced.display(),
                error = %cleanup,
                "failed removing reduced spans"
            );
        }
        return Err(err);
    }

    tracing::info!(
        reduced = %reduced.display(),
        output = %output.display(),
        reduction_percent = stats.reduction_percent(),
        "wrote reduced spans and dependency graph"
    );
    Ok((stats, graph))
}

pub fn load_graph(path: &Path) -> Result<DependencyGraph> {
    let raw = std::fs::read(path).map_err(|e| {
        SpangraphError::InputUnavailable(format!("failed reading {}: {e}", path.display()))
    })?;
    serde_json::from_slice(&raw).map_err(|e| {
        SpangraphError::MalformedInput(format!("{} is not a dependency graph: {e}", path.display()))
    })
}
