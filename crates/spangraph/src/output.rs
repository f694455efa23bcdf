use std::io::IsTerminal;
use std::path::Path;

use owo_colors::OwoColorize;
use spangraph_core::model::DependencyGraph;
use spangraph_core::pipeline::ReductionStats;

pub fn print_reduction_human(v: &ReductionStats, output: &Path) {
    println!("spans: {} -> {}", v.input_spans, v.output_spans);
    println!(
        "File size reduction: {:.1}% ({} -> {} bytes)",
        v.reduction_percent(),
        v.input_bytes,
        v.output_bytes
    );
    println!("output={}", output.display());
}

pub fn print_graph_human(v: &DependencyGraph) {
    let color = std::io::stdout().is_terminal();

    println!("=== Service Dependency Graph ===");
    println!("Total Services: {}", v.summary.total_services);
    println!("Total Service Dependencies: {}", v.summary.total_edges);
    println!("Total Cross-Service Calls: {}", v.summary.total_calls);

    println!();
    println!("=== Services ===");
    for node in &v.nodes {
        println!("- {}", paint_service(&node.service, color));
    }

    println!();
    println!("=== Service Dependencies ===");
    for edge in &v.edges {
        println!(
            "{} -> {} ({}) [{} calls]",
            paint_service(&edge.source, color),
            paint_service(&edge.target, color),
            edge.method,
            edge.call_count
        );
    }
}

fn paint_service(name: &str, color: bool) -> String {
    if color {
        name.cyan().to_string()
    } else {
        name.to_string()
    }
}
