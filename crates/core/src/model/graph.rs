use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceNode {
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
    /// Comma-joined `all_methods`, for display.
    pub method: String,
    /// Comma-joined `all_ports`, for display.
    pub port: String,
    pub url: String,
    pub call_count: u64,
    pub all_methods: Vec<String>,
    pub all_ports: Vec<String>,
    pub example_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub total_services: usize,
    pub total_edges: usize,
    pub total_calls: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DependencyGraph {
    pub nodes: Vec<ServiceNode>,
    pub edges: Vec<DependencyEdge>,
    pub summary: GraphSummary,
}

impl DependencyGraph {
    pub fn edge(&self, source: &str, target: &str) -> Option<&DependencyEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    pub fn has_service(&self, service: &str) -> bool {
        self.nodes.iter().any(|n| n.service == service)
    }
}
