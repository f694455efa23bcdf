use indexmap::{IndexMap, IndexSet};

use crate::attrs::{
    HTTP_REQUEST_METHOD, SERVER_ADDRESS, SERVER_PORT, UNKNOWN_METHOD, URL_FULL,
    is_database_address,
};
use crate::host::host_from_url;
use crate::model::{DependencyEdge, DependencyGraph, GraphSummary, ServiceNode, Span};

const MAX_EXAMPLE_URLS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `url.full` attribute; not an outgoing HTTP call.
    NotHttpClient,
    /// Neither `server.address` nor the URL yields a host.
    NoCallee,
    NoCaller,
    SelfCall,
    Database,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotHttpClient => "not_http_client",
            Self::NoCallee => "no_callee",
            Self::NoCaller => "no_caller",
            Self::SelfCall => "self_call",
            Self::Database => "database",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    Edge,
    Skipped(SkipReason),
}

#[derive(Debug, Default)]
struct EdgeAccumulator {
    methods: IndexSet<String>,
    ports: IndexSet<String>,
    call_count: u64,
    example_urls: Vec<String>,
}

impl EdgeAccumulator {
    fn record(&mut self, call: HttpCall) {
        self.methods.insert(call.method);
        if let Some(port) = call.port {
            self.ports.insert(port);
        }
        self.call_count += 1;
        if self.example_urls.len() < MAX_EXAMPLE_URLS && !self.example_urls.contains(&call.url) {
            self.example_urls.push(call.url);
        }
    }
}

struct HttpCall {
    url: String,
    method: String,
    port: Option<String>,
}

/// Accumulates service nodes and caller→callee edges over a span sequence.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    services: IndexSet<String>,
    edges: IndexMap<(String, String), EdgeAccumulator>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, span: &Span) -> Contribution {
        let caller = span.service();
        if let Some(service) = &caller {
            self.services.insert(service.clone());
        }

        let Some(url) = span.attr_text(URL_FULL) else {
            return Contribution::Skipped(SkipReason::NotHttpClient);
        };

        let (callee, from_url) = match span.attr_text(SERVER_ADDRESS) {
            Some(address) => (address, false),
            None => match host_from_url(&url) {
                Some(host) => (host, true),
                None => return Contribution::Skipped(SkipReason::NoCallee),
            },
        };

        let Some(caller) = caller else {
            return Contribution::Skipped(SkipReason::NoCaller);
        };

        // URL hosts come back lowercased from the parser; `server.address` is verbatim.
        let self_call = if from_url {
            caller.eq_ignore_ascii_case(&callee)
        } else {
            caller == callee
        };
        if self_call {
            return Contribution::Skipped(SkipReason::SelfCall);
        }
        if is_database_address(&callee) {
            return Contribution::Skipped(SkipReason::Database);
        }

        let call = HttpCall {
            url,
            method: span
                .attr_text(HTTP_REQUEST_METHOD)
                .unwrap_or_else(|| UNKNOWN_METHOD.to_string()),
            port: span.attr_text(SERVER_PORT),
        };

        self.services.insert(callee.clone());
        self.edges
            .entry((caller, callee))
            .or_default()
            .record(call);
        Contribution::Edge
    }

    pub fn finish(self) -> DependencyGraph {
        let nodes: Vec<ServiceNode> = self
            .services
            .into_iter()
            .map(|service| ServiceNode { service })
            .collect();

        let edges: Vec<DependencyEdge> = self
            .edges
            .into_iter()
            .map(|((source, target), acc)| {
                let all_methods: Vec<String> = acc.methods.into_iter().collect();
                let all_ports: Vec<String> = acc.ports.into_iter().collect();
                DependencyEdge {
                    source,
                    target,
                    method: all_methods.join(","),
                    port: all_ports.join(","),
                    url: acc.example_urls.first().cloned().unwrap_or_default(),
                    call_count: acc.call_count,
                    all_methods,
                    all_ports,
                    example_urls: acc.example_urls,
                }
            })
            .collect();

        let summary = GraphSummary {
            total_services: nodes.len(),
            total_edges: edges.len(),
            total_calls: edges.iter().map(|e| e.call_count).sum(),
        };

        DependencyGraph {
            nodes,
            edges,
            summary,
        }
    }
}

pub fn build_graph(spans: &[Span]) -> DependencyGraph {
    let mut builder = GraphBuilder::new();
    for (index, span) in spans.iter().enumerate() {
        if let Contribution::Skipped(reason) = builder.observe(span)
            && reason != SkipReason::NotHttpClient
        {
            tracing::debug!(
                index,
                service = span.service().as_deref().unwrap_or("-"),
                reason = reason.as_str(),
                "span skipped for edges"
            );
        }
    }

    let graph = builder.finish();
    tracing::info!(
        spans = spans.len(),
        services = graph.summary.total_services,
        edges = graph.summary.total_edges,
        calls = graph.summary.total_calls,
        "built service dependency graph"
    );
    graph
}
