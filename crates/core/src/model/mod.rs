pub mod graph;
pub mod span;

pub use graph::{DependencyEdge, DependencyGraph, GraphSummary, ServiceNode};
pub use span::{ReducedSpan, Span};
