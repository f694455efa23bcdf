pub mod attrs;
pub mod config;
pub mod error;
pub mod graph;
pub mod host;
pub mod model;
pub mod pipeline;
pub mod reduce;
pub mod source;

pub use error::{Result, SpangraphError};
pub use graph::{GraphBuilder, build_graph};
pub use reduce::reduce_spans;
