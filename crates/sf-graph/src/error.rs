//! Error types for graph wiring

use thiserror::Error;

/// Graph wiring error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node id is not present in the graph
    #[error("Unknown node id: {0}")]
    UnknownNode(u32),

    /// Gain was set on a node that has no gain parameter
    #[error("Node {0} is not a gain node")]
    NotAGainNode(u32),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
