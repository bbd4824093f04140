//! Error types for bridge setup

use thiserror::Error;

use sf_core::ConfigError;
use sf_graph::GraphError;

use crate::renderer::RendererError;

/// Bridge setup error types
///
/// Everything here is synchronous and fail-fast; failures of the
/// renderer's asynchronous initialization surface as
/// [`BridgeEvent::Error`](crate::BridgeEvent) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// Caller options did not overlay into a valid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Graph host refused a node operation
    #[error("Audio graph error: {0}")]
    Graph(#[from] GraphError),

    /// Renderer factory failed to construct a renderer
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
