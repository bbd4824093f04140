//! Bridge lifecycle events

use crate::renderer::RendererError;

/// Terminal outcome of the bridge's asynchronous setup.
///
/// Re-dispatched from the renderer's initialization result; a bridge emits
/// at most one of these over its lifetime. `Error` is terminal: the bridge
/// does not retry, callers reconstruct it to try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Renderer initialized and the graph is fully wired through
    Ready,
    /// Renderer initialization failed; cause forwarded verbatim
    Error(RendererError),
}

impl BridgeEvent {
    /// Wire name for host event buses
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeEvent::Ready => "soundfieldready",
            BridgeEvent::Error(_) => "soundfielderror",
        }
    }
}
