//! Audio graph host trait

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::GraphResult;
use crate::media::MediaElement;
use crate::node::NodeId;

/// Node wiring surface of a platform audio context.
///
/// Implementations adapt whatever audio backend the host runs on. Graph
/// mutations are serialized by the host's audio subsystem; this trait adds
/// no locking of its own beyond the [`SharedGraph`] mutex.
pub trait AudioGraphHost: Send {
    /// Create a source node bound to a media element's audio tracks
    fn create_media_element_source(&mut self, element: &MediaElement) -> GraphResult<NodeId>;

    /// Create a gain node (unity gain until set)
    fn create_gain(&mut self) -> GraphResult<NodeId>;

    /// Set a gain node's scalar gain
    fn set_gain(&mut self, node: NodeId, gain: f32) -> GraphResult<()>;

    /// Connect one node's output into another's input
    fn connect(&mut self, from: NodeId, to: NodeId) -> GraphResult<()>;

    /// The terminal output node
    fn destination(&self) -> NodeId;

    /// Context sample rate in Hz
    fn sample_rate(&self) -> f64;
}

/// Process-wide audio context handle.
///
/// The context is a shared singleton owned by the host (created lazily on
/// first use, torn down with the process); it is injected explicitly rather
/// than looked up ambiently, so several independent consumers can wire
/// nodes against the same context.
pub type SharedGraph = Arc<Mutex<dyn AudioGraphHost>>;

/// Wrap a host into the shared handle form
pub fn shared<G: AudioGraphHost + 'static>(graph: G) -> SharedGraph {
    Arc::new(Mutex::new(graph))
}
