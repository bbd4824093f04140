//! Ambisonic renderer contract
//!
//! The decode/render math is owned by an external renderer library; this
//! module pins down the surface the bridge consumes. Renderer
//! initialization can take real wall-clock time (HRTF impulse responses
//! may load over the network), so it settles through a single-shot
//! channel rather than blocking the caller.

use std::fmt;

use crossbeam_channel::Receiver;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sf_core::RendererConfig;
use sf_graph::{NodeId, SharedGraph};

/// Failure reported by the renderer, forwarded verbatim.
///
/// The bridge does not distinguish sub-causes (network failure, unsupported
/// stream layout, ...); whatever the renderer reports is what listeners see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RendererError {
    message: String,
}

impl RendererError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Single-shot completion handle for renderer initialization.
///
/// Yields exactly one `Ok(())` or `Err(cause)`; a disconnected handle is
/// treated as failure. There is no cancellation: once started, the
/// initialization runs to completion or failure.
pub type InitHandle = Receiver<Result<(), RendererError>>;

/// Renderer output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderingMode {
    /// Full spatial decode (default)
    #[default]
    Ambisonic,
    /// Pass the input through undecoded
    Bypass,
    /// Mute the renderer output
    None,
}

impl RenderingMode {
    /// Wire string understood by renderer implementations
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderingMode::Ambisonic => "ambisonic",
            RenderingMode::Bypass => "bypass",
            RenderingMode::None => "none",
        }
    }
}

impl fmt::Display for RenderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface of an external ambisonic renderer instance.
///
/// The renderer allocates its own endpoint nodes on the shared graph; the
/// bridge wires media into [`input`](Self::input) and
/// [`output`](Self::output) onward, but never owns what sits between.
pub trait AmbisonicRenderer: Send {
    /// Begin asynchronous initialization (HRTF asset loading and friends)
    fn initialize(&mut self) -> InitHandle;

    /// Node the media source feeds into
    fn input(&self) -> NodeId;

    /// Node carrying the rendered output
    fn output(&self) -> NodeId;

    /// Replace the listener rotation. Called per frame; the renderer owns
    /// correctness of the matrix, no validation happens upstream.
    fn set_rotation_matrix(&mut self, rotation: &Matrix3<f32>);

    /// Switch the output mode
    fn set_rendering_mode(&mut self, mode: RenderingMode);
}

/// Constructs renderers sized to the requested ambisonic order
pub trait RendererFactory {
    /// First-order (4 channel) renderer
    fn create_foa(
        &self,
        graph: &SharedGraph,
        config: &RendererConfig,
    ) -> Result<Box<dyn AmbisonicRenderer>, RendererError>;

    /// Higher-order (9 or 16 channel) renderer
    fn create_hoa(
        &self,
        graph: &SharedGraph,
        config: &RendererConfig,
    ) -> Result<Box<dyn AmbisonicRenderer>, RendererError>;
}
