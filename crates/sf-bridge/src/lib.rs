//! sf-bridge: Media to Ambisonic Renderer Bridge
//!
//! Connects a media element's multichannel audio to an external ambisonic
//! renderer and keeps the renderer's rotation matrix synchronized with a
//! 3D camera:
//!
//! - [`SoundFieldBridge`] owns the setup lifecycle: option overlay, the
//!   Safari channel reorder, renderer selection by ambisonic order, gain
//!   staging, and the deferred graph wiring that completes only once the
//!   renderer's asynchronous initialization settles (re-dispatched as a
//!   single [`BridgeEvent`]).
//! - [`OrientationSync`] reads a camera's world transform once per frame,
//!   extracts the 3x3 rotation block, and pushes it into the bridge.
//!
//! The renderer itself (HRTF convolution, spherical-harmonic math) lives
//! behind the [`AmbisonicRenderer`] / [`RendererFactory`] traits;
//! [`NullRenderer`] is the bundled headless implementation.

mod bridge;
mod error;
mod event;
mod null;
mod orientation;
mod renderer;

pub use bridge::{LifecycleState, SharedBridge, SoundFieldBridge};
pub use error::{BridgeError, BridgeResult};
pub use event::BridgeEvent;
pub use null::{DeferredInit, NullRenderer, NullRendererFactory, RendererProbe};
pub use orientation::{HeadCamera, OrientationSync};
pub use renderer::{AmbisonicRenderer, InitHandle, RendererError, RendererFactory, RenderingMode};
