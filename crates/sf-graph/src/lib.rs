//! sf-graph: Audio Graph Host Boundary
//!
//! The bridge never talks to an audio backend directly; it wires nodes
//! through the [`AudioGraphHost`] trait. A real host adapts a platform
//! audio context (one per process, created lazily by the host and passed in
//! explicitly as a [`SharedGraph`]). The in-memory [`OfflineGraph`] records
//! the same wiring for tests, examples, and headless hosts.

mod error;
mod host;
mod media;
mod node;
mod offline;

pub use error::{GraphError, GraphResult};
pub use host::{AudioGraphHost, SharedGraph, shared};
pub use media::MediaElement;
pub use node::{NodeId, NodeKind};
pub use offline::{Connection, OfflineGraph};
