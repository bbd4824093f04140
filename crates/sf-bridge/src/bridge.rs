//! Audio setup adapter
//!
//! One canonical bridge type owns the whole setup lifecycle: build the
//! effective configuration, apply the Safari channel reorder, pick the
//! renderer flavor for the requested ambisonic order, stage the gain, and
//! finish the graph wiring only after the renderer's asynchronous
//! initialization settles.

use std::fmt;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use nalgebra::{Matrix3, Matrix4};
use parking_lot::Mutex;

use sf_core::{ChannelMap, HostCapabilities, RendererConfig, RendererOptions, rotation};
use sf_graph::{MediaElement, NodeId, SharedGraph};

use crate::error::BridgeResult;
use crate::event::BridgeEvent;
use crate::renderer::{AmbisonicRenderer, InitHandle, RendererError, RendererFactory, RenderingMode};

/// Where the bridge sits in its (at most) three-state lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Renderer initialization in flight; media not yet wired through
    Initializing,
    /// Fully wired, audio flows
    Ready,
    /// Initialization failed; graph left partially wired, no retry
    Failed,
}

/// Shared handle for callers that fan the bridge out (orientation sync,
/// UI thread, host event pump)
pub type SharedBridge = Arc<Mutex<SoundFieldBridge>>;

/// Connects a media element's audio to an ambisonic renderer.
///
/// Construction wires everything that is safe to wire before the renderer
/// is live (renderer output into the post-gain stage) and starts the
/// renderer's initialization. The host then drives settling with
/// [`poll_init`](Self::poll_init) (per-frame loops) or
/// [`wait_init`](Self::wait_init) (blocking hosts); the media source and
/// the destination are connected only on success, so no unprocessed audio
/// leaks through a half-built renderer.
pub struct SoundFieldBridge {
    graph: SharedGraph,
    source: NodeId,
    master_gain: NodeId,
    renderer: Box<dyn AmbisonicRenderer>,
    config: RendererConfig,
    channel_map: ChannelMap,
    caps: HostCapabilities,
    pending_init: Option<InitHandle>,
    state: LifecycleState,
    listeners: Vec<Sender<BridgeEvent>>,
}

impl fmt::Debug for SoundFieldBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundFieldBridge")
            .field("source", &self.source)
            .field("master_gain", &self.master_gain)
            .field("renderer", &"<dyn AmbisonicRenderer>")
            .field("config", &self.config)
            .field("channel_map", &self.channel_map)
            .field("caps", &self.caps)
            .field("pending_init", &self.pending_init.is_some())
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SoundFieldBridge {
    /// Set up the bridge for a media element.
    ///
    /// Fails fast on configuration mistakes (out-of-range order, malformed
    /// channel map) before any renderer is constructed. Initialization
    /// failures are asynchronous and arrive as a
    /// [`BridgeEvent::Error`] instead.
    pub fn new(
        graph: SharedGraph,
        element: &MediaElement,
        options: &RendererOptions,
        caps: HostCapabilities,
        factory: &dyn RendererFactory,
    ) -> BridgeResult<Self> {
        let (source, master_gain) = {
            let mut host = graph.lock();
            let source = host.create_media_element_source(element)?;
            let gain = host.create_gain()?;
            (source, gain)
        };

        let mut config = RendererConfig::from_options(options)?;

        let mut channel_map = config.channel_map.clone();
        if caps.needs_channel_reorder {
            channel_map.reorder_for_safari();
            config.channel_map = channel_map.clone();
            log::debug!(
                "host decodes in Safari channel order, effective map {:?}",
                channel_map.as_slice()
            );
        }

        let mut renderer = if config.ambisonic_order.is_higher_order() {
            factory.create_hoa(&graph, &config)?
        } else {
            factory.create_foa(&graph, &config)?
        };

        {
            let mut host = graph.lock();
            host.set_gain(master_gain, config.post_gain)?;
            host.connect(renderer.output(), master_gain)?;
        }

        let pending_init = Some(renderer.initialize());
        log::info!(
            "bridge set up for '{}' (order {}), renderer initializing",
            element.label(),
            config.ambisonic_order.as_usize()
        );

        Ok(Self {
            graph,
            source,
            master_gain,
            renderer,
            config,
            channel_map,
            caps,
            pending_init,
            state: LifecycleState::Initializing,
            listeners: Vec::new(),
        })
    }

    /// Wrap into the shared handle form
    pub fn into_shared(self) -> SharedBridge {
        Arc::new(Mutex::new(self))
    }

    // === Initialization settling ===

    /// Subscribe to the lifecycle outcome.
    ///
    /// Each subscriber sees at most one event. Subscribing after the
    /// outcome was dispatched yields nothing; check
    /// [`state`](Self::state) first.
    pub fn subscribe(&mut self) -> Receiver<BridgeEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.listeners.push(tx);
        rx
    }

    /// Settle the renderer initialization if its outcome has arrived.
    ///
    /// Non-blocking; call once per host tick. Returns the event on the
    /// tick the outcome lands, `None` before that and on every call after.
    pub fn poll_init(&mut self) -> Option<BridgeEvent> {
        let handle = self.pending_init.as_ref()?;
        match handle.try_recv() {
            Ok(result) => {
                self.pending_init = None;
                Some(self.settle(result))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.pending_init = None;
                Some(self.settle(Err(RendererError::new(
                    "renderer dropped its initialization handle",
                ))))
            }
        }
    }

    /// Block until the renderer initialization settles.
    ///
    /// Returns `None` when the outcome was already delivered.
    pub fn wait_init(&mut self) -> Option<BridgeEvent> {
        let handle = self.pending_init.take()?;
        let result = handle
            .recv()
            .unwrap_or_else(|_| Err(RendererError::new("renderer dropped its initialization handle")));
        Some(self.settle(result))
    }

    fn settle(&mut self, result: Result<(), RendererError>) -> BridgeEvent {
        let event = match result {
            Ok(()) => match self.finish_wiring() {
                Ok(()) => {
                    self.state = LifecycleState::Ready;
                    log::info!("renderer ready, media wired through to destination");
                    BridgeEvent::Ready
                }
                Err(err) => {
                    self.state = LifecycleState::Failed;
                    log::warn!("renderer ready but graph wiring failed: {err}");
                    BridgeEvent::Error(RendererError::new(err.to_string()))
                }
            },
            Err(err) => {
                // No rollback: source and gain stay constructed, the
                // renderer connections are never made.
                self.state = LifecycleState::Failed;
                log::warn!("renderer initialization failed: {err}");
                BridgeEvent::Error(err)
            }
        };
        self.dispatch(&event);
        event
    }

    fn finish_wiring(&mut self) -> sf_graph::GraphResult<()> {
        let mut host = self.graph.lock();
        host.connect(self.source, self.renderer.input())?;
        let destination = host.destination();
        host.connect(self.master_gain, destination)?;
        Ok(())
    }

    fn dispatch(&mut self, event: &BridgeEvent) {
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // === Runtime controls ===

    /// Forward a listener rotation to the renderer, unvalidated
    pub fn set_rotation_matrix(&mut self, rotation: &Matrix3<f32>) {
        self.renderer.set_rotation_matrix(rotation);
    }

    /// Extract the rotation block from a 4x4 world transform and forward it
    pub fn set_rotation_from_transform(&mut self, transform: &Matrix4<f32>) {
        self.set_rotation_matrix(&rotation::rotation_part(transform));
    }

    /// Switch the renderer output mode (write-only)
    pub fn set_mode(&mut self, mode: RenderingMode) {
        self.renderer.set_rendering_mode(mode);
    }

    /// Adjust the post-decode gain stage
    pub fn set_post_gain(&mut self, gain: f32) -> BridgeResult<()> {
        self.graph.lock().set_gain(self.master_gain, gain)?;
        Ok(())
    }

    /// Current channel map
    pub fn channel_map(&self) -> &ChannelMap {
        &self.channel_map
    }

    /// Replace the channel map, re-applying the Safari reorder when the
    /// host needs it.
    ///
    /// The reorder is destructive and not self-inverse; set the map exactly
    /// once per desired logical order. The renderer reads the map at
    /// construction, so this only affects maps handed out afterwards.
    pub fn set_channel_map(&mut self, mut map: ChannelMap) {
        if self.caps.needs_channel_reorder {
            map.reorder_for_safari();
        }
        self.channel_map = map;
    }

    // === Introspection ===

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    /// Effective configuration the renderer was constructed with
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// The media source node this bridge created
    pub fn source_node(&self) -> NodeId {
        self.source
    }

    /// The post-decode gain node this bridge created
    pub fn gain_node(&self) -> NodeId {
        self.master_gain
    }
}
