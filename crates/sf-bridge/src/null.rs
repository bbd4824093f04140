//! Headless renderer
//!
//! A renderer that allocates real endpoint nodes but decodes nothing.
//! Backs the integration tests and examples, and serves hosts that want
//! the full setup/orientation pipeline without audible output. The
//! attached [`RendererProbe`] records what the bridge asked of it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::Sender;
use nalgebra::Matrix3;
use parking_lot::Mutex;

use sf_core::RendererConfig;
use sf_graph::{NodeId, SharedGraph};

use crate::renderer::{
    AmbisonicRenderer, InitHandle, RendererError, RendererFactory, RenderingMode,
};

type InitSlot = Arc<Mutex<Option<Sender<Result<(), RendererError>>>>>;

#[derive(Clone)]
enum InitScript {
    Succeed,
    Fail(RendererError),
    Defer(InitSlot),
}

/// Resolves a deferred [`NullRenderer`] initialization from outside.
///
/// Single-shot: the first `resolve` wins.
pub struct DeferredInit {
    slot: InitSlot,
}

impl DeferredInit {
    /// Deliver the outcome. Returns false when initialization has not
    /// started yet, was already resolved, or nobody is waiting.
    pub fn resolve(&self, result: Result<(), RendererError>) -> bool {
        match self.slot.lock().take() {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }
}

/// Record of everything a [`NullRenderer`] was asked to do
#[derive(Default)]
pub struct RendererProbe {
    foa_created: AtomicUsize,
    hoa_created: AtomicUsize,
    last_config: Mutex<Option<RendererConfig>>,
    endpoints: Mutex<Option<(NodeId, NodeId)>>,
    last_rotation: Mutex<Option<Matrix3<f32>>>,
    last_mode: Mutex<Option<RenderingMode>>,
}

impl RendererProbe {
    /// First-order renderers constructed
    pub fn foa_created(&self) -> usize {
        self.foa_created.load(Ordering::Relaxed)
    }

    /// Higher-order renderers constructed
    pub fn hoa_created(&self) -> usize {
        self.hoa_created.load(Ordering::Relaxed)
    }

    pub fn renderers_created(&self) -> usize {
        self.foa_created() + self.hoa_created()
    }

    /// Configuration the latest renderer was constructed with
    pub fn last_config(&self) -> Option<RendererConfig> {
        self.last_config.lock().clone()
    }

    /// (input, output) nodes of the latest renderer
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        *self.endpoints.lock()
    }

    /// Most recent rotation pushed through the bridge
    pub fn last_rotation(&self) -> Option<Matrix3<f32>> {
        *self.last_rotation.lock()
    }

    /// Most recent rendering mode switch
    pub fn last_mode(&self) -> Option<RenderingMode> {
        *self.last_mode.lock()
    }
}

/// Renderer that wires endpoints and records calls, nothing more
pub struct NullRenderer {
    input: NodeId,
    output: NodeId,
    script: InitScript,
    probe: Arc<RendererProbe>,
}

impl AmbisonicRenderer for NullRenderer {
    fn initialize(&mut self) -> InitHandle {
        let (tx, rx) = crossbeam_channel::bounded(1);
        match &self.script {
            InitScript::Succeed => {
                let _ = tx.send(Ok(()));
            }
            InitScript::Fail(err) => {
                let _ = tx.send(Err(err.clone()));
            }
            InitScript::Defer(slot) => {
                *slot.lock() = Some(tx);
            }
        }
        rx
    }

    fn input(&self) -> NodeId {
        self.input
    }

    fn output(&self) -> NodeId {
        self.output
    }

    fn set_rotation_matrix(&mut self, rotation: &Matrix3<f32>) {
        *self.probe.last_rotation.lock() = Some(*rotation);
    }

    fn set_rendering_mode(&mut self, mode: RenderingMode) {
        *self.probe.last_mode.lock() = Some(mode);
    }
}

/// Factory for [`NullRenderer`]s with a scripted initialization outcome
pub struct NullRendererFactory {
    script: InitScript,
    probe: Arc<RendererProbe>,
}

impl NullRendererFactory {
    /// Renderers whose initialization succeeds as soon as it is polled
    pub fn new() -> Self {
        Self {
            script: InitScript::Succeed,
            probe: Arc::new(RendererProbe::default()),
        }
    }

    /// Renderers whose initialization fails with the given cause
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: InitScript::Fail(RendererError::new(message)),
            probe: Arc::new(RendererProbe::default()),
        }
    }

    /// Renderers whose initialization stays pending until the returned
    /// handle resolves it
    pub fn deferred() -> (Self, DeferredInit) {
        let slot: InitSlot = Arc::new(Mutex::new(None));
        let factory = Self {
            script: InitScript::Defer(slot.clone()),
            probe: Arc::new(RendererProbe::default()),
        };
        (factory, DeferredInit { slot })
    }

    /// The probe shared by every renderer this factory constructs
    pub fn probe(&self) -> Arc<RendererProbe> {
        self.probe.clone()
    }

    fn create(
        &self,
        graph: &SharedGraph,
        config: &RendererConfig,
    ) -> Result<Box<dyn AmbisonicRenderer>, RendererError> {
        let (input, output) = {
            let mut host = graph.lock();
            let input = host
                .create_gain()
                .map_err(|err| RendererError::new(err.to_string()))?;
            let output = host
                .create_gain()
                .map_err(|err| RendererError::new(err.to_string()))?;
            (input, output)
        };

        *self.probe.last_config.lock() = Some(config.clone());
        *self.probe.endpoints.lock() = Some((input, output));

        Ok(Box::new(NullRenderer {
            input,
            output,
            script: self.script.clone(),
            probe: self.probe.clone(),
        }))
    }
}

impl Default for NullRendererFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererFactory for NullRendererFactory {
    fn create_foa(
        &self,
        graph: &SharedGraph,
        config: &RendererConfig,
    ) -> Result<Box<dyn AmbisonicRenderer>, RendererError> {
        self.probe.foa_created.fetch_add(1, Ordering::Relaxed);
        self.create(graph, config)
    }

    fn create_hoa(
        &self,
        graph: &SharedGraph,
        config: &RendererConfig,
    ) -> Result<Box<dyn AmbisonicRenderer>, RendererError> {
        self.probe.hoa_created.fetch_add(1, Ordering::Relaxed);
        self.create(graph, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_graph::{OfflineGraph, shared};

    #[test]
    fn test_deferred_resolves_once() {
        let (factory, init) = NullRendererFactory::deferred();
        let graph = shared(OfflineGraph::default());
        let mut renderer = factory
            .create_foa(&graph, &RendererConfig::default())
            .unwrap();

        // Nothing waiting yet.
        assert!(!init.resolve(Ok(())));

        let handle = renderer.initialize();
        assert!(handle.try_recv().is_err());

        assert!(init.resolve(Ok(())));
        assert_eq!(handle.try_recv(), Ok(Ok(())));

        // Single-shot.
        assert!(!init.resolve(Ok(())));
    }

    #[test]
    fn test_probe_records_creation_paths() {
        let factory = NullRendererFactory::new();
        let graph = shared(OfflineGraph::default());
        let config = RendererConfig::default();

        factory.create_foa(&graph, &config).unwrap();
        factory.create_hoa(&graph, &config).unwrap();

        let probe = factory.probe();
        assert_eq!(probe.foa_created(), 1);
        assert_eq!(probe.hoa_created(), 1);
        assert_eq!(probe.renderers_created(), 2);
        assert!(probe.endpoints().is_some());
    }
}
