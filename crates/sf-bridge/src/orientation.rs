//! Camera orientation sync
//!
//! Spatial audio only reads right when the sound field counter-rotates
//! against the viewer's look direction. This module pulls the camera's
//! world transform once per frame (or on controls changes) and pushes the
//! rotation block into the bridge.

use std::sync::Arc;

use nalgebra::Matrix4;
use parking_lot::Mutex;

use sf_core::rotation;

use crate::bridge::SharedBridge;

/// Camera surface the sync reads from. Provided by the host's scene
/// graph; never constructed here.
pub trait HeadCamera: Send {
    /// Recompute the world transform from current position/rotation state
    fn update_matrix(&mut self);

    /// The current world transform, 16 elements, column-major
    fn matrix(&self) -> [f32; 16];
}

/// Pushes camera orientation into a bridge.
///
/// Holds non-owning handles to both sides; construction has no side
/// effects. [`update`](Self::update) is synchronous and safe to call every
/// frame; each call overwrites the previous rotation outright.
pub struct OrientationSync<C: HeadCamera> {
    bridge: SharedBridge,
    camera: Arc<Mutex<C>>,
}

impl<C: HeadCamera> OrientationSync<C> {
    pub fn new(bridge: SharedBridge, camera: Arc<Mutex<C>>) -> Self {
        Self { bridge, camera }
    }

    /// Recompute the camera transform and forward its rotation.
    ///
    /// Forcing the matrix recompute is not free; avoid redundant calls
    /// within the same frame. The transform must be unscaled, a scaled one
    /// yields a non-orthogonal rotation (caller misuse, not an error).
    pub fn update(&self) {
        let elements = {
            let mut camera = self.camera.lock();
            camera.update_matrix();
            camera.matrix()
        };
        let rotation = rotation::rotation_from_column_major(&elements);
        self.bridge.lock().set_rotation_matrix(&rotation);
    }

    /// Forward the rotation block of a caller-computed transform,
    /// bypassing the camera read
    pub fn set_rotation_from_matrix(&self, transform: &Matrix4<f32>) {
        let rotation = rotation::rotation_part(transform);
        self.bridge.lock().set_rotation_matrix(&rotation);
    }
}
