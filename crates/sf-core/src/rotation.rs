//! Rotation extraction from camera world transforms
//!
//! Cameras hand us a 4x4 column-major world transform; the renderer wants
//! the listener's 3x3 rotation. The upper-left block is the rotation as
//! long as the transform carries no scale; translation, the bottom row, and
//! perspective terms are discarded. A scaled transform produces a
//! non-orthogonal matrix here, which is caller misuse, not an error.

use nalgebra::{Matrix3, Matrix4};

/// Extract the 3x3 rotation block from a 4x4 world transform
pub fn rotation_part(transform: &Matrix4<f32>) -> Matrix3<f32> {
    transform.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Extract the rotation from 16 column-major transform elements
pub fn rotation_from_column_major(elements: &[f32; 16]) -> Matrix3<f32> {
    rotation_part(&Matrix4::from_column_slice(elements))
}
