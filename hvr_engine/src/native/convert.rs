//! Conversions between host-side math types and the native calling convention.
//!
//! The native library takes 4x4 matrices as 16 floats in row-major order and
//! works in centimeters with the X axis mirrored relative to the host.

use glam::{Mat4, Vec3};
use super::NativeBounds;

/// Centimeters to meters
pub const CENTIMETERS_TO_METERS: f32 = 0.01;

/// Mirror applied to every actor transform (host and native disagree on X)
pub const ACTOR_MIRROR: Vec3 = Vec3::new(-1.0, 1.0, 1.0);

/// Flatten a matrix into the 16 row-major floats the native side expects
pub fn matrix_to_native(matrix: &Mat4) -> [f32; 16] {
    // glam stores columns contiguously: transposing yields rows
    *bytemuck::cast_ref::<Mat4, [f32; 16]>(&matrix.transpose())
}

/// Rebuild a matrix from 16 row-major floats
pub fn matrix_from_native(values: &[f32; 16]) -> Mat4 {
    Mat4::from_cols_array(values).transpose()
}

/// Build the native actor transform from the host local-to-world matrix
///
/// `local_to_world * scale(scale_factor) * scale(-1, 1, 1)`
pub fn actor_transform(local_to_world: &Mat4, scale_factor: f32) -> Mat4 {
    *local_to_world
        * Mat4::from_scale(Vec3::splat(scale_factor))
        * Mat4::from_scale(ACTOR_MIRROR)
}

/// Host-side axis-aligned bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec3,
    pub size: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }

    /// Radius of the sphere centered on the bounds that encloses every corner
    pub fn bounding_radius(&self) -> f32 {
        self.center.distance(self.max())
    }
}

/// Local actor bounds from native bounds: undo the X mirror, centimeters to
/// meters, then apply the host lossy scale
pub fn bounds_from_native(native: &NativeBounds, lossy_scale: Vec3) -> Bounds {
    let center = Vec3::new(-native.center[0], native.center[1], native.center[2]);
    let size = Vec3::from_array(native.size);
    Bounds {
        center: center * CENTIMETERS_TO_METERS * lossy_scale,
        size: size * CENTIMETERS_TO_METERS * lossy_scale,
    }
}

/// World-space bounds reported by the native side, taken as-is
pub fn aabb_from_native(native: &NativeBounds) -> Bounds {
    Bounds {
        center: Vec3::from_array(native.center),
        size: Vec3::from_array(native.size),
    }
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
