/// Actor - one placed instance of an asset in the default scene
///
/// Transforms go through [`actor_transform`]: authoring data is in
/// centimeters and mirrored on X relative to the host. The scale factor is
/// fixed at creation; [`RenderScheduler::create_actor`] takes it from the
/// render config.
///
/// [`RenderScheduler::create_actor`]: crate::scheduler::RenderScheduler::create_actor

use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::host::BoundingSphere;
use crate::native::{
    NativeRenderer, ActorHandle, AssetHandle, SceneHandle, Bounds,
    actor_transform, matrix_to_native, bounds_from_native, aabb_from_native,
    CENTIMETERS_TO_METERS,
};
use super::{Scene, Asset};

pub struct Actor {
    native: Arc<dyn NativeRenderer>,
    handle: ActorHandle,
    scene: SceneHandle,
    scale_factor: f32,
}

impl Actor {
    /// Create the native actor and attach it to `scene` (centimeter data)
    pub fn new(native: Arc<dyn NativeRenderer>, scene: &Scene) -> Self {
        Self::with_scale_factor(native, scene, CENTIMETERS_TO_METERS)
    }

    pub fn with_scale_factor(native: Arc<dyn NativeRenderer>, scene: &Scene, scale_factor: f32) -> Self {
        let handle = native.actor_create();
        scene.attach_actor(handle);

        Self { native, handle, scene: scene.handle(), scale_factor }
    }

    pub fn handle(&self) -> ActorHandle {
        self.handle
    }

    pub fn is_valid(&self) -> bool {
        self.native.actor_is_valid(self.handle)
    }

    /// Play `asset`, or nothing with `None`
    pub fn set_asset(&self, asset: Option<&Asset>) {
        let handle = asset.map(Asset::handle).unwrap_or(AssetHandle::NONE);
        self.native.actor_set_asset(self.handle, handle);
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn set_transform(&self, local_to_world: &Mat4) {
        let transform = actor_transform(local_to_world, self.scale_factor);
        self.native.actor_set_transform(self.handle, &matrix_to_native(&transform));
    }

    pub fn set_visible(&self, visible: bool) {
        self.native.actor_set_visible(self.handle, visible);
    }

    pub fn is_visible(&self) -> bool {
        self.native.actor_is_visible(self.handle)
    }

    /// Local bounds in meters, scaled by the host lossy scale
    pub fn bounds(&self, lossy_scale: Vec3) -> Bounds {
        bounds_from_native(&self.native.actor_bounds(self.handle), lossy_scale)
    }

    /// World-space bounds of the current frame
    pub fn aabb(&self) -> Bounds {
        aabb_from_native(&self.native.actor_aabb(self.handle))
    }

    /// Culling sphere around the world bounds, padded by `offset`
    pub fn bounding_sphere(&self, offset: f32) -> BoundingSphere {
        let aabb = self.aabb();
        BoundingSphere::new(aabb.center, aabb.bounding_radius() + offset)
    }
}

impl Drop for Actor {
    fn drop(&mut self) {
        if self.native.scene_contains_actor(self.scene, self.handle) {
            self.native.scene_detach_actor(self.scene, self.handle);
        }
        self.native.actor_delete(self.handle);
    }
}
