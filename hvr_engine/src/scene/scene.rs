/// Scene - the set of actors one prepare/render event covers

use std::sync::Arc;
use crate::error::Result;
use crate::engine_bail;
use crate::native::{NativeRenderer, SceneHandle, ActorHandle};

pub struct Scene {
    native: Arc<dyn NativeRenderer>,
    handle: SceneHandle,
}

impl Scene {
    pub fn new(native: Arc<dyn NativeRenderer>) -> Result<Self> {
        let handle = native.scene_create();
        if handle.is_none() {
            engine_bail!("hvr::Scene", InitializationFailed, "Native renderer refused to create a scene");
        }

        crate::engine_debug!("hvr::Scene", "Created scene {}", handle.0);
        Ok(Self { native, handle })
    }

    pub fn handle(&self) -> SceneHandle {
        self.handle
    }

    pub fn is_valid(&self) -> bool {
        self.native.scene_is_valid(self.handle)
    }

    pub fn contains_actor(&self, actor: ActorHandle) -> bool {
        self.native.scene_contains_actor(self.handle, actor)
    }

    /// No-op when the actor is already attached
    pub fn attach_actor(&self, actor: ActorHandle) {
        if !self.contains_actor(actor) {
            self.native.scene_attach_actor(self.handle, actor);
        }
    }

    /// No-op when the actor is not attached
    pub fn detach_actor(&self, actor: ActorHandle) {
        if self.contains_actor(actor) {
            self.native.scene_detach_actor(self.handle, actor);
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.native.scene_delete(self.handle);
    }
}
