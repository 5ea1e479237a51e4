/// Render modes and per-actor render state supplied by the host

use bitflags::bitflags;
use crate::host::{BoundingSphere, MaterialId};
use crate::native::ActorHandle;

/// How a camera renders volumetric actors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Each actor renders into its own frame buffer, then composites with
    /// its material and writes its depth at the camera's depth hook
    Standard,
    /// Whole scene renders into temporary surfaces composited with `material`
    Composite { material: MaterialId },
    /// Whole scene renders straight into the active target
    Direct,
}

/// Per-actor choice inside the standard camera mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRenderMethod {
    Standard,
    Direct,
}

/// Actor state the host refreshes before each camera tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderableActor {
    pub handle: ActorHandle,
    pub active_and_enabled: bool,
    pub occlusion_culling: bool,
    pub bounding_sphere: BoundingSphere,
    pub render_method: ActorRenderMethod,
    /// Material compositing the actor's frame buffer into the camera frame
    pub material: MaterialId,
}

bitflags! {
    /// Why package frame buffers must be reallocated this tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecreateReasons: u8 {
        const RENDERING_PATH = 1 << 0;
        const COLOR_SPACE = 1 << 1;
    }
}
