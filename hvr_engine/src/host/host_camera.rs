/// HostCamera trait - a camera of the embedding engine as seen by the core
///
/// Besides its matrices, a host camera exposes hook lists: named command
/// sequences attached at a [`CameraEvent`] that the host replays while
/// rendering the camera. The core identifies its own sequences by name.

use std::sync::{Arc, Mutex};
use glam::Mat4;
use crate::native::NativeTexturePtr;
use super::{Frustum, BoundingSphere, RenderingPath, MaterialId, CompositeQuad};

/// Point in the host camera's rendering where command sequences run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraEvent {
    BeforeDepthTexture,
    AfterDepthTexture,
    BeforeGBuffer,
    AfterGBuffer,
    BeforeForwardOpaque,
    AfterForwardOpaque,
    BeforeImageEffects,
    AfterEverything,
}

/// One recorded command of a sequence
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceCommand {
    /// Expose a texture to every shader under a global name
    SetGlobalTexture { name: String, texture: NativeTexturePtr },
    /// Draw a quad with the identity transform
    DrawQuad { quad: CompositeQuad, material: MaterialId },
}

/// Named list of commands replayed by the host at a camera hook
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandSequence {
    name: String,
    commands: Vec<SequenceCommand>,
}

impl CommandSequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), commands: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[SequenceCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn set_global_texture(&mut self, name: &str, texture: NativeTexturePtr) {
        self.commands.push(SequenceCommand::SetGlobalTexture {
            name: name.to_string(),
            texture,
        });
    }

    pub fn draw_quad(&mut self, quad: &CompositeQuad, material: MaterialId) {
        self.commands.push(SequenceCommand::DrawQuad { quad: quad.clone(), material });
    }
}

/// Command sequence shared between its owner and the camera it is attached to
///
/// The owner keeps re-recording it; the host replays whatever it holds.
pub type SharedCommandSequence = Arc<Mutex<CommandSequence>>;

/// Host camera
pub trait HostCamera {
    /// False once the host destroyed the camera
    fn is_alive(&self) -> bool;

    fn pixel_width(&self) -> u32;
    fn pixel_height(&self) -> u32;

    fn world_to_camera(&self) -> Mat4;

    /// Projection in the host (OpenGL) convention
    fn projection(&self) -> Mat4;

    fn near_clip(&self) -> f32;
    fn far_clip(&self) -> f32;

    fn rendering_path(&self) -> RenderingPath;

    /// Names of the sequences attached at a hook, in attach order
    fn command_sequence_names(&self, event: CameraEvent) -> Vec<String>;

    fn add_command_sequence(&self, event: CameraEvent, sequence: &SharedCommandSequence);

    /// Detach every sequence with this name from a hook
    fn remove_command_sequence(&self, event: CameraEvent, name: &str);

    /// Whether a sphere is (potentially) visible from this camera
    fn is_sphere_visible(&self, sphere: &BoundingSphere) -> bool {
        let view_projection = self.projection() * self.world_to_camera();
        Frustum::from_view_projection(&view_projection).intersects_sphere(sphere)
    }
}
