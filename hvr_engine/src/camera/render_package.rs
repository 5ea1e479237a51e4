/// RenderPackage - GPU resources of one (camera, actor) pair
///
/// Owns a frame buffer the actor renders into, a ping-pong viewport chain,
/// the full-screen quad, and a command sequence that writes the actor's
/// depth at the camera's depth hook. The sequence is named
/// `<prefix><unique id>` so the camera hook list can be searched by name.
///
/// Releasing needs the camera (to detach the sequence), so it is an explicit
/// [`RenderPackage::release`]; dropping an unreleased package still frees
/// the frame buffer and viewports.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::host::{
    GraphicsHost, HostCamera, CameraEvent, CommandSequence, SharedCommandSequence,
    CompositeQuad, MaterialId, RenderTargetBinding,
};
use crate::native::{NativeRenderer, ActorHandle};
use crate::render::{FrameBuffer, ViewportSwapChain, Statistic};
use crate::scheduler::RenderScheduler;

/// Global texture name the depth composite sequence exposes the depth under
pub const DEPTH_TEXTURE_NAME: &str = "_oDEP";

static NEXT_PACKAGE_ID: AtomicU64 = AtomicU64::new(1);

/// What the package did during the last pre-render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageState {
    /// Actor not visible: sequence detached, contents discarded
    Hidden,
    /// Rendered into the frame buffer, sequence attached
    Standard,
    /// Rendered straight into the camera target, sequence detached
    Direct,
}

pub struct RenderPackage {
    id: u64,
    frame_buffer: FrameBuffer,
    swap_chain: ViewportSwapChain,
    quad: CompositeQuad,
    sequence: SharedCommandSequence,
    sequence_name: String,
    composite_event: CameraEvent,
    depth_composite_material: MaterialId,
    state: PackageState,
    released: bool,
    pub stat_pre_render: Statistic,
    pub stat_post_render: Statistic,
}

impl RenderPackage {
    /// Create the package with its frame buffer sized to the camera
    pub fn new(
        native: Arc<dyn NativeRenderer>,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
        config: &RenderConfig,
        depth_composite_material: MaterialId,
    ) -> Result<Self> {
        let id = NEXT_PACKAGE_ID.fetch_add(1, Ordering::Relaxed);
        let sequence_name = format!("{}{}", config.command_sequence_prefix, id);

        let swap_chain = ViewportSwapChain::new(Arc::clone(&native), config.package_viewport_count)?;
        let mut frame_buffer = FrameBuffer::new(native);
        frame_buffer.resize(host, camera.pixel_width(), camera.pixel_height())?;

        Ok(Self {
            id,
            frame_buffer,
            swap_chain,
            quad: CompositeQuad::full_screen(),
            sequence: Arc::new(Mutex::new(CommandSequence::new(sequence_name.clone()))),
            sequence_name,
            composite_event: config.composite_event,
            depth_composite_material,
            state: PackageState::Hidden,
            released: false,
            stat_pre_render: Statistic::new(),
            stat_post_render: Statistic::new(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn sequence_name(&self) -> &str {
        &self.sequence_name
    }

    pub fn sequence(&self) -> &SharedCommandSequence {
        &self.sequence
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn swap_chain(&self) -> &ViewportSwapChain {
        &self.swap_chain
    }

    pub fn quad(&self) -> &CompositeQuad {
        &self.quad
    }

    pub fn state(&self) -> PackageState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: PackageState) {
        self.state = state;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Whether a sequence with this package's name sits on the camera hook
    pub fn is_attached(&self, camera: &dyn HostCamera) -> bool {
        camera
            .command_sequence_names(self.composite_event)
            .iter()
            .any(|name| *name == self.sequence_name)
    }

    /// Attach or detach the depth composite sequence. No-op when already
    /// in the requested state.
    pub fn set_attached(&self, camera: &dyn HostCamera, attached: bool) {
        let is_attached = self.is_attached(camera);

        if attached && !is_attached {
            camera.add_command_sequence(self.composite_event, &self.sequence);
        }
        if !attached && is_attached {
            camera.remove_command_sequence(self.composite_event, &self.sequence_name);
        }
    }

    /// Resize the frame buffer to the camera; `Ok(false)` when unchanged
    pub fn update_buffer_size(&mut self, host: &dyn GraphicsHost, width: u32, height: u32) -> Result<bool> {
        self.frame_buffer.resize(host, width, height)
    }

    pub fn recreate_buffers(&mut self, host: &dyn GraphicsHost, width: u32, height: u32) -> Result<()> {
        self.frame_buffer.recreate(host, width, height)
    }

    pub fn discard_contents(&self, host: &dyn GraphicsHost) {
        self.frame_buffer.discard_contents(host);
    }

    /// Render the actor into the package frame buffer
    ///
    /// The host target is bound to the frame buffer and cleared for the
    /// duration of the call, then restored.
    pub fn fill_frame_buffer(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
        actor: ActorHandle,
    ) {
        let previous = host.render_target();
        host.set_render_target(RenderTargetBinding::new(
            self.frame_buffer.color_texture(),
            self.frame_buffer.depth_texture(),
        ));
        host.clear(scheduler.config().clear_color, scheduler.config().clear_depth);

        let viewport = self.swap_chain.next_viewport_for_camera(host, camera, true);
        viewport.set_frame_buffer(Some(&self.frame_buffer));
        scheduler.render_actor(host, actor, viewport);

        host.set_render_target(previous);
    }

    /// Render the actor straight into the active target
    pub fn render_direct(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
        actor: ActorHandle,
    ) {
        let viewport = self.swap_chain.next_viewport_for_camera(host, camera, false);
        scheduler.render_actor(host, actor, viewport);
    }

    /// Re-record the depth composite sequence against the current depth surface
    pub fn record_depth_composite(&self) {
        let mut sequence = self.sequence.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sequence.clear();
        sequence.set_global_texture(DEPTH_TEXTURE_NAME, self.frame_buffer.depth_texture());
        sequence.draw_quad(&self.quad, self.depth_composite_material);
    }

    /// Detach from the camera (if it is still alive) and free GPU resources.
    /// Safe to call repeatedly.
    pub fn release(&mut self, camera: &dyn HostCamera) {
        if self.released {
            return;
        }
        self.released = true;

        if camera.is_alive() {
            self.set_attached(camera, false);
        }
        self.sequence.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clear();
        self.frame_buffer.destroy();
        self.swap_chain.invalidate();
        self.state = PackageState::Hidden;

        crate::engine_trace!("hvr::RenderPackage", "Released package {}", self.sequence_name);
    }
}
