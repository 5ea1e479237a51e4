/// ViewportSwapChain - fixed ring of viewports handed out round-robin
///
/// While the native renderer still consumes the viewport issued last frame,
/// the caller populates the next one. The ring is built lazily and rebuilt as
/// a whole when the viewport about to be issued became invalid or when the
/// graphics device type differs from the one the ring was built for.

use std::sync::Arc;
use glam::Mat4;
use crate::config::MAX_VIEWPORTS;
use crate::error::Result;
use crate::engine_bail;
use crate::host::{GraphicsHost, GraphicsDeviceType, HostCamera, gpu_projection_matrix};
use crate::native::NativeRenderer;
use super::{Viewport, ViewportRect};

/// Parameters for one issued viewport
///
/// `projection` is used as given: callers pass a device-ready matrix
/// (see [`gpu_projection_matrix`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportDesc {
    pub view: Mat4,
    pub projection: Mat4,
    pub near: f32,
    pub far: f32,
    pub rect: ViewportRect,
}

pub struct ViewportSwapChain {
    native: Arc<dyn NativeRenderer>,
    capacity: usize,
    ring: Vec<Viewport>,
    index: usize,
    /// Width, height and device of the previously issued viewport
    last: Option<(f32, f32, GraphicsDeviceType)>,
    built_for: Option<GraphicsDeviceType>,
}

impl ViewportSwapChain {
    /// Create an empty chain of `capacity` viewports (1 to 8)
    pub fn new(native: Arc<dyn NativeRenderer>, capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > MAX_VIEWPORTS {
            engine_bail!("hvr::ViewportSwapChain", InvalidParameter,
                "Swap chain capacity must be in 1..={}, got {}", MAX_VIEWPORTS, capacity);
        }

        Ok(Self {
            native,
            capacity,
            ring: Vec::with_capacity(capacity),
            index: 0,
            last: None,
            built_for: None,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slot the next call will issue
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_built(&self) -> bool {
        !self.ring.is_empty()
    }

    pub fn viewport(&self, index: usize) -> Option<&Viewport> {
        self.ring.get(index)
    }

    /// Drop every viewport. The next call rebuilds the ring.
    pub fn invalidate(&mut self) {
        self.ring.clear();
        self.index = 0;
        self.built_for = None;
    }

    /// Issue the next viewport, populated from explicit parameters
    pub fn next_viewport(&mut self, device: GraphicsDeviceType, desc: &ViewportDesc) -> &mut Viewport {
        let slot = self.acquire(device);

        let current = (desc.rect.width, desc.rect.height, device);
        let changed = self.last != Some(current);
        self.last = Some(current);

        let viewport = &mut self.ring[slot];
        viewport.set_changed(changed);
        viewport.set_view_matrix(&desc.view);
        viewport.set_proj_matrix(&desc.projection);
        viewport.set_near_far(desc.near, desc.far);
        viewport.set_rect(desc.rect);
        viewport.set_frame_buffer(None);
        viewport
    }

    /// Issue the next viewport, populated from a host camera
    ///
    /// The rect always starts at (0, 0). The projection follows the
    /// render-to-texture convention when an offscreen target is bound or
    /// `force_render_to_texture` is set.
    pub fn next_viewport_for_camera(
        &mut self,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
        force_render_to_texture: bool,
    ) -> &mut Viewport {
        let device = host.device_type();
        let render_to_texture = force_render_to_texture || host.render_target().is_offscreen();

        let desc = ViewportDesc {
            view: camera.world_to_camera(),
            projection: gpu_projection_matrix(&camera.projection(), render_to_texture, device),
            near: camera.near_clip(),
            far: camera.far_clip(),
            rect: ViewportRect::new(
                0.0,
                0.0,
                camera.pixel_width() as f32,
                camera.pixel_height() as f32,
            ),
        };

        self.next_viewport(device, &desc)
    }

    /// Slot to issue, rebuilding the ring first when needed, then advance
    fn acquire(&mut self, device: GraphicsDeviceType) -> usize {
        let rebuild = match self.ring.get(self.index) {
            None => true,
            Some(viewport) => !viewport.is_valid() || self.built_for != Some(device),
        };

        if rebuild {
            self.rebuild(device);
        }

        let slot = self.index;
        self.index = (self.index + 1) % self.capacity;
        slot
    }

    fn rebuild(&mut self, device: GraphicsDeviceType) {
        if self.is_built() {
            crate::engine_debug!("hvr::ViewportSwapChain",
                "Rebuilding {} viewports for {:?}", self.capacity, device);
        }

        // Old handles are deleted before new ones are created
        self.ring.clear();
        self.ring.extend((0..self.capacity).map(|_| Viewport::new(Arc::clone(&self.native))));
        self.index = 0;
        self.built_for = Some(device);
    }
}

#[cfg(test)]
#[path = "swap_chain_tests.rs"]
mod tests;
