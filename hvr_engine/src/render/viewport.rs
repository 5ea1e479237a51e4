/// Viewport - renderer-side camera parameters and render target
///
/// A thin property bag over a native viewport handle: every setter forwards
/// its value to the native renderer immediately and keeps a copy for reads.

use std::sync::Arc;
use glam::Mat4;
use crate::native::{NativeRenderer, ViewportHandle, FrameBufferHandle, matrix_to_native};
use super::{FrameBuffer, FrameBufferRef};

/// Screen-space rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

pub struct Viewport {
    native: Arc<dyn NativeRenderer>,
    handle: ViewportHandle,
    view: Mat4,
    projection: Mat4,
    near: f32,
    far: f32,
    rect: ViewportRect,
    frame_buffer: Option<FrameBufferRef>,
    changed: bool,
}

impl Viewport {
    pub fn new(native: Arc<dyn NativeRenderer>) -> Self {
        let handle = native.viewport_create();
        Self {
            native,
            handle,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            near: 0.0,
            far: 0.0,
            rect: ViewportRect::default(),
            frame_buffer: None,
            changed: false,
        }
    }

    pub fn handle(&self) -> ViewportHandle {
        self.handle
    }

    /// False after the native side dropped the handle (e.g. device reset)
    pub fn is_valid(&self) -> bool {
        self.native.viewport_is_valid(self.handle)
    }

    pub fn set_view_matrix(&mut self, view: &Mat4) {
        self.view = *view;
        self.native.viewport_set_view_matrix(self.handle, &matrix_to_native(view));
    }

    pub fn set_proj_matrix(&mut self, projection: &Mat4) {
        self.projection = *projection;
        self.native.viewport_set_proj_matrix(self.handle, &matrix_to_native(projection));
    }

    pub fn set_near_far(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.native.viewport_set_near_far(self.handle, near, far);
    }

    pub fn set_rect(&mut self, rect: ViewportRect) {
        self.rect = rect;
        self.native.viewport_set_dimensions(self.handle, rect.x, rect.y, rect.width, rect.height);
    }

    /// Bind a frame buffer as target, or `None` to draw into the active target
    pub fn set_frame_buffer(&mut self, frame_buffer: Option<&FrameBuffer>) {
        self.frame_buffer = frame_buffer.map(FrameBuffer::weak_ref);
        let handle = frame_buffer.map(FrameBuffer::handle).unwrap_or(FrameBufferHandle::NONE);
        self.native.viewport_set_frame_buffer(self.handle, handle);
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Whether size or device changed since the previous viewport of the chain
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn proj_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn near_far(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    pub fn rect(&self) -> ViewportRect {
        self.rect
    }

    /// Bound frame buffer handle, only while that frame buffer is alive
    pub fn frame_buffer(&self) -> Option<FrameBufferHandle> {
        self.frame_buffer.as_ref().and_then(FrameBufferRef::handle)
    }
}

impl Drop for Viewport {
    fn drop(&mut self) {
        self.native.viewport_delete(self.handle);
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
