/// FrameBuffer - color and depth surfaces the native renderer draws into
///
/// Created with a native handle only. Surfaces are allocated by the first
/// `resize()` and reallocated whenever the requested size changes. A
/// viewport never owns the frame buffer it targets: it holds a
/// [`FrameBufferRef`] that stops resolving once the frame buffer is gone.

use std::sync::{Arc, Weak};
use crate::error::Result;
use crate::engine_bail;
use crate::host::{GraphicsHost, Surface, SurfaceDesc, SurfaceFormat};
use crate::native::{NativeRenderer, FrameBufferHandle, NativeTexturePtr};

/// Non-owning reference to a [`FrameBuffer`]
#[derive(Debug, Clone)]
pub struct FrameBufferRef {
    handle: FrameBufferHandle,
    alive: Weak<()>,
}

impl FrameBufferRef {
    /// Native handle, while the frame buffer is alive
    pub fn handle(&self) -> Option<FrameBufferHandle> {
        self.alive.upgrade().map(|_| self.handle)
    }

    pub fn is_alive(&self) -> bool {
        self.alive.strong_count() > 0
    }
}

pub struct FrameBuffer {
    native: Arc<dyn NativeRenderer>,
    handle: FrameBufferHandle,
    color: Option<Box<dyn Surface>>,
    depth: Option<Box<dyn Surface>>,
    width: u32,
    height: u32,
    /// Liveness token observed by `FrameBufferRef`; `None` once destroyed
    alive: Option<Arc<()>>,
}

impl FrameBuffer {
    /// Allocate the native handle. No GPU surface is created yet.
    pub fn new(native: Arc<dyn NativeRenderer>) -> Self {
        let handle = native.frame_buffer_create();
        crate::engine_trace!("hvr::FrameBuffer", "Created frame buffer {}", handle.0);

        Self {
            native,
            handle,
            color: None,
            depth: None,
            width: 0,
            height: 0,
            alive: Some(Arc::new(())),
        }
    }

    pub fn handle(&self) -> FrameBufferHandle {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_destroyed(&self) -> bool {
        self.alive.is_none()
    }

    /// Not destroyed and the native side still knows the handle
    pub fn is_valid(&self) -> bool {
        !self.is_destroyed() && self.native.frame_buffer_is_valid(self.handle)
    }

    pub fn color_surface(&self) -> Option<&dyn Surface> {
        self.color.as_deref()
    }

    pub fn depth_surface(&self) -> Option<&dyn Surface> {
        self.depth.as_deref()
    }

    pub fn color_texture(&self) -> NativeTexturePtr {
        self.color.as_ref().map(|s| s.native_ptr()).unwrap_or(NativeTexturePtr::NULL)
    }

    pub fn depth_texture(&self) -> NativeTexturePtr {
        self.depth.as_ref().map(|s| s.native_ptr()).unwrap_or(NativeTexturePtr::NULL)
    }

    /// Weak reference for viewport binding
    pub fn weak_ref(&self) -> FrameBufferRef {
        FrameBufferRef {
            handle: self.handle,
            alive: self.alive.as_ref().map(Arc::downgrade).unwrap_or_default(),
        }
    }

    /// Resize the surfaces. Returns `Ok(false)` when the size is unchanged.
    ///
    /// Contents are undefined after a successful resize.
    pub fn resize(&mut self, host: &dyn GraphicsHost, width: u32, height: u32) -> Result<bool> {
        if width == self.width && height == self.height {
            return Ok(false);
        }

        self.allocate_surfaces(host, width, height)?;
        Ok(true)
    }

    /// Reallocate the surfaces even if the size is unchanged (color space or
    /// rendering path changed)
    pub fn recreate(&mut self, host: &dyn GraphicsHost, width: u32, height: u32) -> Result<()> {
        self.allocate_surfaces(host, width, height)
    }

    fn allocate_surfaces(&mut self, host: &dyn GraphicsHost, width: u32, height: u32) -> Result<()> {
        if self.is_destroyed() {
            engine_bail!("hvr::FrameBuffer", InvalidResource,
                "Frame buffer {} used after destroy", self.handle.0);
        }

        // Old surfaces go first so peak memory never holds both sizes
        self.release_surfaces();

        let color = host.create_surface(&SurfaceDesc {
            name: "Color".to_string(),
            width,
            height,
            format: SurfaceFormat::Rgba8,
        })?;
        let depth = host.create_surface(&SurfaceDesc {
            name: "Depth".to_string(),
            width,
            height,
            format: SurfaceFormat::Depth16,
        })?;

        self.native.frame_buffer_set_textures(
            self.handle,
            width,
            height,
            color.native_ptr(),
            depth.native_ptr(),
        );
        self.native.frame_buffer_set_size(self.handle, [width as f32, height as f32]);

        self.color = Some(color);
        self.depth = Some(depth);
        self.width = width;
        self.height = height;

        crate::engine_debug!("hvr::FrameBuffer", "Frame buffer {} resized to {}x{}",
            self.handle.0, width, height);
        Ok(())
    }

    fn release_surfaces(&mut self) {
        if self.color.is_some() || self.depth.is_some() {
            self.color = None;
            self.depth = None;
            self.width = 0;
            self.height = 0;
        }
    }

    /// Performance hint: current contents will not be read again
    pub fn discard_contents(&self, host: &dyn GraphicsHost) {
        if let Some(color) = self.color.as_deref() {
            host.discard_contents(color);
        }
        if let Some(depth) = self.depth.as_deref() {
            host.discard_contents(depth);
        }
    }

    /// Release surfaces and the native handle. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.alive.take().is_none() {
            return;
        }

        self.release_surfaces();
        self.native.frame_buffer_delete(self.handle);
        crate::engine_trace!("hvr::FrameBuffer", "Destroyed frame buffer {}", self.handle.0);
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "frame_buffer_tests.rs"]
mod tests;
