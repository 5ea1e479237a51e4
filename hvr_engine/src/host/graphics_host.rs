/// GraphicsHost trait - GPU services provided by the embedding engine
///
/// The core never talks to a graphics API. It asks the host for surfaces,
/// binds them as render targets, draws full-screen composites and submits
/// native render events into the host command stream.

use glam::{Mat4, Vec3, Vec4};
use crate::error::Result;
use crate::native::{EventId, NativeTexturePtr};

/// Graphics API the host device runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicsDeviceType {
    OpenGl2,
    OpenGlCore,
    OpenGlEs2,
    OpenGlEs3,
    Direct3D11,
    Direct3D12,
    Vulkan,
    Metal,
    Null,
}

impl GraphicsDeviceType {
    /// OpenGL-family devices use clip-space depth in [-1, 1] and no Y flip
    pub fn is_opengl_family(&self) -> bool {
        matches!(
            self,
            GraphicsDeviceType::OpenGl2
                | GraphicsDeviceType::OpenGlCore
                | GraphicsDeviceType::OpenGlEs2
                | GraphicsDeviceType::OpenGlEs3
        )
    }
}

/// Active color space of the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Gamma,
    Linear,
}

/// Rendering path a host camera actually uses this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderingPath {
    Forward,
    Deferred,
    VertexLit,
}

/// Pixel format of a host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceFormat {
    /// 8-bit per channel RGBA, linear read/write
    Rgba8,
    /// 16-bit depth
    Depth16,
}

/// Surface creation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDesc {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: SurfaceFormat,
}

/// GPU surface owned by the core
///
/// Dropping the surface releases the GPU memory.
pub trait Surface: Send {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn format(&self) -> SurfaceFormat;

    /// Pointer handed to the native renderer as a texture
    fn native_ptr(&self) -> NativeTexturePtr;
}

/// Currently bound color and depth targets
///
/// Null pointers mean the host's default target (the camera's own target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderTargetBinding {
    pub color: NativeTexturePtr,
    pub depth: NativeTexturePtr,
}

impl RenderTargetBinding {
    pub const DEFAULT: Self = Self {
        color: NativeTexturePtr::NULL,
        depth: NativeTexturePtr::NULL,
    };

    pub fn new(color: NativeTexturePtr, depth: NativeTexturePtr) -> Self {
        Self { color, depth }
    }

    /// True when rendering into a texture rather than the default target
    pub fn is_offscreen(&self) -> bool {
        !self.color.is_null()
    }
}

/// Host material identifier (actor material or composite material)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u64);

/// Full-screen quad used to composite an actor into the camera frame
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeQuad {
    pub vertices: [Vec3; 4],
    pub uvs: [[f32; 2]; 4],
    pub indices: [u16; 6],
}

impl CompositeQuad {
    /// Clip-space quad covering the whole target
    pub fn full_screen() -> Self {
        Self {
            vertices: [
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            uvs: [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            indices: [0, 1, 2, 0, 2, 3],
        }
    }
}

/// One full-screen composite draw
#[derive(Debug, Clone, PartialEq)]
pub struct FullScreenDraw<'a> {
    pub material: MaterialId,
    pub color: NativeTexturePtr,
    pub depth: NativeTexturePtr,
    pub inverse_view_projection: Mat4,
    /// Screen-space shadow texture to multiply in, when shadows are received
    pub screen_space_shadow: Option<NativeTexturePtr>,
    pub quad: &'a CompositeQuad,
}

/// GPU services of the embedding engine
pub trait GraphicsHost {
    fn device_type(&self) -> GraphicsDeviceType;
    fn color_space(&self) -> ColorSpace;

    /// Allocate a GPU surface. Fails when GPU memory is exhausted.
    fn create_surface(&self, desc: &SurfaceDesc) -> Result<Box<dyn Surface>>;

    /// Hint that a surface's contents are not needed anymore
    fn discard_contents(&self, surface: &dyn Surface);

    fn render_target(&self) -> RenderTargetBinding;
    fn set_render_target(&self, target: RenderTargetBinding);

    /// Clear the bound color and depth targets
    fn clear(&self, color: [f32; 4], depth: f32);

    fn draw_full_screen(&self, draw: &FullScreenDraw);

    /// Submit a deferred native render event into the GPU command stream
    fn issue_plugin_event(&self, event: EventId);
}

/// Adjust a host projection matrix to what the device expects
///
/// OpenGL-family devices take it unchanged. Other devices remap clip-space
/// depth from [-1, 1] to [0, 1], and flip Y when rendering into a texture.
pub fn gpu_projection_matrix(
    projection: &Mat4,
    render_to_texture: bool,
    device: GraphicsDeviceType,
) -> Mat4 {
    if device.is_opengl_family() {
        return *projection;
    }

    // z' = 0.5 * z + 0.5 * w
    let depth_remap = Mat4::from_cols(
        Vec4::X,
        Vec4::Y,
        Vec4::new(0.0, 0.0, 0.5, 0.0),
        Vec4::new(0.0, 0.0, 0.5, 1.0),
    );
    let mut gpu = depth_remap * *projection;

    if render_to_texture {
        gpu = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0)) * gpu;
    }

    gpu
}

#[cfg(test)]
#[path = "graphics_host_tests.rs"]
mod tests;
