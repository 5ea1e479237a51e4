/// Mock host engine for unit tests (no GPU or engine required)
///
/// `MockGraphicsHost` records every call in order, `MockSurface` tracks how
/// many surfaces are alive, and `MockCamera` keeps real hook lists.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::engine_bail;
use crate::native::{EventId, NativeTexturePtr};
use super::{
    GraphicsHost, Surface, SurfaceDesc, SurfaceFormat, GraphicsDeviceType, ColorSpace,
    RenderTargetBinding, FullScreenDraw, MaterialId, HostCamera, CameraEvent,
    SharedCommandSequence, RenderingPath, BoundingSphere, Frustum,
};

// ============================================================================
// Mock Surface
// ============================================================================

pub struct MockSurface {
    pub width: u32,
    pub height: u32,
    pub format: SurfaceFormat,
    pub ptr: NativeTexturePtr,
    live: Arc<AtomicUsize>,
}

impl Surface for MockSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> SurfaceFormat {
        self.format
    }

    fn native_ptr(&self) -> NativeTexturePtr {
        self.ptr
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Graphics Host
// ============================================================================

/// Full-screen draw as recorded by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub material: MaterialId,
    pub color: NativeTexturePtr,
    pub depth: NativeTexturePtr,
    pub inverse_view_projection: Mat4,
    pub screen_space_shadow: Option<NativeTexturePtr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateSurface(SurfaceDesc),
    Discard(NativeTexturePtr),
    SetRenderTarget(RenderTargetBinding),
    Clear { color: [f32; 4], depth: f32 },
    Draw(RecordedDraw),
    IssueEvent(EventId),
}

pub struct MockHostState {
    pub device: GraphicsDeviceType,
    pub color_space: ColorSpace,
    pub target: RenderTargetBinding,
    pub next_ptr: usize,
    pub fail_surface_creation: bool,
    pub calls: Vec<HostCall>,
}

pub struct MockGraphicsHost {
    pub state: Mutex<MockHostState>,
    live_surfaces: Arc<AtomicUsize>,
}

impl MockGraphicsHost {
    pub fn new(device: GraphicsDeviceType) -> Self {
        Self {
            state: Mutex::new(MockHostState {
                device,
                color_space: ColorSpace::Linear,
                target: RenderTargetBinding::DEFAULT,
                next_ptr: 0x1000,
                fail_surface_creation: false,
                calls: Vec::new(),
            }),
            live_surfaces: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_device(&self, device: GraphicsDeviceType) {
        self.state.lock().unwrap().device = device;
    }

    pub fn set_color_space(&self, color_space: ColorSpace) {
        self.state.lock().unwrap().color_space = color_space;
    }

    pub fn set_fail_surface_creation(&self, fail: bool) {
        self.state.lock().unwrap().fail_surface_creation = fail;
    }

    pub fn live_surface_count(&self) -> usize {
        self.live_surfaces.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn issued_events(&self) -> Vec<EventId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::IssueEvent(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn draws(&self) -> Vec<RecordedDraw> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Draw(draw) => Some(draw),
                _ => None,
            })
            .collect()
    }
}

impl GraphicsHost for MockGraphicsHost {
    fn device_type(&self) -> GraphicsDeviceType {
        self.state.lock().unwrap().device
    }

    fn color_space(&self) -> ColorSpace {
        self.state.lock().unwrap().color_space
    }

    fn create_surface(&self, desc: &SurfaceDesc) -> Result<Box<dyn Surface>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_surface_creation {
            engine_bail!("hvr::MockGraphicsHost", BackendError, "Cannot allocate surface '{}'", desc.name);
        }

        state.calls.push(HostCall::CreateSurface(desc.clone()));
        let ptr = NativeTexturePtr(state.next_ptr);
        state.next_ptr += 1;
        self.live_surfaces.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(MockSurface {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            ptr,
            live: Arc::clone(&self.live_surfaces),
        }))
    }

    fn discard_contents(&self, surface: &dyn Surface) {
        self.state.lock().unwrap().calls.push(HostCall::Discard(surface.native_ptr()));
    }

    fn render_target(&self) -> RenderTargetBinding {
        self.state.lock().unwrap().target
    }

    fn set_render_target(&self, target: RenderTargetBinding) {
        let mut state = self.state.lock().unwrap();
        state.target = target;
        state.calls.push(HostCall::SetRenderTarget(target));
    }

    fn clear(&self, color: [f32; 4], depth: f32) {
        self.state.lock().unwrap().calls.push(HostCall::Clear { color, depth });
    }

    fn draw_full_screen(&self, draw: &FullScreenDraw) {
        self.state.lock().unwrap().calls.push(HostCall::Draw(RecordedDraw {
            material: draw.material,
            color: draw.color,
            depth: draw.depth,
            inverse_view_projection: draw.inverse_view_projection,
            screen_space_shadow: draw.screen_space_shadow,
        }));
    }

    fn issue_plugin_event(&self, event: EventId) {
        self.state.lock().unwrap().calls.push(HostCall::IssueEvent(event));
    }
}

// ============================================================================
// Mock Camera
// ============================================================================

pub struct MockCameraState {
    pub alive: bool,
    pub width: u32,
    pub height: u32,
    pub world_to_camera: Mat4,
    pub projection: Mat4,
    pub near: f32,
    pub far: f32,
    pub rendering_path: RenderingPath,
    pub hooks: FxHashMap<CameraEvent, Vec<SharedCommandSequence>>,
}

pub struct MockCamera {
    pub state: Mutex<MockCameraState>,
}

impl MockCamera {
    /// Camera at z=5 looking at the origin
    pub fn new(width: u32, height: u32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Self {
            state: Mutex::new(MockCameraState {
                alive: true,
                width,
                height,
                world_to_camera: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
                projection: Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_3, aspect, 0.3, 1000.0),
                near: 0.3,
                far: 1000.0,
                rendering_path: RenderingPath::Forward,
                hooks: FxHashMap::default(),
            }),
        }
    }

    pub fn set_size(&self, width: u32, height: u32) {
        let mut state = self.state.lock().unwrap();
        state.width = width;
        state.height = height;
    }

    pub fn set_alive(&self, alive: bool) {
        self.state.lock().unwrap().alive = alive;
    }

    pub fn set_rendering_path(&self, path: RenderingPath) {
        self.state.lock().unwrap().rendering_path = path;
    }

    /// Attach a sequence the core does not own (e.g. left over from a reload)
    pub fn attach_foreign(&self, event: CameraEvent, sequence: SharedCommandSequence) {
        self.state.lock().unwrap().hooks.entry(event).or_default().push(sequence);
    }

    pub fn hook(&self, event: CameraEvent) -> Vec<SharedCommandSequence> {
        self.state.lock().unwrap().hooks.get(&event).cloned().unwrap_or_default()
    }
}

impl HostCamera for MockCamera {
    fn is_alive(&self) -> bool {
        self.state.lock().unwrap().alive
    }

    fn pixel_width(&self) -> u32 {
        self.state.lock().unwrap().width
    }

    fn pixel_height(&self) -> u32 {
        self.state.lock().unwrap().height
    }

    fn world_to_camera(&self) -> Mat4 {
        self.state.lock().unwrap().world_to_camera
    }

    fn projection(&self) -> Mat4 {
        self.state.lock().unwrap().projection
    }

    fn near_clip(&self) -> f32 {
        self.state.lock().unwrap().near
    }

    fn far_clip(&self) -> f32 {
        self.state.lock().unwrap().far
    }

    fn rendering_path(&self) -> RenderingPath {
        self.state.lock().unwrap().rendering_path
    }

    fn command_sequence_names(&self, event: CameraEvent) -> Vec<String> {
        self.hook(event)
            .iter()
            .map(|sequence| sequence.lock().unwrap().name().to_string())
            .collect()
    }

    fn add_command_sequence(&self, event: CameraEvent, sequence: &SharedCommandSequence) {
        self.attach_foreign(event, Arc::clone(sequence));
    }

    fn remove_command_sequence(&self, event: CameraEvent, name: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(list) = state.hooks.get_mut(&event) {
            list.retain(|sequence| sequence.lock().unwrap().name() != name);
        }
    }

    fn is_sphere_visible(&self, sphere: &BoundingSphere) -> bool {
        let state = self.state.lock().unwrap();
        Frustum::from_view_projection(&(state.projection * state.world_to_camera))
            .intersects_sphere(sphere)
    }
}
