/// Mock native renderer for unit tests (no native library required)
///
/// Allocates handles from a counter, keeps per-object state in maps and
/// records every deferred event so tests can inspect what would have been
/// submitted to the GPU stream.

use std::sync::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{
    NativeRenderer, ActorHandle, AssetHandle, FrameBufferHandle, SceneHandle,
    ViewportHandle, EventId, NativeTexturePtr, StatKind, NativeBounds,
};

// ============================================================================
// Recorded state
// ============================================================================

/// Deferred event created through the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockEvent {
    Prepare { scene: SceneHandle },
    Render { scene: SceneHandle, viewport: ViewportHandle },
    RenderActor { actor: ActorHandle, viewport: ViewportHandle },
    Clear { frame_buffer: FrameBufferHandle, color: [f32; 4], depth: f32 },
    BeginFrame,
    EndFrame,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockViewportState {
    pub view: [f32; 16],
    pub projection: [f32; 16],
    pub near: f32,
    pub far: f32,
    pub rect: [f32; 4],
    pub frame_buffer: FrameBufferHandle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockFrameBufferState {
    pub width: u32,
    pub height: u32,
    pub color: NativeTexturePtr,
    pub depth: NativeTexturePtr,
    pub size: [f32; 2],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockActorState {
    pub asset: AssetHandle,
    pub transform: Option<[f32; 16]>,
    pub visible: bool,
    pub bounds: NativeBounds,
    pub aabb: NativeBounds,
}

#[derive(Debug, Default)]
pub struct MockNativeState {
    pub next_handle: u32,
    pub initialise_result: bool,
    pub updates: Vec<f32>,
    pub garbage_collections: u32,
    pub events: Vec<MockEvent>,
    pub actors: FxHashMap<ActorHandle, MockActorState>,
    pub assets: FxHashMap<AssetHandle, String>,
    pub frame_buffers: FxHashMap<FrameBufferHandle, MockFrameBufferState>,
    pub scenes: FxHashMap<SceneHandle, Vec<ActorHandle>>,
    pub viewports: FxHashMap<ViewportHandle, MockViewportState>,
    pub deleted: FxHashSet<u32>,
    pub stats: Vec<(String, f32, f32, f32)>,
}

// ============================================================================
// Mock Native Renderer
// ============================================================================

pub struct MockNativeRenderer {
    pub state: Mutex<MockNativeState>,
}

impl MockNativeRenderer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockNativeState {
                next_handle: 1,
                initialise_result: true,
                ..Default::default()
            }),
        }
    }

    /// Mock whose `initialise` reports an unsupported graphics API
    pub fn unsupported() -> Self {
        let mock = Self::new();
        mock.state.lock().unwrap().initialise_result = false;
        mock
    }

    fn allocate(&self) -> u32 {
        let mut state = self.state.lock().unwrap();
        let handle = state.next_handle;
        state.next_handle += 1;
        handle
    }

    fn push_event(&self, event: MockEvent) -> EventId {
        let mut state = self.state.lock().unwrap();
        state.events.push(event);
        EventId(state.events.len() as i32)
    }

    /// Event recorded for an id returned by one of the `*_event` methods
    pub fn event(&self, id: EventId) -> Option<MockEvent> {
        let state = self.state.lock().unwrap();
        usize::try_from(id.0 - 1).ok().and_then(|i| state.events.get(i).cloned())
    }

    pub fn events(&self) -> Vec<MockEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.lock().unwrap().events.clear();
    }

    pub fn viewport_state(&self, viewport: ViewportHandle) -> Option<MockViewportState> {
        self.state.lock().unwrap().viewports.get(&viewport).cloned()
    }

    pub fn frame_buffer_state(&self, frame_buffer: FrameBufferHandle) -> Option<MockFrameBufferState> {
        self.state.lock().unwrap().frame_buffers.get(&frame_buffer).cloned()
    }

    pub fn actor_state(&self, actor: ActorHandle) -> Option<MockActorState> {
        self.state.lock().unwrap().actors.get(&actor).cloned()
    }

    pub fn live_viewport_count(&self) -> usize {
        self.state.lock().unwrap().viewports.len()
    }

    pub fn live_frame_buffer_count(&self) -> usize {
        self.state.lock().unwrap().frame_buffers.len()
    }

    pub fn updates(&self) -> Vec<f32> {
        self.state.lock().unwrap().updates.clone()
    }

    /// Simulate the native side dropping a viewport (e.g. device reset)
    pub fn invalidate_viewport(&self, viewport: ViewportHandle) {
        self.state.lock().unwrap().viewports.remove(&viewport);
    }

    pub fn set_actor_bounds(&self, actor: ActorHandle, bounds: NativeBounds, aabb: NativeBounds) {
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.actors.get_mut(&actor) {
            entry.bounds = bounds;
            entry.aabb = aabb;
        }
    }

    pub fn add_stat(&self, name: &str, max: f32, min: f32, avg: f32) {
        self.state.lock().unwrap().stats.push((name.to_string(), max, min, avg));
    }

    pub fn was_deleted(&self, handle: u32) -> bool {
        self.state.lock().unwrap().deleted.contains(&handle)
    }
}

impl NativeRenderer for MockNativeRenderer {
    fn initialise(&self) -> bool {
        self.state.lock().unwrap().initialise_result
    }

    fn update(&self, absolute_time: f32) {
        self.state.lock().unwrap().updates.push(absolute_time);
    }

    fn garbage_collect(&self) {
        self.state.lock().unwrap().garbage_collections += 1;
    }

    // ===== ACTOR =====

    fn actor_create(&self) -> ActorHandle {
        let handle = ActorHandle(self.allocate());
        self.state.lock().unwrap().actors.insert(handle, MockActorState::default());
        handle
    }

    fn actor_delete(&self, actor: ActorHandle) {
        let mut state = self.state.lock().unwrap();
        state.actors.remove(&actor);
        state.deleted.insert(actor.0);
    }

    fn actor_is_valid(&self, actor: ActorHandle) -> bool {
        self.state.lock().unwrap().actors.contains_key(&actor)
    }

    fn actor_set_asset(&self, actor: ActorHandle, asset: AssetHandle) {
        if let Some(entry) = self.state.lock().unwrap().actors.get_mut(&actor) {
            entry.asset = asset;
        }
    }

    fn actor_set_transform(&self, actor: ActorHandle, transform: &[f32; 16]) {
        if let Some(entry) = self.state.lock().unwrap().actors.get_mut(&actor) {
            entry.transform = Some(*transform);
        }
    }

    fn actor_set_visible(&self, actor: ActorHandle, visible: bool) {
        if let Some(entry) = self.state.lock().unwrap().actors.get_mut(&actor) {
            entry.visible = visible;
        }
    }

    fn actor_is_visible(&self, actor: ActorHandle) -> bool {
        self.state.lock().unwrap().actors.get(&actor).map(|a| a.visible).unwrap_or(false)
    }

    fn actor_bounds(&self, actor: ActorHandle) -> NativeBounds {
        self.state.lock().unwrap().actors.get(&actor).map(|a| a.bounds).unwrap_or_default()
    }

    fn actor_aabb(&self, actor: ActorHandle) -> NativeBounds {
        self.state.lock().unwrap().actors.get(&actor).map(|a| a.aabb).unwrap_or_default()
    }

    // ===== ASSET =====

    fn asset_create(&self, path: &str) -> AssetHandle {
        let handle = AssetHandle(self.allocate());
        self.state.lock().unwrap().assets.insert(handle, path.to_string());
        handle
    }

    fn asset_delete(&self, asset: AssetHandle) {
        let mut state = self.state.lock().unwrap();
        state.assets.remove(&asset);
        state.deleted.insert(asset.0);
    }

    fn asset_is_valid(&self, asset: AssetHandle) -> bool {
        self.state.lock().unwrap().assets.contains_key(&asset)
    }

    // ===== FRAME BUFFER =====

    fn frame_buffer_create(&self) -> FrameBufferHandle {
        let handle = FrameBufferHandle(self.allocate());
        self.state.lock().unwrap().frame_buffers.insert(handle, MockFrameBufferState::default());
        handle
    }

    fn frame_buffer_delete(&self, frame_buffer: FrameBufferHandle) {
        let mut state = self.state.lock().unwrap();
        state.frame_buffers.remove(&frame_buffer);
        state.deleted.insert(frame_buffer.0);
    }

    fn frame_buffer_is_valid(&self, frame_buffer: FrameBufferHandle) -> bool {
        self.state.lock().unwrap().frame_buffers.contains_key(&frame_buffer)
    }

    fn frame_buffer_set_textures(
        &self,
        frame_buffer: FrameBufferHandle,
        width: u32,
        height: u32,
        color: NativeTexturePtr,
        depth: NativeTexturePtr,
    ) {
        if let Some(entry) = self.state.lock().unwrap().frame_buffers.get_mut(&frame_buffer) {
            entry.width = width;
            entry.height = height;
            entry.color = color;
            entry.depth = depth;
        }
    }

    fn frame_buffer_set_size(&self, frame_buffer: FrameBufferHandle, size: [f32; 2]) {
        if let Some(entry) = self.state.lock().unwrap().frame_buffers.get_mut(&frame_buffer) {
            entry.size = size;
        }
    }

    // ===== SCENE =====

    fn scene_create(&self) -> SceneHandle {
        let handle = SceneHandle(self.allocate());
        self.state.lock().unwrap().scenes.insert(handle, Vec::new());
        handle
    }

    fn scene_delete(&self, scene: SceneHandle) {
        let mut state = self.state.lock().unwrap();
        state.scenes.remove(&scene);
        state.deleted.insert(scene.0);
    }

    fn scene_is_valid(&self, scene: SceneHandle) -> bool {
        self.state.lock().unwrap().scenes.contains_key(&scene)
    }

    fn scene_attach_actor(&self, scene: SceneHandle, actor: ActorHandle) {
        if let Some(actors) = self.state.lock().unwrap().scenes.get_mut(&scene) {
            if !actors.contains(&actor) {
                actors.push(actor);
            }
        }
    }

    fn scene_detach_actor(&self, scene: SceneHandle, actor: ActorHandle) {
        if let Some(actors) = self.state.lock().unwrap().scenes.get_mut(&scene) {
            actors.retain(|a| *a != actor);
        }
    }

    fn scene_contains_actor(&self, scene: SceneHandle, actor: ActorHandle) -> bool {
        self.state.lock().unwrap().scenes.get(&scene).map(|a| a.contains(&actor)).unwrap_or(false)
    }

    // ===== VIEWPORT =====

    fn viewport_create(&self) -> ViewportHandle {
        let handle = ViewportHandle(self.allocate());
        self.state.lock().unwrap().viewports.insert(handle, MockViewportState::default());
        handle
    }

    fn viewport_delete(&self, viewport: ViewportHandle) {
        let mut state = self.state.lock().unwrap();
        state.viewports.remove(&viewport);
        state.deleted.insert(viewport.0);
    }

    fn viewport_is_valid(&self, viewport: ViewportHandle) -> bool {
        self.state.lock().unwrap().viewports.contains_key(&viewport)
    }

    fn viewport_set_view_matrix(&self, viewport: ViewportHandle, view: &[f32; 16]) {
        if let Some(entry) = self.state.lock().unwrap().viewports.get_mut(&viewport) {
            entry.view = *view;
        }
    }

    fn viewport_set_proj_matrix(&self, viewport: ViewportHandle, projection: &[f32; 16]) {
        if let Some(entry) = self.state.lock().unwrap().viewports.get_mut(&viewport) {
            entry.projection = *projection;
        }
    }

    fn viewport_set_near_far(&self, viewport: ViewportHandle, near: f32, far: f32) {
        if let Some(entry) = self.state.lock().unwrap().viewports.get_mut(&viewport) {
            entry.near = near;
            entry.far = far;
        }
    }

    fn viewport_set_dimensions(&self, viewport: ViewportHandle, x: f32, y: f32, width: f32, height: f32) {
        if let Some(entry) = self.state.lock().unwrap().viewports.get_mut(&viewport) {
            entry.rect = [x, y, width, height];
        }
    }

    fn viewport_set_frame_buffer(&self, viewport: ViewportHandle, frame_buffer: FrameBufferHandle) {
        if let Some(entry) = self.state.lock().unwrap().viewports.get_mut(&viewport) {
            entry.frame_buffer = frame_buffer;
        }
    }

    // ===== DEFERRED RENDER EVENTS =====

    fn prepare_render_event(&self, scene: SceneHandle) -> EventId {
        self.push_event(MockEvent::Prepare { scene })
    }

    fn render_event(&self, scene: SceneHandle, viewport: ViewportHandle) -> EventId {
        self.push_event(MockEvent::Render { scene, viewport })
    }

    fn render_actor_event(&self, actor: ActorHandle, viewport: ViewportHandle) -> EventId {
        self.push_event(MockEvent::RenderActor { actor, viewport })
    }

    fn frame_buffer_clear_event(&self, frame_buffer: FrameBufferHandle, color: [f32; 4], depth: f32) -> EventId {
        self.push_event(MockEvent::Clear { frame_buffer, color, depth })
    }

    fn begin_frame_event(&self) -> EventId {
        self.push_event(MockEvent::BeginFrame)
    }

    fn end_frame_event(&self) -> EventId {
        self.push_event(MockEvent::EndFrame)
    }

    // ===== STATISTICS =====

    fn statistics_tracked_value_count(&self) -> u32 {
        self.state.lock().unwrap().stats.len() as u32
    }

    fn statistics_tracked_value_name(&self, index: u32) -> Option<String> {
        self.state.lock().unwrap().stats.get(index as usize).map(|s| s.0.clone())
    }

    fn statistics_per_call(&self, name: &str, stat: StatKind) -> f32 {
        let state = self.state.lock().unwrap();
        state.stats.iter().find(|s| s.0 == name).map(|s| match stat {
            StatKind::Max => s.1,
            StatKind::Min => s.2,
            StatKind::Avg => s.3,
            StatKind::Calls => 1.0,
        }).unwrap_or(0.0)
    }
}
