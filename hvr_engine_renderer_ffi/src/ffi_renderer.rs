/// FfiNativeRenderer - NativeRenderer over the native library's function table

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use hvr_engine::hvr::native::{
    ActorHandle, AssetHandle, EventId, FrameBufferHandle, NativeBounds, NativeRenderer,
    NativeTexturePtr, SceneHandle, StatKind, ViewportHandle,
};
use hvr_engine::hvr::Result;
use hvr_engine::{engine_bail, engine_error, engine_info};
use crate::ffi_table::{HvrBounds, HvrFunctionTable, HVR_ABI_VERSION, STAT_NAME_CAPACITY};

/// Backend configuration
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Trace every native call through the engine logger
    /// (needs the `native-call-trace` feature)
    pub log_native_calls: bool,
    /// Refuse tables with null entries
    pub validate_table: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_native_calls: false,
            validate_table: true,
        }
    }
}

/// Call a table entry, or fall back to `default` when it is null
macro_rules! native_call {
    ($self:ident, $name:ident ( $($arg:expr),* ) or $default:expr) => {{
        $self.trace(stringify!($name));
        match $self.table.$name {
            // SAFETY: entries come from the native library and follow the
            // HvrFunctionTable ABI; pointer arguments outlive the call
            Some(function) => unsafe { function($($arg),*) },
            None => $default,
        }
    }};
}

pub struct FfiNativeRenderer {
    table: HvrFunctionTable,
    config: Config,
}

impl FfiNativeRenderer {
    pub fn new(table: HvrFunctionTable, config: Config) -> Result<Self> {
        if table.abi_version != HVR_ABI_VERSION {
            engine_bail!("hvr::ffi", InitializationFailed,
                "Native ABI version {} does not match expected {}", table.abi_version, HVR_ABI_VERSION);
        }

        if config.validate_table {
            let missing = table.missing_entries();
            if !missing.is_empty() {
                engine_bail!("hvr::ffi", InitializationFailed,
                    "Native function table is missing {} entries: {}", missing.len(), missing.join(", "));
            }
        }

        engine_info!("hvr::ffi", "Native renderer bound (ABI v{})", table.abi_version);
        Ok(Self { table, config })
    }

    /// Copy the table behind `table`
    ///
    /// # Safety
    ///
    /// `table` must be null or point to a readable `HvrFunctionTable`.
    pub unsafe fn from_raw(table: *const HvrFunctionTable, config: Config) -> Result<Self> {
        if table.is_null() {
            engine_bail!("hvr::ffi", InvalidParameter, "Native function table pointer is null");
        }
        Self::new(*table, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(feature = "native-call-trace")]
    fn trace(&self, name: &'static str) {
        crate::debug::record_call(name);
        if self.config.log_native_calls {
            hvr_engine::engine_trace!("hvr::ffi", "{}", name);
        }
    }

    #[cfg(not(feature = "native-call-trace"))]
    #[inline(always)]
    fn trace(&self, _name: &'static str) {}

    fn bounds(&self, actor: ActorHandle, aabb: bool) -> NativeBounds {
        let mut out = HvrBounds::default();
        let ptr: *mut HvrBounds = &mut out;
        if aabb {
            native_call!(self, actor_get_aabb(actor.0, ptr) or ());
        } else {
            native_call!(self, actor_get_bounds(actor.0, ptr) or ());
        }
        NativeBounds {
            center: out.center,
            size: out.size,
        }
    }
}

fn texture_ptr(texture: NativeTexturePtr) -> *mut c_void {
    texture.0 as *mut c_void
}

impl NativeRenderer for FfiNativeRenderer {
    // ===== PLAYER =====

    fn initialise(&self) -> bool {
        native_call!(self, initialise() or false)
    }

    fn update(&self, absolute_time: f32) {
        native_call!(self, update(absolute_time) or ())
    }

    fn garbage_collect(&self) {
        native_call!(self, garbage_collect() or ())
    }

    // ===== ACTOR =====

    fn actor_create(&self) -> ActorHandle {
        ActorHandle(native_call!(self, actor_create() or 0))
    }

    fn actor_delete(&self, actor: ActorHandle) {
        native_call!(self, actor_delete(actor.0) or ())
    }

    fn actor_is_valid(&self, actor: ActorHandle) -> bool {
        native_call!(self, actor_is_valid(actor.0) or false)
    }

    fn actor_set_asset(&self, actor: ActorHandle, asset: AssetHandle) {
        native_call!(self, actor_set_asset(actor.0, asset.0) or ())
    }

    fn actor_set_transform(&self, actor: ActorHandle, transform: &[f32; 16]) {
        native_call!(self, actor_set_transform(actor.0, transform.as_ptr()) or ())
    }

    fn actor_set_visible(&self, actor: ActorHandle, visible: bool) {
        native_call!(self, actor_set_visible(actor.0, visible) or ())
    }

    fn actor_is_visible(&self, actor: ActorHandle) -> bool {
        native_call!(self, actor_is_visible(actor.0) or false)
    }

    fn actor_bounds(&self, actor: ActorHandle) -> NativeBounds {
        self.bounds(actor, false)
    }

    fn actor_aabb(&self, actor: ActorHandle) -> NativeBounds {
        self.bounds(actor, true)
    }

    // ===== ASSET =====

    fn asset_create(&self, path: &str) -> AssetHandle {
        let Ok(path) = CString::new(path) else {
            engine_error!("hvr::ffi", "Asset path contains a NUL byte: {:?}", path);
            return AssetHandle::NONE;
        };
        AssetHandle(native_call!(self, asset_create(path.as_ptr()) or 0))
    }

    fn asset_delete(&self, asset: AssetHandle) {
        native_call!(self, asset_delete(asset.0) or ())
    }

    fn asset_is_valid(&self, asset: AssetHandle) -> bool {
        native_call!(self, asset_is_valid(asset.0) or false)
    }

    // ===== FRAME BUFFER =====

    fn frame_buffer_create(&self) -> FrameBufferHandle {
        FrameBufferHandle(native_call!(self, frame_buffer_create() or 0))
    }

    fn frame_buffer_delete(&self, frame_buffer: FrameBufferHandle) {
        native_call!(self, frame_buffer_delete(frame_buffer.0) or ())
    }

    fn frame_buffer_is_valid(&self, frame_buffer: FrameBufferHandle) -> bool {
        native_call!(self, frame_buffer_is_valid(frame_buffer.0) or false)
    }

    fn frame_buffer_set_textures(
        &self,
        frame_buffer: FrameBufferHandle,
        width: u32,
        height: u32,
        color: NativeTexturePtr,
        depth: NativeTexturePtr,
    ) {
        native_call!(self, frame_buffer_set_textures(
            frame_buffer.0, width, height, texture_ptr(color), texture_ptr(depth)
        ) or ())
    }

    fn frame_buffer_set_size(&self, frame_buffer: FrameBufferHandle, size: [f32; 2]) {
        native_call!(self, frame_buffer_set_size(frame_buffer.0, size[0], size[1]) or ())
    }

    // ===== SCENE =====

    fn scene_create(&self) -> SceneHandle {
        SceneHandle(native_call!(self, scene_create() or 0))
    }

    fn scene_delete(&self, scene: SceneHandle) {
        native_call!(self, scene_delete(scene.0) or ())
    }

    fn scene_is_valid(&self, scene: SceneHandle) -> bool {
        native_call!(self, scene_is_valid(scene.0) or false)
    }

    fn scene_attach_actor(&self, scene: SceneHandle, actor: ActorHandle) {
        native_call!(self, scene_attach_actor(scene.0, actor.0) or ())
    }

    fn scene_detach_actor(&self, scene: SceneHandle, actor: ActorHandle) {
        native_call!(self, scene_detach_actor(scene.0, actor.0) or ())
    }

    fn scene_contains_actor(&self, scene: SceneHandle, actor: ActorHandle) -> bool {
        native_call!(self, scene_contains_actor(scene.0, actor.0) or false)
    }

    // ===== VIEWPORT =====

    fn viewport_create(&self) -> ViewportHandle {
        ViewportHandle(native_call!(self, viewport_create() or 0))
    }

    fn viewport_delete(&self, viewport: ViewportHandle) {
        native_call!(self, viewport_delete(viewport.0) or ())
    }

    fn viewport_is_valid(&self, viewport: ViewportHandle) -> bool {
        native_call!(self, viewport_is_valid(viewport.0) or false)
    }

    fn viewport_set_view_matrix(&self, viewport: ViewportHandle, view: &[f32; 16]) {
        native_call!(self, viewport_set_view_matrix(viewport.0, view.as_ptr()) or ())
    }

    fn viewport_set_proj_matrix(&self, viewport: ViewportHandle, projection: &[f32; 16]) {
        native_call!(self, viewport_set_proj_matrix(viewport.0, projection.as_ptr()) or ())
    }

    fn viewport_set_near_far(&self, viewport: ViewportHandle, near: f32, far: f32) {
        native_call!(self, viewport_set_near_far(viewport.0, near, far) or ())
    }

    fn viewport_set_dimensions(&self, viewport: ViewportHandle, x: f32, y: f32, width: f32, height: f32) {
        native_call!(self, viewport_set_dimensions(viewport.0, x, y, width, height) or ())
    }

    fn viewport_set_frame_buffer(&self, viewport: ViewportHandle, frame_buffer: FrameBufferHandle) {
        native_call!(self, viewport_set_frame_buffer(viewport.0, frame_buffer.0) or ())
    }

    // ===== DEFERRED RENDER EVENTS =====

    fn prepare_render_event(&self, scene: SceneHandle) -> EventId {
        EventId(native_call!(self, prepare_render_event(scene.0) or 0))
    }

    fn render_event(&self, scene: SceneHandle, viewport: ViewportHandle) -> EventId {
        EventId(native_call!(self, render_event(scene.0, viewport.0) or 0))
    }

    fn render_actor_event(&self, actor: ActorHandle, viewport: ViewportHandle) -> EventId {
        EventId(native_call!(self, render_actor_event(actor.0, viewport.0) or 0))
    }

    fn frame_buffer_clear_event(
        &self,
        frame_buffer: FrameBufferHandle,
        color: [f32; 4],
        depth: f32,
    ) -> EventId {
        EventId(native_call!(self, frame_buffer_clear_event(frame_buffer.0, color.as_ptr(), depth) or 0))
    }

    fn begin_frame_event(&self) -> EventId {
        EventId(native_call!(self, begin_frame_event() or 0))
    }

    fn end_frame_event(&self) -> EventId {
        EventId(native_call!(self, end_frame_event() or 0))
    }

    // ===== STATISTICS =====

    fn statistics_tracked_value_count(&self) -> u32 {
        native_call!(self, stats_tracked_value_count() or 0)
    }

    fn statistics_tracked_value_name(&self, index: u32) -> Option<String> {
        let mut buffer = [0 as c_char; STAT_NAME_CAPACITY];
        let written = native_call!(self, stats_tracked_value_name(
            index, buffer.as_mut_ptr(), STAT_NAME_CAPACITY as u32
        ) or false);
        if !written {
            return None;
        }

        // Force termination in case the native side filled the whole buffer
        buffer[STAT_NAME_CAPACITY - 1] = 0;
        let bytes: Vec<u8> = buffer.iter().map(|c| *c as u8).collect();
        CStr::from_bytes_until_nul(&bytes)
            .ok()
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn statistics_per_call(&self, name: &str, stat: StatKind) -> f32 {
        let Ok(name) = CString::new(name) else {
            return 0.0;
        };
        native_call!(self, stats_per_call(name.as_ptr(), stat as i32) or 0.0)
    }
}
