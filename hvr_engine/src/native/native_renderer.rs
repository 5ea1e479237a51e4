/// NativeRenderer trait - the flat command surface of the playback library
///
/// Every object on the native side is addressed by a 32-bit handle. Handle 0
/// is the "none" value (used to unbind a frame buffer or clear an asset).
/// Render commands do not run when called: they return an [`EventId`] that the
/// caller must submit into the host GPU command stream, and the native side
/// executes it when the GPU stream reaches that point.

macro_rules! native_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            /// The "no object" handle
            pub const NONE: Self = Self(0);

            /// Whether this is the "no object" handle
            pub fn is_none(&self) -> bool {
                self.0 == 0
            }
        }
    };
}

native_handle!(
    /// Handle to a native actor (one placed instance of an asset)
    ActorHandle
);
native_handle!(
    /// Handle to a native asset (decoded volumetric clip)
    AssetHandle
);
native_handle!(
    /// Handle to a native frame buffer (color + depth texture pair)
    FrameBufferHandle
);
native_handle!(
    /// Handle to a native scene (set of actors rendered together)
    SceneHandle
);
native_handle!(
    /// Handle to a native viewport (camera parameters + render target)
    ViewportHandle
);

/// Opaque identifier of a deferred native render command
///
/// Submitted into the host command stream via
/// [`GraphicsHost::issue_plugin_event`](crate::host::GraphicsHost::issue_plugin_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(pub i32);

/// Native GPU texture pointer (host texture object as seen by the native side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeTexturePtr(pub usize);

impl NativeTexturePtr {
    pub const NULL: Self = Self(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// Which per-call aggregate to read from a tracked statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Max = 0,
    Min = 1,
    Avg = 2,
    Calls = 3,
}

/// Max/min/average triple of one tracked native statistic
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatValues {
    pub max: f32,
    pub min: f32,
    pub avg: f32,
}

/// Actor bounds as reported by the native side (native axis convention)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NativeBounds {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

/// Native playback renderer
///
/// Mirrors the stable flat C function table exported by the native library.
/// Matrices are passed as 16 floats in row-major order (see
/// [`matrix_to_native`](crate::native::matrix_to_native)).
///
/// Implementations must be callable from the render thread while other
/// threads enqueue deferred jobs, hence `Send + Sync` and `&self` receivers.
pub trait NativeRenderer: Send + Sync {
    // ===== PLAYER =====

    /// Initialize the native player. Returns false if the graphics API is unsupported.
    fn initialise(&self) -> bool;

    /// Advance the native clock to an absolute time (seconds)
    fn update(&self, absolute_time: f32);

    /// Release native objects whose handles were deleted
    fn garbage_collect(&self);

    // ===== ACTOR =====

    fn actor_create(&self) -> ActorHandle;
    fn actor_delete(&self, actor: ActorHandle);
    fn actor_is_valid(&self, actor: ActorHandle) -> bool;
    fn actor_set_asset(&self, actor: ActorHandle, asset: AssetHandle);
    fn actor_set_transform(&self, actor: ActorHandle, transform: &[f32; 16]);
    fn actor_set_visible(&self, actor: ActorHandle, visible: bool);
    fn actor_is_visible(&self, actor: ActorHandle) -> bool;
    /// Local bounds of the current frame (native axis convention, centimeters)
    fn actor_bounds(&self, actor: ActorHandle) -> NativeBounds;
    /// World-space axis-aligned bounds of the current frame
    fn actor_aabb(&self, actor: ActorHandle) -> NativeBounds;

    // ===== ASSET =====

    fn asset_create(&self, path: &str) -> AssetHandle;
    fn asset_delete(&self, asset: AssetHandle);
    fn asset_is_valid(&self, asset: AssetHandle) -> bool;

    // ===== FRAME BUFFER =====

    fn frame_buffer_create(&self) -> FrameBufferHandle;
    fn frame_buffer_delete(&self, frame_buffer: FrameBufferHandle);
    fn frame_buffer_is_valid(&self, frame_buffer: FrameBufferHandle) -> bool;
    fn frame_buffer_set_textures(
        &self,
        frame_buffer: FrameBufferHandle,
        width: u32,
        height: u32,
        color: NativeTexturePtr,
        depth: NativeTexturePtr,
    );
    fn frame_buffer_set_size(&self, frame_buffer: FrameBufferHandle, size: [f32; 2]);

    // ===== SCENE =====

    fn scene_create(&self) -> SceneHandle;
    fn scene_delete(&self, scene: SceneHandle);
    fn scene_is_valid(&self, scene: SceneHandle) -> bool;
    fn scene_attach_actor(&self, scene: SceneHandle, actor: ActorHandle);
    fn scene_detach_actor(&self, scene: SceneHandle, actor: ActorHandle);
    fn scene_contains_actor(&self, scene: SceneHandle, actor: ActorHandle) -> bool;

    // ===== VIEWPORT =====

    fn viewport_create(&self) -> ViewportHandle;
    fn viewport_delete(&self, viewport: ViewportHandle);
    fn viewport_is_valid(&self, viewport: ViewportHandle) -> bool;
    fn viewport_set_view_matrix(&self, viewport: ViewportHandle, view: &[f32; 16]);
    fn viewport_set_proj_matrix(&self, viewport: ViewportHandle, projection: &[f32; 16]);
    fn viewport_set_near_far(&self, viewport: ViewportHandle, near: f32, far: f32);
    fn viewport_set_dimensions(&self, viewport: ViewportHandle, x: f32, y: f32, width: f32, height: f32);
    fn viewport_set_frame_buffer(&self, viewport: ViewportHandle, frame_buffer: FrameBufferHandle);

    // ===== DEFERRED RENDER EVENTS =====

    fn prepare_render_event(&self, scene: SceneHandle) -> EventId;
    fn render_event(&self, scene: SceneHandle, viewport: ViewportHandle) -> EventId;
    fn render_actor_event(&self, actor: ActorHandle, viewport: ViewportHandle) -> EventId;
    fn frame_buffer_clear_event(
        &self,
        frame_buffer: FrameBufferHandle,
        color: [f32; 4],
        depth: f32,
    ) -> EventId;
    fn begin_frame_event(&self) -> EventId;
    fn end_frame_event(&self) -> EventId;

    // ===== STATISTICS =====

    fn statistics_tracked_value_count(&self) -> u32;
    fn statistics_tracked_value_name(&self, index: u32) -> Option<String>;
    fn statistics_per_call(&self, name: &str, stat: StatKind) -> f32;
}
