//! Render core configuration
//!
//! One plain struct with `Default`, threaded into the scheduler, camera
//! renderers, packages and shadow casters at construction time.

use crate::host::CameraEvent;

/// Prefix shared by every command sequence the core attaches to a camera.
///
/// Stale sequences left behind by a previous reload are found by scanning
/// a camera hook list for names starting with this prefix.
pub const COMMAND_SEQUENCE_PREFIX: &str = "8i_HvrActor_";

/// Largest swap chain the core builds (one viewport per directional cascade)
pub const MAX_VIEWPORTS: usize = 8;

/// Configuration for the render core
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Viewports per render package swap chain (2 = ping-pong)
    pub package_viewport_count: usize,

    /// Viewports in the camera-level swap chain (composite/direct modes)
    pub camera_viewport_count: usize,

    /// Viewports for directional shadow casters (one per cascade)
    pub directional_shadow_viewport_count: usize,

    /// Viewports for spot lights and each point light cube face
    pub shadow_viewport_count: usize,

    /// Name prefix for command sequences attached to camera hooks
    pub command_sequence_prefix: String,

    /// Camera hook the depth composite sequence is attached to
    pub composite_event: CameraEvent,

    /// Color used when the native renderer clears a bound frame buffer
    pub clear_color: [f32; 4],

    /// Depth used when the native renderer clears a bound frame buffer
    pub clear_depth: f32,

    /// Scale applied to actor transforms (authoring data is in centimeters)
    pub actor_scale_factor: f32,

    /// Accumulate per-camera and per-package timing statistics
    pub statistics_enabled: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            package_viewport_count: 2,
            camera_viewport_count: 2,
            directional_shadow_viewport_count: MAX_VIEWPORTS,
            shadow_viewport_count: 2,
            command_sequence_prefix: COMMAND_SEQUENCE_PREFIX.to_string(),
            composite_event: CameraEvent::AfterDepthTexture,
            clear_color: [0.0, 0.0, 0.0, 0.0],
            clear_depth: 1.0,
            actor_scale_factor: 0.01,
            statistics_enabled: true,
        }
    }
}
