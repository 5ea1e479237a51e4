use std::sync::Arc;
use crate::host::mock_host::{MockGraphicsHost, HostCall};
use crate::host::{GraphicsDeviceType, SurfaceFormat};
use crate::native::mock_native_renderer::MockNativeRenderer;
use crate::native::NativeRenderer;
use super::*;

fn setup() -> (Arc<MockNativeRenderer>, MockGraphicsHost) {
    (Arc::new(MockNativeRenderer::new()), MockGraphicsHost::new(GraphicsDeviceType::Direct3D11))
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_new_allocates_handle_only() {
    let (native, host) = setup();
    let fb = FrameBuffer::new(native.clone());

    assert!(fb.is_valid());
    assert_eq!(fb.width(), 0);
    assert_eq!(fb.height(), 0);
    assert!(fb.color_surface().is_none());
    assert!(fb.color_texture().is_null());
    assert_eq!(host.live_surface_count(), 0);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_allocates_surfaces_and_binds_native() {
    let (native, host) = setup();
    let mut fb = FrameBuffer::new(native.clone());

    assert!(fb.resize(&host, 640, 480).unwrap());

    let color = fb.color_surface().unwrap();
    let depth = fb.depth_surface().unwrap();
    assert_eq!((color.width(), color.height()), (640, 480));
    assert_eq!(color.format(), SurfaceFormat::Rgba8);
    assert_eq!(depth.format(), SurfaceFormat::Depth16);

    let state = native.frame_buffer_state(fb.handle()).unwrap();
    assert_eq!((state.width, state.height), (640, 480));
    assert_eq!(state.color, fb.color_texture());
    assert_eq!(state.depth, fb.depth_texture());
    assert_eq!(state.size, [640.0, 480.0]);
    assert_eq!(host.live_surface_count(), 2);
}

#[test]
fn test_resize_same_size_is_noop() {
    let (native, host) = setup();
    let mut fb = FrameBuffer::new(native);

    assert!(fb.resize(&host, 800, 600).unwrap());
    let color_before = fb.color_texture();
    let depth_before = fb.depth_texture();
    host.clear_calls();

    assert!(!fb.resize(&host, 800, 600).unwrap());
    assert_eq!(fb.color_texture(), color_before);
    assert_eq!(fb.depth_texture(), depth_before);
    assert!(host.calls().is_empty());
}

#[test]
fn test_resize_to_new_size_replaces_surfaces() {
    let (native, host) = setup();
    let mut fb = FrameBuffer::new(native);

    fb.resize(&host, 800, 600).unwrap();
    let old_color = fb.color_texture();

    assert!(fb.resize(&host, 1024, 768).unwrap());
    assert_ne!(fb.color_texture(), old_color);
    assert_eq!(fb.color_surface().unwrap().width(), 1024);
    assert_eq!(fb.depth_surface().unwrap().height(), 768);
    assert_eq!((fb.width(), fb.height()), (1024, 768));

    // Old pair released before the new one was allocated
    assert_eq!(host.live_surface_count(), 2);
}

#[test]
fn test_resize_failure_surfaces_error() {
    let (native, host) = setup();
    let mut fb = FrameBuffer::new(native);

    host.set_fail_surface_creation(true);
    assert!(fb.resize(&host, 256, 256).is_err());
    assert_eq!(fb.width(), 0);
    assert!(fb.color_surface().is_none());

    host.set_fail_surface_creation(false);
    assert!(fb.resize(&host, 256, 256).unwrap());
}

#[test]
fn test_recreate_reallocates_at_same_size() {
    let (native, host) = setup();
    let mut fb = FrameBuffer::new(native);

    fb.resize(&host, 320, 200).unwrap();
    let old_color = fb.color_texture();

    fb.recreate(&host, 320, 200).unwrap();
    assert_ne!(fb.color_texture(), old_color);
    assert_eq!(host.live_surface_count(), 2);
}

// ============================================================================
// Discard / destroy
// ============================================================================

#[test]
fn test_discard_contents_hints_both_surfaces() {
    let (native, host) = setup();
    let mut fb = FrameBuffer::new(native);
    fb.resize(&host, 64, 64).unwrap();
    host.clear_calls();

    fb.discard_contents(&host);

    assert_eq!(host.calls(), vec![
        HostCall::Discard(fb.color_texture()),
        HostCall::Discard(fb.depth_texture()),
    ]);
}

#[test]
fn test_destroy_is_idempotent() {
    let (native, host) = setup();
    let mut fb = FrameBuffer::new(native.clone());
    let handle = fb.handle();
    fb.resize(&host, 64, 64).unwrap();

    fb.destroy();
    fb.destroy();

    assert!(fb.is_destroyed());
    assert!(!native.frame_buffer_is_valid(handle));
    assert_eq!(host.live_surface_count(), 0);
    assert!(fb.resize(&host, 32, 32).is_err());
}

#[test]
fn test_destroy_never_sized() {
    let (native, _host) = setup();
    let mut fb = FrameBuffer::new(native.clone());
    let handle = fb.handle();

    fb.destroy();
    assert!(native.was_deleted(handle.0));
}

#[test]
fn test_drop_releases_everything() {
    let (native, host) = setup();
    let handle = {
        let mut fb = FrameBuffer::new(native.clone());
        fb.resize(&host, 64, 64).unwrap();
        fb.handle()
    };

    assert!(!native.frame_buffer_is_valid(handle));
    assert_eq!(host.live_surface_count(), 0);
}

// ============================================================================
// Weak reference
// ============================================================================

#[test]
fn test_weak_ref_stops_resolving_after_destroy() {
    let (native, _host) = setup();
    let mut fb = FrameBuffer::new(native);
    let weak = fb.weak_ref();

    assert_eq!(weak.handle(), Some(fb.handle()));
    assert!(weak.is_alive());

    fb.destroy();
    assert_eq!(weak.handle(), None);
    assert!(!weak.is_alive());
    assert!(fb.weak_ref().handle().is_none());
}
