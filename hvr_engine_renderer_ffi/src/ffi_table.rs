/// HvrFunctionTable - flat C ABI exported by the native playback library
///
/// The library fills one table and hands it over at load time. Every entry
/// is nullable; `FfiNativeRenderer` refuses tables with missing entries when
/// validation is on.

use std::os::raw::{c_char, c_void};

/// Version of the table layout this crate was built against
pub const HVR_ABI_VERSION: u32 = 1;

/// Size of the buffer handed to `stats_tracked_value_name`
pub const STAT_NAME_CAPACITY: usize = 256;

/// Bounds as written by the native side (centimeters, native axes)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HvrBounds {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

macro_rules! function_table {
    ($(
        $(#[$meta:meta])*
        $name:ident : fn($($arg:ty),*) $(-> $ret:ty)?;
    )*) => {
        #[repr(C)]
        #[derive(Debug, Clone, Copy)]
        pub struct HvrFunctionTable {
            pub abi_version: u32,
            $(
                $(#[$meta])*
                pub $name: Option<unsafe extern "C" fn($($arg),*) $(-> $ret)?>,
            )*
        }

        impl HvrFunctionTable {
            /// Table of the current ABI version with every entry null
            pub const fn empty() -> Self {
                Self {
                    abi_version: HVR_ABI_VERSION,
                    $($name: None,)*
                }
            }

            /// Names of the null entries, in declaration order
            pub fn missing_entries(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(
                    if self.$name.is_none() {
                        missing.push(stringify!($name));
                    }
                )*
                missing
            }
        }

        impl Default for HvrFunctionTable {
            fn default() -> Self {
                Self::empty()
            }
        }
    };
}

function_table! {
    // ===== PLAYER =====
    initialise: fn() -> bool;
    update: fn(f32);
    garbage_collect: fn();

    // ===== ACTOR =====
    actor_create: fn() -> u32;
    actor_delete: fn(u32);
    actor_is_valid: fn(u32) -> bool;
    actor_set_asset: fn(u32, u32);
    /// Row-major 4x4 matrix, 16 floats
    actor_set_transform: fn(u32, *const f32);
    actor_set_visible: fn(u32, bool);
    actor_is_visible: fn(u32) -> bool;
    actor_get_bounds: fn(u32, *mut HvrBounds);
    actor_get_aabb: fn(u32, *mut HvrBounds);

    // ===== ASSET =====
    /// NUL-terminated UTF-8 path
    asset_create: fn(*const c_char) -> u32;
    asset_delete: fn(u32);
    asset_is_valid: fn(u32) -> bool;

    // ===== FRAME BUFFER =====
    frame_buffer_create: fn() -> u32;
    frame_buffer_delete: fn(u32);
    frame_buffer_is_valid: fn(u32) -> bool;
    frame_buffer_set_textures: fn(u32, u32, u32, *mut c_void, *mut c_void);
    frame_buffer_set_size: fn(u32, f32, f32);

    // ===== SCENE =====
    scene_create: fn() -> u32;
    scene_delete: fn(u32);
    scene_is_valid: fn(u32) -> bool;
    scene_attach_actor: fn(u32, u32);
    scene_detach_actor: fn(u32, u32);
    scene_contains_actor: fn(u32, u32) -> bool;

    // ===== VIEWPORT =====
    viewport_create: fn() -> u32;
    viewport_delete: fn(u32);
    viewport_is_valid: fn(u32) -> bool;
    viewport_set_view_matrix: fn(u32, *const f32);
    viewport_set_proj_matrix: fn(u32, *const f32);
    viewport_set_near_far: fn(u32, f32, f32);
    viewport_set_dimensions: fn(u32, f32, f32, f32, f32);
    viewport_set_frame_buffer: fn(u32, u32);

    // ===== DEFERRED RENDER EVENTS =====
    prepare_render_event: fn(u32) -> i32;
    render_event: fn(u32, u32) -> i32;
    render_actor_event: fn(u32, u32) -> i32;
    /// Color is 4 floats
    frame_buffer_clear_event: fn(u32, *const f32, f32) -> i32;
    begin_frame_event: fn() -> i32;
    end_frame_event: fn() -> i32;

    // ===== STATISTICS =====
    stats_tracked_value_count: fn() -> u32;
    /// Writes a NUL-terminated name into the buffer; false when out of range
    stats_tracked_value_name: fn(u32, *mut c_char, u32) -> bool;
    stats_per_call: fn(*const c_char, i32) -> f32;
}

#[cfg(test)]
#[path = "ffi_table_tests.rs"]
mod tests;
