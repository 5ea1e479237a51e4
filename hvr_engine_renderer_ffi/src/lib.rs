/*!
# HVR Engine - Native Renderer Backend

`NativeRenderer` implementation over the flat C function table exported by
the native volumetric playback library.

The library fills an `HvrFunctionTable` at load time; `FfiNativeRenderer`
checks its ABI version and entries, then forwards every call. Build with the
`native-call-trace` feature to count and log native calls.
*/

mod ffi_table;
mod ffi_renderer;

#[cfg(feature = "native-call-trace")]
mod debug;

pub use ffi_table::{HvrBounds, HvrFunctionTable, HVR_ABI_VERSION, STAT_NAME_CAPACITY};
pub use ffi_renderer::{FfiNativeRenderer, Config};

// Re-export call tracing utilities
#[cfg(feature = "native-call-trace")]
pub use debug::{get_call_stats, reset_call_stats, print_call_stats_report};

// Main hvr namespace module
pub mod hvr {
    pub use crate::ffi_table::{HvrBounds, HvrFunctionTable, HVR_ABI_VERSION};
    pub use crate::ffi_renderer::{FfiNativeRenderer, Config};
}
