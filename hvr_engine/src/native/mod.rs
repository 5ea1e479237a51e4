/// Native renderer module - the boundary to the volumetric playback library

pub mod native_renderer;
pub mod convert;

pub use native_renderer::*;
pub use convert::*;

// Mock native renderer for tests (no native library required)
#[cfg(test)]
pub mod mock_native_renderer;
