/// Host engine module - what the render core needs from the embedding engine

pub mod graphics_host;
pub mod host_camera;
pub mod frustum;

pub use graphics_host::*;
pub use host_camera::*;
pub use frustum::*;

// Mock host for tests (no GPU or engine required)
#[cfg(test)]
pub mod mock_host;
