/// Render module - GPU-resident objects shared with the native renderer

pub mod frame_buffer;
pub mod viewport;
pub mod swap_chain;
pub mod statistic;

pub use frame_buffer::*;
pub use viewport::*;
pub use swap_chain::*;
pub use statistic::*;
