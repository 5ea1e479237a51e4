//! Scene module
//!
//! Owning wrappers over the native scene, actor and asset handles. Each
//! wrapper releases its handle when dropped.

mod scene;
mod actor;
mod asset;

pub use scene::Scene;
pub use actor::Actor;
pub use asset::Asset;

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
