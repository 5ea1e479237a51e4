//! Camera module
//!
//! Per-camera orchestration: one [`CameraRenderer`] per host camera, holding
//! one [`RenderPackage`] per actor it renders.

mod render_mode;
mod render_package;
mod camera_renderer;

pub use render_mode::{RenderMode, ActorRenderMethod, RenderableActor, RecreateReasons};
pub use render_package::{RenderPackage, PackageState, DEPTH_TEXTURE_NAME};
pub use camera_renderer::{CameraRenderer, RenderPairKey};
