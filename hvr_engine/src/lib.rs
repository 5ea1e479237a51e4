/*!
# HVR Engine

Host-side bridge between a game engine and the native volumetric video renderer.

The native renderer owns decoding and drawing of volumetric captures. This crate
drives it from the host's render loop: it mirrors scene objects into native
handles, schedules per-frame preparation, and hooks host cameras so actors
appear in the host's image.

## Architecture

- **NativeRenderer**: Trait over the native plugin's handle API and render events
- **GraphicsHost / HostCamera**: Traits over the host engine's graphics state and cameras
- **RenderScheduler**: Once-per-frame preparation, render event submission, statistics
- **Scene / Actor / Asset**: Owned native handles with host transform conversion
- **CameraRenderer**: Per-camera actor packages in standard, composite or direct mode
- **ShadowCaster**: Shadow-map viewports for directional, spot and point lights
*/

// Internal modules
mod error;
mod config;
pub mod log;
pub mod native;
pub mod host;
pub mod render;
pub mod scheduler;
pub mod scene;
pub mod camera;
pub mod shadow;

// Main hvr namespace module
pub mod hvr {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration and limits
    pub use crate::config::*;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
    }

    // Native renderer trait, handles and conversions
    pub mod native {
        pub use crate::native::*;
    }

    // Host engine traits
    pub mod host {
        pub use crate::host::*;
    }

    // Frame buffers, viewports and swap chains
    pub mod render {
        pub use crate::render::*;
    }

    // Frame scheduling and deferred jobs
    pub mod scheduler {
        pub use crate::scheduler::*;
    }

    // Scene, actors and assets
    pub mod scene {
        pub use crate::scene::*;
    }

    // Per-camera rendering
    pub mod camera {
        pub use crate::camera::*;
    }

    // Light shadow maps
    pub mod shadow {
        pub use crate::shadow::*;
    }
}

// Re-export math library at crate root
pub use glam;
