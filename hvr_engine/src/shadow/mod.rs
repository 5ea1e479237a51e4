/// Shadow module - viewports for rendering actors into light shadow maps

pub mod shadow_caster;

pub use shadow_caster::*;
