/// ShadowCaster - renders the volumetric scene from a light's point of view
///
/// Keeps swap chains sized per light kind and issues one `render_camera`
/// per shadow pass:
///
/// - directional: one chain of up to 8 viewports, one per cascade (cascade
///   split math stays with the host, which passes ready viewport parameters)
/// - spot: one chain of 2 viewports
/// - point: six cube faces, each with its own chain of 2 and a fixed rotation
///
/// A light kind change drops the chains and builds the new set.

use std::sync::Arc;
use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::host::{GraphicsHost, RenderTargetBinding, gpu_projection_matrix};
use crate::native::NativeRenderer;
use crate::render::{ViewportSwapChain, ViewportDesc, ViewportRect};
use crate::scheduler::RenderScheduler;

/// Shadow maps are cleared to the farthest value before each pass
pub const SHADOW_CLEAR_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Directional,
    Spot,
    Point,
}

/// Faces of a point light shadow cube map, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveZ,
    NegativeZ,
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
    ];

    /// Euler angles in degrees (x, y, z) turning +Z towards the face
    pub fn euler_degrees(&self) -> Vec3 {
        match self {
            CubeFace::PositiveZ => Vec3::new(0.0, 0.0, 0.0),
            CubeFace::NegativeZ => Vec3::new(0.0, 180.0, 0.0),
            CubeFace::PositiveX => Vec3::new(0.0, 90.0, 0.0),
            CubeFace::NegativeX => Vec3::new(0.0, 270.0, 0.0),
            CubeFace::PositiveY => Vec3::new(-90.0, 0.0, 0.0),
            CubeFace::NegativeY => Vec3::new(90.0, 0.0, 0.0),
        }
    }

    /// Host rotation convention: Z first, then X, then Y
    pub fn rotation(&self) -> Quat {
        let e = self.euler_degrees();
        Quat::from_euler(
            EulerRot::YXZ,
            e.y.to_radians(),
            e.x.to_radians(),
            e.z.to_radians(),
        )
    }
}

/// Light parameters for one shadow render
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLight {
    pub kind: LightKind,
    /// World position (point lights)
    pub position: Vec3,
    /// Light transform inverse, host convention (+Z forward)
    pub world_to_light: Mat4,
    /// Full cone angle in degrees (spot lights)
    pub spot_angle: f32,
    pub shadow_near: f32,
    pub range: f32,
    /// Quality shadow distance; point faces use `min(range, shadow_distance)` as far plane
    pub shadow_distance: f32,
    /// Shadow map resolution (square)
    pub map_size: u32,
    /// Ready-made cascade viewports (directional lights)
    pub cascades: Vec<ViewportDesc>,
    /// Target per pass (cascade index, face index, or 0 for spot).
    /// Passes without a target render into whatever is bound.
    pub targets: Vec<RenderTargetBinding>,
}

struct FaceChain {
    face: CubeFace,
    rotation: Quat,
    chain: ViewportSwapChain,
}

pub struct ShadowCaster {
    native: Arc<dyn NativeRenderer>,
    config: RenderConfig,
    kind: Option<LightKind>,
    chain: Option<ViewportSwapChain>,
    faces: Vec<FaceChain>,
}

/// Host camera space looks down -Z, light space looks down +Z
fn invert_z() -> Mat4 {
    Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0))
}

/// View matrix of one point light cube face
pub fn cube_face_view(position: Vec3, rotation: Quat) -> Mat4 {
    invert_z() * Mat4::from_rotation_translation(rotation, position).inverse()
}

/// View matrix of a spot light
pub fn spot_view(world_to_light: &Mat4) -> Mat4 {
    invert_z() * *world_to_light
}

/// Perspective projection of a shadow pass, host convention
pub fn shadow_projection(fov_degrees: f32, near: f32, range: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_degrees.to_radians(), 1.0, near, near + range)
}

impl ShadowCaster {
    pub fn new(native: Arc<dyn NativeRenderer>, config: RenderConfig) -> Self {
        Self {
            native,
            config,
            kind: None,
            chain: None,
            faces: Vec::new(),
        }
    }

    pub fn light_kind(&self) -> Option<LightKind> {
        self.kind
    }

    /// Chain used by directional and spot lights
    pub fn swap_chain(&self) -> Option<&ViewportSwapChain> {
        self.chain.as_ref()
    }

    pub fn face_swap_chain(&self, face: CubeFace) -> Option<&ViewportSwapChain> {
        self.faces.iter().find(|f| f.face == face).map(|f| &f.chain)
    }

    fn ensure_resources(&mut self, kind: LightKind) -> Result<()> {
        if self.kind == Some(kind) {
            return Ok(());
        }

        self.chain = None;
        self.faces.clear();

        match kind {
            LightKind::Directional => {
                self.chain = Some(ViewportSwapChain::new(
                    Arc::clone(&self.native),
                    self.config.directional_shadow_viewport_count,
                )?);
            }
            LightKind::Spot => {
                self.chain = Some(ViewportSwapChain::new(
                    Arc::clone(&self.native),
                    self.config.shadow_viewport_count,
                )?);
            }
            LightKind::Point => {
                for face in CubeFace::ALL {
                    self.faces.push(FaceChain {
                        face,
                        rotation: face.rotation(),
                        chain: ViewportSwapChain::new(
                            Arc::clone(&self.native),
                            self.config.shadow_viewport_count,
                        )?,
                    });
                }
            }
        }

        crate::engine_debug!("hvr::ShadowCaster", "Shadow viewports built for {:?} light", kind);
        self.kind = Some(kind);
        Ok(())
    }

    /// Render every shadow pass of `light`. Returns the number of passes issued.
    pub fn render(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        light: &ShadowLight,
    ) -> Result<usize> {
        self.ensure_resources(light.kind)?;

        let device = host.device_type();
        let previous = host.render_target();
        let size = light.map_size as f32;

        let passes = match light.kind {
            LightKind::Directional => {
                let Some(chain) = self.chain.as_mut() else { return Ok(0) };
                if light.cascades.len() > chain.capacity() {
                    crate::engine_warn!("hvr::ShadowCaster", "{} cascades requested, rendering {}",
                        light.cascades.len(), chain.capacity());
                }

                let mut passes = 0;
                for (index, cascade) in light.cascades.iter().take(chain.capacity()).enumerate() {
                    bind_pass_target(host, light, index);
                    let viewport = chain.next_viewport(device, cascade);
                    scheduler.render_camera(host, viewport);
                    passes += 1;
                }
                passes
            }
            LightKind::Spot => {
                let Some(chain) = self.chain.as_mut() else { return Ok(0) };
                let projection = shadow_projection(light.spot_angle, light.shadow_near, light.range);
                let desc = ViewportDesc {
                    view: spot_view(&light.world_to_light),
                    projection: gpu_projection_matrix(&projection, false, device),
                    near: light.shadow_near,
                    far: light.shadow_near + light.range,
                    rect: ViewportRect::new(0.0, 0.0, size, size),
                };

                bind_pass_target(host, light, 0);
                let viewport = chain.next_viewport(device, &desc);
                scheduler.render_camera(host, viewport);
                1
            }
            LightKind::Point => {
                let effective_range = light.range.min(light.shadow_distance);
                let projection = gpu_projection_matrix(
                    &shadow_projection(90.0, light.shadow_near, light.range),
                    false,
                    device,
                );

                for (index, face) in self.faces.iter_mut().enumerate() {
                    let desc = ViewportDesc {
                        view: cube_face_view(light.position, face.rotation),
                        projection,
                        near: light.shadow_near,
                        far: effective_range,
                        rect: ViewportRect::new(0.0, 0.0, size, size),
                    };

                    bind_pass_target(host, light, index);
                    let viewport = face.chain.next_viewport(device, &desc);
                    scheduler.render_camera(host, viewport);
                }
                self.faces.len()
            }
        };

        host.set_render_target(previous);
        Ok(passes)
    }

    /// Drop every viewport; the next render rebuilds them
    pub fn release(&mut self) {
        self.chain = None;
        self.faces.clear();
        self.kind = None;
    }
}

fn bind_pass_target(host: &dyn GraphicsHost, light: &ShadowLight, pass: usize) {
    if let Some(target) = light.targets.get(pass) {
        host.set_render_target(*target);
        host.clear(SHADOW_CLEAR_COLOR, 1.0);
    }
}

impl std::fmt::Debug for ShadowCaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowCaster")
            .field("kind", &self.kind)
            .field("faces", &self.faces.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "shadow_caster_tests.rs"]
mod tests;
