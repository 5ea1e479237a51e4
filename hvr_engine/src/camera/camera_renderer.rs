/// CameraRenderer - renders volumetric actors for one host camera
///
/// The host calls [`CameraRenderer::pre_render`] before the camera renders
/// and [`CameraRenderer::post_render`] after it (or [`render_frame`] for
/// both). The render mode is a closed set dispatched in one place:
///
/// - `Standard`: per actor, fill its package frame buffer before the camera
///   renders, then composite it with the actor material afterwards
/// - `Composite`: render the whole scene into temporary surfaces and
///   composite them with one material
/// - `Direct`: render the whole scene straight into the active target
///
/// [`render_frame`]: CameraRenderer::render_frame

use std::sync::Arc;
use std::time::Instant;
use slotmap::{SlotMap, new_key_type};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::host::{
    GraphicsHost, HostCamera, SurfaceDesc, SurfaceFormat, ColorSpace, RenderingPath,
    RenderTargetBinding, FullScreenDraw, CompositeQuad, MaterialId,
};
use crate::native::{NativeRenderer, ActorHandle, NativeTexturePtr};
use crate::render::{ViewportSwapChain, Statistic};
use crate::scheduler::RenderScheduler;
use super::{RenderMode, ActorRenderMethod, RenderableActor, RecreateReasons, RenderPackage, PackageState};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key of an (actor, package) pair within a CameraRenderer
    pub struct RenderPairKey;
}

struct RenderPair {
    actor: RenderableActor,
    package: RenderPackage,
    /// Set when the host state changed; cleared once the package buffers were recreated
    needs_recreate: bool,
}

pub struct CameraRenderer {
    native: Arc<dyn NativeRenderer>,
    config: RenderConfig,
    depth_composite_material: MaterialId,
    pairs: SlotMap<RenderPairKey, RenderPair>,
    swap_chain: ViewportSwapChain,
    quad: CompositeQuad,
    render_mode: RenderMode,
    rendering_path: RenderingPath,
    color_space: ColorSpace,
    screen_space_shadow: Option<NativeTexturePtr>,
    pub stat_pre_render: Statistic,
    pub stat_post_render: Statistic,
}

impl CameraRenderer {
    pub fn new(
        native: Arc<dyn NativeRenderer>,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
        config: RenderConfig,
        depth_composite_material: MaterialId,
    ) -> Result<Self> {
        let swap_chain = ViewportSwapChain::new(Arc::clone(&native), config.camera_viewport_count)?;

        Ok(Self {
            native,
            config,
            depth_composite_material,
            pairs: SlotMap::with_key(),
            swap_chain,
            quad: CompositeQuad::full_screen(),
            render_mode: RenderMode::Standard,
            rendering_path: camera.rendering_path(),
            color_space: host.color_space(),
            screen_space_shadow: None,
            stat_pre_render: Statistic::new(),
            stat_post_render: Statistic::new(),
        })
    }

    // ===== RENDER MODE =====

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Switching mode purges every prefixed sequence from the camera
    pub fn set_render_mode(&mut self, camera: &dyn HostCamera, mode: RenderMode) {
        if self.render_mode != mode {
            self.remove_all_command_sequences(camera);
            self.render_mode = mode;
        }
    }

    /// Screen-space shadow texture multiplied into standard composites
    pub fn set_screen_space_shadow(&mut self, texture: Option<NativeTexturePtr>) {
        self.screen_space_shadow = texture;
    }

    pub fn swap_chain(&self) -> &ViewportSwapChain {
        &self.swap_chain
    }

    // ===== ACTORS =====

    /// Track an actor. Re-adding an actor refreshes its state and keeps its package.
    pub fn add_actor(
        &mut self,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
        actor: RenderableActor,
    ) -> Result<RenderPairKey> {
        if let Some(key) = self.find_actor(actor.handle) {
            self.pairs[key].actor = actor;
            return Ok(key);
        }

        let package = RenderPackage::new(
            Arc::clone(&self.native),
            host,
            camera,
            &self.config,
            self.depth_composite_material,
        )?;
        crate::engine_debug!("hvr::CameraRenderer", "Actor {} added with package {}",
            actor.handle.0, package.sequence_name());

        Ok(self.pairs.insert(RenderPair { actor, package, needs_recreate: false }))
    }

    /// Release the actor's package and forget the pair.
    /// Tolerates a camera the host already destroyed.
    pub fn remove_actor(&mut self, camera: &dyn HostCamera, key: RenderPairKey) -> bool {
        match self.pairs.remove(key) {
            Some(mut pair) => {
                pair.package.release(camera);
                true
            }
            None => false,
        }
    }

    pub fn find_actor(&self, handle: ActorHandle) -> Option<RenderPairKey> {
        self.pairs
            .iter()
            .find(|(_, pair)| pair.actor.handle == handle)
            .map(|(key, _)| key)
    }

    pub fn actor(&self, key: RenderPairKey) -> Option<&RenderableActor> {
        self.pairs.get(key).map(|pair| &pair.actor)
    }

    /// Update visibility, bounds or method before the next tick
    pub fn actor_mut(&mut self, key: RenderPairKey) -> Option<&mut RenderableActor> {
        self.pairs.get_mut(key).map(|pair| &mut pair.actor)
    }

    pub fn package(&self, key: RenderPairKey) -> Option<&RenderPackage> {
        self.pairs.get(key).map(|pair| &pair.package)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    // ===== FRAME =====

    /// Pre-render then post-render
    pub fn render_frame(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
    ) -> Result<()> {
        self.pre_render(scheduler, host, camera)?;
        self.post_render(scheduler, host, camera)
    }

    /// Before the camera renders
    pub fn pre_render(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
    ) -> Result<()> {
        let start = Instant::now();

        let result = match self.render_mode {
            RenderMode::Standard => self.standard_pre_render(scheduler, host, camera),
            RenderMode::Composite { .. } | RenderMode::Direct => Ok(()),
        };

        if self.config.statistics_enabled {
            self.stat_pre_render.accumulate(start.elapsed().as_secs_f32());
        }
        result
    }

    /// After the camera rendered
    pub fn post_render(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
    ) -> Result<()> {
        let start = Instant::now();

        let result = match self.render_mode {
            RenderMode::Standard => {
                self.standard_post_render(scheduler, host, camera);
                Ok(())
            }
            RenderMode::Composite { material } => self.composite_render(scheduler, host, camera, material),
            RenderMode::Direct => {
                self.direct_render(scheduler, host, camera);
                Ok(())
            }
        };

        if self.config.statistics_enabled {
            self.stat_post_render.accumulate(start.elapsed().as_secs_f32());
        }
        result
    }

    fn should_render(actor: &RenderableActor, camera: &dyn HostCamera) -> bool {
        actor.active_and_enabled
            && (!actor.occlusion_culling || camera.is_sphere_visible(&actor.bounding_sphere))
    }

    /// Host state changes that invalidate every package frame buffer
    fn detect_recreate_reasons(&mut self, host: &dyn GraphicsHost, camera: &dyn HostCamera) -> RecreateReasons {
        let mut reasons = RecreateReasons::empty();

        let rendering_path = camera.rendering_path();
        if rendering_path != self.rendering_path {
            self.rendering_path = rendering_path;
            reasons |= RecreateReasons::RENDERING_PATH;
        }

        let color_space = host.color_space();
        if color_space != self.color_space {
            self.color_space = color_space;
            reasons |= RecreateReasons::COLOR_SPACE;
        }

        if !reasons.is_empty() {
            crate::engine_debug!("hvr::CameraRenderer", "Recreating frame buffers ({:?})", reasons);
        }
        reasons
    }

    fn standard_pre_render(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
    ) -> Result<()> {
        if !self.detect_recreate_reasons(host, camera).is_empty() {
            for pair in self.pairs.values_mut() {
                pair.needs_recreate = true;
            }
        }

        let (width, height) = (camera.pixel_width(), camera.pixel_height());
        let statistics_enabled = self.config.statistics_enabled;

        // A failing package does not stop the others; the first error is reported
        let mut first_error = None;
        for pair in self.pairs.values_mut() {
            let start = Instant::now();

            if let Err(err) = Self::pre_render_pair(pair, scheduler, host, camera, width, height) {
                first_error.get_or_insert(err);
            }

            if statistics_enabled {
                pair.package.stat_pre_render.accumulate(start.elapsed().as_secs_f32());
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn pre_render_pair(
        pair: &mut RenderPair,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let package = &mut pair.package;

        if pair.needs_recreate {
            package.recreate_buffers(host, width, height)?;
            pair.needs_recreate = false;
        }

        if Self::should_render(&pair.actor, camera) {
            match pair.actor.render_method {
                ActorRenderMethod::Direct => {
                    package.set_attached(camera, false);
                    package.set_state(PackageState::Direct);
                }
                ActorRenderMethod::Standard => {
                    package.set_attached(camera, true);
                    package.update_buffer_size(host, width, height)?;
                    package.fill_frame_buffer(scheduler, host, camera, pair.actor.handle);
                    package.set_state(PackageState::Standard);
                }
            }
        } else {
            package.set_attached(camera, false);
            if pair.actor.render_method == ActorRenderMethod::Standard {
                package.discard_contents(host);
            }
            package.set_state(PackageState::Hidden);
        }

        Ok(())
    }

    fn standard_post_render(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
    ) {
        let inverse_view_projection = (camera.projection() * camera.world_to_camera()).inverse();
        let statistics_enabled = self.config.statistics_enabled;

        for pair in self.pairs.values_mut() {
            let start = Instant::now();
            let package = &mut pair.package;

            if Self::should_render(&pair.actor, camera) && !pair.needs_recreate {
                match pair.actor.render_method {
                    ActorRenderMethod::Direct => {
                        package.render_direct(scheduler, host, camera, pair.actor.handle);
                    }
                    ActorRenderMethod::Standard => {
                        package.record_depth_composite();
                        host.draw_full_screen(&FullScreenDraw {
                            material: pair.actor.material,
                            color: package.frame_buffer().color_texture(),
                            depth: package.frame_buffer().depth_texture(),
                            inverse_view_projection,
                            screen_space_shadow: self.screen_space_shadow,
                            quad: package.quad(),
                        });
                    }
                }
            }

            if statistics_enabled {
                package.stat_post_render.accumulate(start.elapsed().as_secs_f32());
            }
        }
    }

    fn composite_render(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
        material: MaterialId,
    ) -> Result<()> {
        let (width, height) = (camera.pixel_width(), camera.pixel_height());
        let previous = host.render_target();

        // Temporaries live until the end of this call
        let color = host.create_surface(&SurfaceDesc {
            name: "HvrComposite Color".to_string(),
            width,
            height,
            format: SurfaceFormat::Rgba8,
        })?;
        let depth = host.create_surface(&SurfaceDesc {
            name: "HvrComposite Depth".to_string(),
            width,
            height,
            format: SurfaceFormat::Depth16,
        })?;

        host.set_render_target(RenderTargetBinding::new(color.native_ptr(), depth.native_ptr()));
        host.clear(self.config.clear_color, self.config.clear_depth);

        let viewport = self.swap_chain.next_viewport_for_camera(host, camera, false);
        scheduler.render_camera(host, viewport);

        host.set_render_target(previous);
        host.draw_full_screen(&FullScreenDraw {
            material,
            color: color.native_ptr(),
            depth: depth.native_ptr(),
            inverse_view_projection: (camera.projection() * camera.world_to_camera()).inverse(),
            screen_space_shadow: None,
            quad: &self.quad,
        });

        Ok(())
    }

    fn direct_render(
        &mut self,
        scheduler: &mut RenderScheduler,
        host: &dyn GraphicsHost,
        camera: &dyn HostCamera,
    ) {
        let viewport = self.swap_chain.next_viewport_for_camera(host, camera, false);
        scheduler.render_camera(host, viewport);
    }

    // ===== TEARDOWN =====

    /// Detach every package sequence (camera disabled). Packages are kept.
    pub fn disable(&mut self, camera: &dyn HostCamera) {
        for pair in self.pairs.values_mut() {
            pair.package.set_attached(camera, false);
            pair.package.set_state(PackageState::Hidden);
        }
    }

    /// Release every package, then purge stale prefixed sequences left on
    /// the camera by earlier reloads
    pub fn release_all(&mut self, camera: &dyn HostCamera) {
        for (_, mut pair) in self.pairs.drain() {
            pair.package.release(camera);
        }
        self.remove_all_command_sequences(camera);
    }

    /// Remove every sequence whose name carries the core prefix
    pub fn remove_all_command_sequences(&self, camera: &dyn HostCamera) {
        if !camera.is_alive() {
            return;
        }

        let event = self.config.composite_event;
        for name in camera.command_sequence_names(event) {
            if name.starts_with(&self.config.command_sequence_prefix) {
                camera.remove_command_sequence(event, &name);
            }
        }
    }
}

#[cfg(test)]
#[path = "camera_renderer_tests.rs"]
mod tests;
