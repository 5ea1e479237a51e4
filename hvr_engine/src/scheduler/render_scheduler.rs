/// RenderScheduler - the render core's explicit context
///
/// Constructed once at startup and passed to every entry point that issues
/// native render work. Owns the default scene, the frame clock and the
/// deferred job queue, and guarantees the native scene is prepared exactly
/// once per distinct timestamp however many cameras render in a frame.
///
/// Every render call only submits event ids into the host command stream;
/// the native renderer runs them when the GPU reaches that point.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::engine_bail;
use crate::host::GraphicsHost;
use crate::native::{NativeRenderer, ActorHandle, StatKind, StatValues};
use crate::render::Viewport;
use crate::scene::{Scene, Actor};
use super::{DeferredJobQueue, FrameClock};

pub struct RenderScheduler {
    native: Arc<dyn NativeRenderer>,
    scene: Scene,
    clock: Box<dyn FrameClock>,
    jobs: Arc<DeferredJobQueue>,
    config: RenderConfig,
    /// Timestamp of the last prepare event (`None` before the first one)
    last_prepared_time: Option<f32>,
    stats: FxHashMap<String, StatValues>,
}

impl RenderScheduler {
    /// Initialize the native player and create the default scene
    pub fn new(
        native: Arc<dyn NativeRenderer>,
        clock: Box<dyn FrameClock>,
        config: RenderConfig,
    ) -> Result<Self> {
        if !native.initialise() {
            engine_bail!("hvr::RenderScheduler", InitializationFailed,
                "Native player does not support the current graphics API");
        }

        let scene = Scene::new(Arc::clone(&native))?;
        crate::engine_info!("hvr::RenderScheduler", "Render scheduler ready (scene {})", scene.handle().0);

        Ok(Self {
            native,
            scene,
            clock,
            jobs: Arc::new(DeferredJobQueue::new()),
            config,
            last_prepared_time: None,
            stats: FxHashMap::default(),
        })
    }

    pub fn native(&self) -> &Arc<dyn NativeRenderer> {
        &self.native
    }

    /// The default scene every actor is attached to
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Create an actor in the default scene, scaled by the configured factor
    pub fn create_actor(&self) -> Actor {
        Actor::with_scale_factor(Arc::clone(&self.native), &self.scene, self.config.actor_scale_factor)
    }

    /// Shared queue; clone the `Arc` to enqueue from other threads
    pub fn job_queue(&self) -> &Arc<DeferredJobQueue> {
        &self.jobs
    }

    pub fn last_prepared_time(&self) -> Option<f32> {
        self.last_prepared_time
    }

    /// Drain deferred jobs, advance native time and prepare the scene if
    /// the time moved. Safe to call several times per frame.
    ///
    /// Returns true when a prepare event was issued.
    pub fn late_update_once_per_frame(&mut self, host: &dyn GraphicsHost) -> bool {
        self.jobs.update();

        let time = self.clock.time();
        self.native.update(time);

        // Exact comparison: any distinct timestamp prepares again
        if self.last_prepared_time == Some(time) {
            return false;
        }

        host.issue_plugin_event(self.native.prepare_render_event(self.scene.handle()));
        self.last_prepared_time = Some(time);
        true
    }

    /// Render the whole scene through `viewport`
    pub fn render_camera(&mut self, host: &dyn GraphicsHost, viewport: &Viewport) {
        self.late_update_once_per_frame(host);
        self.clear_bound_frame_buffer(host, viewport);
        host.issue_plugin_event(self.native.render_event(self.scene.handle(), viewport.handle()));
    }

    /// Render a single actor through `viewport`
    pub fn render_actor(&mut self, host: &dyn GraphicsHost, actor: ActorHandle, viewport: &Viewport) {
        self.late_update_once_per_frame(host);
        self.clear_bound_frame_buffer(host, viewport);
        host.issue_plugin_event(self.native.render_actor_event(actor, viewport.handle()));
    }

    fn clear_bound_frame_buffer(&self, host: &dyn GraphicsHost, viewport: &Viewport) {
        if let Some(frame_buffer) = viewport.frame_buffer() {
            host.issue_plugin_event(self.native.frame_buffer_clear_event(
                frame_buffer,
                self.config.clear_color,
                self.config.clear_depth,
            ));
        }
    }

    pub fn begin_frame(&self, host: &dyn GraphicsHost) {
        host.issue_plugin_event(self.native.begin_frame_event());
    }

    pub fn end_frame(&self, host: &dyn GraphicsHost) {
        host.issue_plugin_event(self.native.end_frame_event());
    }

    /// Release native objects whose handles were deleted
    pub fn garbage_collect(&self) {
        self.native.garbage_collect();
    }

    /// Refresh every tracked native statistic
    pub fn update_stats(&mut self) -> &FxHashMap<String, StatValues> {
        self.stats.clear();

        let count = self.native.statistics_tracked_value_count();
        for index in 0..count {
            let Some(name) = self.native.statistics_tracked_value_name(index) else {
                continue;
            };
            let values = StatValues {
                max: self.native.statistics_per_call(&name, StatKind::Max),
                min: self.native.statistics_per_call(&name, StatKind::Min),
                avg: self.native.statistics_per_call(&name, StatKind::Avg),
            };
            self.stats.insert(name, values);
        }

        &self.stats
    }

    /// Values of the last `update_stats()`
    pub fn stats(&self) -> &FxHashMap<String, StatValues> {
        &self.stats
    }

    /// Log the last statistics, sorted by name
    pub fn log_stats(&self) {
        let mut names: Vec<&String> = self.stats.keys().collect();
        names.sort();
        for name in names {
            let values = &self.stats[name];
            crate::engine_info!("hvr::RenderScheduler", "{}: max {:.3} min {:.3} avg {:.3}",
                name, values.max, values.min, values.avg);
        }
    }
}

#[cfg(test)]
#[path = "render_scheduler_tests.rs"]
mod tests;
