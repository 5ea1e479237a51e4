/// FrameClock - time source of the scheduler
///
/// In play mode the host's frame time drives playback; in edit mode the
/// host's time since startup does. The host decides which by handing the
/// scheduler the matching clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

pub trait FrameClock: Send + Sync {
    /// Current playback time in seconds
    fn time(&self) -> f32;
}

/// Clock advanced by the host each frame (play-mode frame time)
///
/// Cloning shares the underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU32>,
}

impl ManualClock {
    pub fn new(time: f32) -> Self {
        let clock = Self::default();
        clock.set(time);
        clock
    }

    pub fn set(&self, time: f32) {
        self.bits.store(time.to_bits(), Ordering::Release);
    }

    pub fn advance(&self, delta: f32) {
        self.set(self.time() + delta);
    }
}

impl FrameClock for ManualClock {
    fn time(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Wall-clock seconds since the clock was created (edit-mode time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn time(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
