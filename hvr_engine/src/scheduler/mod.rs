/// Scheduler module - per-frame timing and deferred native render events

pub mod job_queue;
pub mod frame_clock;
pub mod render_scheduler;

pub use job_queue::*;
pub use frame_clock::*;
pub use render_scheduler::*;
