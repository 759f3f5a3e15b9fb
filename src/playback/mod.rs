//! Playing a trace back under transport controls
//!
//! - [`engine`]: [`PlaybackEngine`], the cursor state machine
//! - [`scheduler`]: the [`Scheduler`] seam plus wall-clock and manual clocks
//! - [`errors`]: [`PlaybackError`]
//!
//! The engine knows nothing about rendering. A presentation layer calls the
//! transport methods, calls [`PlaybackEngine::poll`] regularly to let due
//! timers advance the cursor, then reads [`PlaybackEngine::current_step`] and
//! drains [`PlaybackEvent`]s.

pub mod engine;
pub mod errors;
pub mod scheduler;

pub use engine::{PlaybackEngine, PlaybackEvent, PlaybackState, DEFAULT_SPEED_MS};
pub use errors::PlaybackError;
pub use scheduler::{ManualScheduler, Scheduler, SystemScheduler, TimerId, TimerOp};
