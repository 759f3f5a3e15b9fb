//! Transport-controlled cursor over a [`Trace`]
//!
//! # State Machine
//!
//! ```text
//!  Idle ──load──▶ Paused ──play──▶ Playing ──last step──▶ Completed
//!                   ▲  ◀──pause/step/seek──┘                 │
//!                   └──────────── step_back / seek ──────────┘
//!  (any state except Idle) ──load──▶ Paused
//! ```
//!
//! `Playing` is the only state with an armed timer. Every operation that can
//! leave `Playing`, and every `load`/`seek`/step, cancels the pending timer
//! before doing anything else, so an engine never has more than one timer
//! outstanding.

use super::errors::PlaybackError;
use super::scheduler::{Scheduler, SystemScheduler, TimerId};
use crate::trace::{Step, Trace};
use std::time::Duration;
use tracing::debug;

/// Interval between automatic advances unless changed with `set_speed`
pub const DEFAULT_SPEED_MS: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// No trace loaded
    Idle,
    Paused,
    Playing,
    /// Playback ran to the last step on its own
    Completed,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Paused => "paused",
            PlaybackState::Playing => "playing",
            PlaybackState::Completed => "completed",
        }
    }
}

/// Notifications for whoever renders the engine's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Loaded { len: usize },
    StateChanged { from: PlaybackState, to: PlaybackState },
    CursorMoved { from: usize, to: usize },
    Completed,
}

/// Owns one trace, one cursor and at most one pending timer
#[derive(Debug)]
pub struct PlaybackEngine<S: Scheduler = SystemScheduler> {
    scheduler: S,
    trace: Option<Trace>,
    cursor: usize,
    state: PlaybackState,
    speed_ms: u64,
    pending: Option<TimerId>,
    events: Vec<PlaybackEvent>,
}

impl Default for PlaybackEngine<SystemScheduler> {
    fn default() -> Self {
        PlaybackEngine::new(SystemScheduler::new())
    }
}

impl<S: Scheduler> PlaybackEngine<S> {
    pub fn new(scheduler: S) -> Self {
        PlaybackEngine {
            scheduler,
            trace: None,
            cursor: 0,
            state: PlaybackState::Idle,
            speed_ms: DEFAULT_SPEED_MS,
            pending: None,
            events: Vec::new(),
        }
    }

    /// Replace the current trace and rewind to its first step
    pub fn load(&mut self, trace: Trace) -> Result<(), PlaybackError> {
        if trace.is_empty() {
            return Err(PlaybackError::EmptyTrace);
        }
        self.cancel_pending();

        debug!(
            algorithm = trace.algorithm_name(),
            steps = trace.len(),
            "trace loaded"
        );
        let len = trace.len();
        self.trace = Some(trace);
        self.events.push(PlaybackEvent::Loaded { len });
        self.move_cursor(0);
        self.transition(PlaybackState::Paused);
        Ok(())
    }

    /// Start advancing one step every `speed_ms`
    pub fn play(&mut self) {
        if !matches!(self.state, PlaybackState::Paused) || self.at_end() {
            return;
        }
        self.transition(PlaybackState::Playing);
        self.arm_timer();
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.cancel_pending();
        self.transition(PlaybackState::Paused);
    }

    /// Play when paused, pause when playing
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn step_forward(&mut self) {
        if self.trace.is_none() {
            return;
        }
        self.pause();
        if !self.at_end() {
            self.move_cursor(self.cursor + 1);
        }
    }

    pub fn step_back(&mut self) {
        if self.trace.is_none() {
            return;
        }
        self.pause();
        if self.cursor > 0 {
            self.move_cursor(self.cursor - 1);
            self.leave_completed();
        }
    }

    /// Jump to `index`, clamped to the trace
    pub fn seek(&mut self, index: usize) {
        let Some(last) = self.last_index() else {
            return;
        };
        self.pause();
        self.move_cursor(index.min(last));
        self.leave_completed();
    }

    pub fn seek_start(&mut self) {
        self.seek(0);
    }

    pub fn seek_end(&mut self) {
        self.seek(usize::MAX);
    }

    /// Change the interval for future advances. A tick that is already
    /// scheduled keeps its deadline.
    pub fn set_speed(&mut self, ms: i64) -> Result<(), PlaybackError> {
        let speed = u64::try_from(ms)
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or(PlaybackError::InvalidSpeed(ms))?;
        debug!(from = self.speed_ms, to = speed, "playback speed changed");
        self.speed_ms = speed;
        Ok(())
    }

    /// Deliver every timer that is due. Returns how many steps were advanced.
    pub fn poll(&mut self) -> usize {
        let mut advanced = 0;
        while let Some(id) = self.scheduler.next_due() {
            if self.pending != Some(id) {
                // cancelled timers never reach here, but a foreign id is harmless
                continue;
            }
            self.pending = None;
            if self.tick() {
                advanced += 1;
            }
        }
        advanced
    }

    /// Take all notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.trace
            .as_ref()
            .and_then(|t| t.step_at(self.cursor).ok())
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the loaded trace, 0 when idle
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing || self.at_end() {
            return false;
        }
        self.move_cursor(self.cursor + 1);

        if self.at_end() {
            self.transition(PlaybackState::Completed);
            self.events.push(PlaybackEvent::Completed);
        } else {
            self.arm_timer();
        }
        true
    }

    fn arm_timer(&mut self) {
        self.cancel_pending();
        self.pending = Some(
            self.scheduler
                .schedule(Duration::from_millis(self.speed_ms)),
        );
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    fn move_cursor(&mut self, to: usize) {
        let from = self.cursor;
        self.cursor = to;
        if from != to {
            self.events.push(PlaybackEvent::CursorMoved { from, to });
        }
    }

    fn transition(&mut self, to: PlaybackState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!(from = from.label(), to = to.label(), cursor = self.cursor, "playback state");
        self.events.push(PlaybackEvent::StateChanged { from, to });
    }

    fn leave_completed(&mut self) {
        if self.state == PlaybackState::Completed {
            self.transition(PlaybackState::Paused);
        }
    }

    fn last_index(&self) -> Option<usize> {
        self.trace.as_ref().map(|t| t.len().saturating_sub(1))
    }

    fn at_end(&self) -> bool {
        self.last_index().map_or(true, |last| self.cursor >= last)
    }
}
