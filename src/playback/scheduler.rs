//! Timers behind the playback engine
//!
//! The engine never sleeps or spawns. It asks a [`Scheduler`] for a one-shot
//! timer and later asks which timers are due. Two implementations:
//!
//! - [`SystemScheduler`]: wall clock, used by the terminal viewer
//! - [`ManualScheduler`]: virtual clock that only moves when told to, with an
//!   operation log for asserting timer discipline in tests

use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Handle to one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub trait Scheduler {
    /// Arm a one-shot timer firing `delay` from now
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Disarm a timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);

    /// Remove and return the earliest timer whose deadline has passed
    fn next_due(&mut self) -> Option<TimerId>;

    /// Time until the earliest pending deadline, if any
    fn until_next(&self) -> Option<Duration>;
}

/// Wall-clock scheduler
#[derive(Debug, Default)]
pub struct SystemScheduler {
    next_id: u64,
    pending: FxHashMap<TimerId, Instant>,
}

impl SystemScheduler {
    pub fn new() -> Self {
        SystemScheduler::default()
    }
}

impl Scheduler for SystemScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, Instant::now() + delay);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.remove(&id);
    }

    fn next_due(&mut self) -> Option<TimerId> {
        let now = Instant::now();
        let id = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .min_by_key(|(id, deadline)| (**deadline, **id))
            .map(|(id, _)| *id)?;
        self.pending.remove(&id);
        Some(id)
    }

    fn until_next(&self) -> Option<Duration> {
        let now = Instant::now();
        self.pending
            .values()
            .min()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// Timer operation, as seen by [`ManualScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    Scheduled { id: TimerId, deadline: Duration },
    Cancelled(TimerId),
    Fired(TimerId),
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// `advance` moves a horizon forward. Each call to `next_due` delivers the
/// earliest timer at or before the horizon and sets the clock to that
/// timer's deadline, so a timer armed while handling a fire is measured from
/// the fire time, not from the horizon. Once nothing is due the clock catches
/// up to the horizon.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    horizon: Duration,
    next_id: u64,
    pending: FxHashMap<TimerId, Duration>,
    max_pending: usize,
    log: Vec<TimerOp>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, by: Duration) {
        self.horizon += by;
        self.settle();
    }

    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Largest number of simultaneously pending timers ever observed
    pub fn max_pending(&self) -> usize {
        self.max_pending
    }

    pub fn log(&self) -> &[TimerOp] {
        &self.log
    }

    pub fn scheduled_count(&self) -> usize {
        self.log
            .iter()
            .filter(|op| matches!(op, TimerOp::Scheduled { .. }))
            .count()
    }

    fn earliest_due(&self) -> Option<(TimerId, Duration)> {
        self.pending
            .iter()
            .filter(|(_, deadline)| **deadline <= self.horizon)
            .min_by_key(|(id, deadline)| (**deadline, **id))
            .map(|(id, deadline)| (*id, *deadline))
    }

    fn settle(&mut self) {
        if self.earliest_due().is_none() {
            self.now = self.horizon;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.pending.insert(id, deadline);
        self.max_pending = self.max_pending.max(self.pending.len());
        self.log.push(TimerOp::Scheduled { id, deadline });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if self.pending.remove(&id).is_some() {
            self.log.push(TimerOp::Cancelled(id));
        }
        self.settle();
    }

    fn next_due(&mut self) -> Option<TimerId> {
        match self.earliest_due() {
            Some((id, deadline)) => {
                self.pending.remove(&id);
                self.now = deadline;
                self.log.push(TimerOp::Fired(id));
                Some(id)
            }
            None => {
                self.now = self.horizon;
                None
            }
        }
    }

    fn until_next(&self) -> Option<Duration> {
        self.pending
            .values()
            .min()
            .map(|deadline| deadline.saturating_sub(self.now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_delivers_in_deadline_order() {
        let mut s = ManualScheduler::new();
        let late = s.schedule(Duration::from_millis(30));
        let early = s.schedule(Duration::from_millis(10));
        assert_eq!(s.next_due(), None);

        s.advance_ms(50);
        assert_eq!(s.next_due(), Some(early));
        assert_eq!(s.now(), Duration::from_millis(10));
        assert_eq!(s.next_due(), Some(late));
        assert_eq!(s.next_due(), None);
        assert_eq!(s.now(), Duration::from_millis(50));
        assert_eq!(s.max_pending(), 2);
    }

    #[test]
    fn test_manual_rescheduling_chains_from_fire_time() {
        let mut s = ManualScheduler::new();
        s.schedule(Duration::from_millis(100));
        s.advance_ms(300);

        let mut fired = 0;
        while s.next_due().is_some() {
            fired += 1;
            if fired < 3 {
                s.schedule(Duration::from_millis(100));
            }
        }
        assert_eq!(fired, 3);
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn test_manual_cancel_is_logged_once() {
        let mut s = ManualScheduler::new();
        let id = s.schedule(Duration::from_millis(5));
        s.cancel(id);
        s.cancel(id);
        assert_eq!(
            s.log(),
            &[
                TimerOp::Scheduled {
                    id,
                    deadline: Duration::from_millis(5)
                },
                TimerOp::Cancelled(id)
            ]
        );
        s.advance_ms(10);
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn test_system_scheduler_zero_delay_is_due() {
        let mut s = SystemScheduler::new();
        let id = s.schedule(Duration::ZERO);
        assert_eq!(s.next_due(), Some(id));
        assert_eq!(s.until_next(), None);
    }
}
