//! # Timeline
//!
//! A per-component, single-threaded timer queue on a virtual clock.
//!
//! ## Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Timeline<E>                                     │
//! │                                                                         │
//! │   now ──────────────►│                                                  │
//! │                      │   (500ms,#0) Reveal(0)                           │
//! │                      │   (800ms,#1) Reveal(1)   ◄── BTreeMap, ordered   │
//! │                      │   (800ms,#4) Tick          by (deadline, seq)    │
//! │                                                                         │
//! │   advance(by):                                                          │
//! │     while pop_due(now + by) → (id, event):                              │
//! │         now = event deadline                                            │
//! │         handler(event)        ◄── may schedule / cancel more timers     │
//! │     settle(now + by)                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A handler always runs to completion before the next event is popped, and
//! events sharing a deadline fire in the order they were scheduled. Moving
//! `now` to each deadline before the handler runs means a repeating timer
//! that re-schedules itself never drifts.
//!
//! Once disposed, a timeline drops everything pending and ignores new
//! schedules, so nothing can fire after the owning component is torn down.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Deterministic timer queue. See the module docs.
#[derive(Debug)]
pub struct Timeline<E> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), E>,
    deadlines: HashMap<u64, Duration>,
    disposed: bool,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Timeline {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
            disposed: false,
        }
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time since the owning component was mounted.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The instant `by` from now; the bound to pass to [`Timeline::pop_due`].
    pub fn horizon(&self, by: Duration) -> Duration {
        self.now.saturating_add(by)
    }

    /// Schedules `event` to fire `delay` from now.
    ///
    /// On a disposed timeline the event is dropped and the returned id is
    /// never live.
    pub fn schedule_in(&mut self, delay: Duration, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;

        if !self.disposed {
            let deadline = self.now.saturating_add(delay);
            self.pending.insert((deadline, seq), event);
            self.deadlines.insert(seq, deadline);
        }

        TimerId(seq)
    }

    /// Cancels a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(deadline) => self.pending.remove(&(deadline, id.0)).is_some(),
            None => false,
        }
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }

    /// Clears the queue and refuses all future schedules.
    pub fn dispose(&mut self) {
        self.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Time until the earliest pending timer, if any.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.pending
            .keys()
            .next()
            .map(|(deadline, _)| deadline.saturating_sub(self.now))
    }

    /// Removes and returns the earliest timer due at or before `until`,
    /// moving `now` to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, E)> {
        let (&(deadline, seq), _) = self.pending.iter().next()?;
        if deadline > until {
            return None;
        }

        let event = self.pending.remove(&(deadline, seq))?;
        self.deadlines.remove(&seq);
        self.now = self.now.max(deadline);
        Some((TimerId(seq), event))
    }

    /// Moves `now` forward to `until` once nothing else is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

// =============================================================================
// Scheduled Trait
// =============================================================================

/// Implemented by every component that owns timers.
///
/// `dispose` is the teardown contract: after it returns, no pending timer of
/// the component will ever fire and `advance` is a no-op.
pub trait Scheduled {
    /// Advances the component's clock, firing every timer that falls due.
    fn advance(&mut self, by: Duration);

    /// Time until the component's next timer, if it has one.
    fn time_until_next(&self) -> Option<Duration>;

    /// Cancels all timers and marks the component as torn down.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// Earliest of several optional wake-up times.
pub fn earliest<I>(candidates: I) -> Option<Duration>
where
    I: IntoIterator<Item = Option<Duration>>,
{
    candidates.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(timeline: &mut Timeline<&'static str>, by: Duration) -> Vec<(Duration, &'static str)> {
        let until = timeline.horizon(by);
        let mut fired = Vec::new();
        while let Some((_, event)) = timeline.pop_due(until) {
            fired.push((timeline.now(), event));
        }
        timeline.settle(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timeline = Timeline::new();
        timeline.schedule_in(ms(300), "c");
        timeline.schedule_in(ms(100), "a");
        timeline.schedule_in(ms(200), "b");

        let fired = drain(&mut timeline, ms(1000));
        assert_eq!(fired, vec![(ms(100), "a"), (ms(200), "b"), (ms(300), "c")]);
        assert_eq!(timeline.now(), ms(1000));
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut timeline = Timeline::new();
        timeline.schedule_in(ms(50), "first");
        timeline.schedule_in(ms(50), "second");

        let fired: Vec<_> = drain(&mut timeline, ms(50)).into_iter().map(|(_, e)| e).collect();
        assert_eq!(fired, vec!["first", "second"]);
    }

    #[test]
    fn test_not_due_yet() {
        let mut timeline = Timeline::new();
        timeline.schedule_in(ms(5000), "tick");

        assert!(drain(&mut timeline, ms(4999)).is_empty());
        assert_eq!(timeline.time_until_next(), Some(ms(1)));
        assert_eq!(drain(&mut timeline, ms(1)).len(), 1);
        assert_eq!(timeline.time_until_next(), None);
    }

    #[test]
    fn test_cancel() {
        let mut timeline = Timeline::new();
        let id = timeline.schedule_in(ms(10), "x");
        assert!(timeline.is_scheduled(id));
        assert!(timeline.cancel(id));
        assert!(!timeline.cancel(id));
        assert!(!timeline.is_scheduled(id));
        assert!(drain(&mut timeline, ms(100)).is_empty());
    }

    #[test]
    fn test_dispose_drops_pending_and_refuses_new_timers() {
        let mut timeline = Timeline::new();
        timeline.schedule_in(ms(10), "x");
        timeline.dispose();
        let late = timeline.schedule_in(ms(10), "y");

        assert!(timeline.is_disposed());
        assert!(!timeline.is_scheduled(late));
        assert_eq!(timeline.pending_len(), 0);
        assert!(drain(&mut timeline, ms(100)).is_empty());
    }

    #[test]
    fn test_earliest() {
        assert_eq!(earliest([None, Some(ms(5)), Some(ms(3))]), Some(ms(3)));
        assert_eq!(earliest::<[Option<Duration>; 0]>([]), None);
    }
}
