//! # Carousel Engine
//!
//! Ring-buffer cursor over a fixed, non-empty item list with autoplay.
//!
//! ## Timer Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  autoplay on:   ──tick──────tick──────tick──►  (every `interval`)       │
//! │                                                                         │
//! │  manual next at t:                                                      │
//! │                 ──tick───X  t ─────────────tick──►                      │
//! │                          │  └── interval ──┘                            │
//! │                          └── pending tick cancelled, new one scheduled  │
//! │                                                                         │
//! │  Invariant: autoplay ⇔ exactly one live tick timer                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same engine runs the hero taglines (3s) and the testimonials (5s).

use std::time::Duration;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::timeline::{Scheduled, TimerId, Timeline};

/// The single event a carousel schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AutoAdvance;

/// Autoplaying carousel. See the module docs.
#[derive(Debug)]
pub struct Carousel<T> {
    name: &'static str,
    items: Vec<T>,
    cursor: usize,
    interval: Duration,
    autoplay: bool,
    tick: Option<TimerId>,
    timeline: Timeline<AutoAdvance>,
}

impl<T> Carousel<T> {
    /// Builds a carousel.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCarousel`] for an empty item list
    /// - [`CoreError::ZeroInterval`] for a zero autoplay interval
    pub fn new(
        name: &'static str,
        items: Vec<T>,
        interval: Duration,
        autoplay: bool,
    ) -> CoreResult<Self> {
        if items.is_empty() {
            return Err(CoreError::EmptyCarousel {
                name: name.to_string(),
            });
        }
        if interval.is_zero() {
            return Err(CoreError::ZeroInterval { what: "carousel autoplay" });
        }

        let mut carousel = Carousel {
            name,
            items,
            cursor: 0,
            interval,
            autoplay: false,
            tick: None,
            timeline: Timeline::new(),
        };
        carousel.set_autoplay(autoplay);
        Ok(carousel)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> &T {
        &self.items[self.cursor]
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advances by one, wrapping. Restarts the autoplay timer.
    pub fn next(&mut self) {
        if self.items.len() < 2 || self.timeline.is_disposed() {
            return;
        }
        self.step_forward();
        self.restart_tick();
        debug!(carousel = self.name, cursor = self.cursor, "Manual next");
    }

    /// Steps back by one, wrapping. Restarts the autoplay timer.
    pub fn prev(&mut self) {
        if self.items.len() < 2 || self.timeline.is_disposed() {
            return;
        }
        self.cursor = (self.cursor + self.items.len() - 1) % self.items.len();
        self.restart_tick();
        debug!(carousel = self.name, cursor = self.cursor, "Manual prev");
    }

    /// Jumps straight to `index`. Out-of-range indices are ignored.
    ///
    /// Returns whether the jump happened.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.items.len() || self.timeline.is_disposed() {
            return false;
        }
        self.cursor = index;
        self.restart_tick();
        debug!(carousel = self.name, cursor = self.cursor, "Manual jump");
        true
    }

    /// Turns autoplay on or off. Turning it on always starts a fresh
    /// interval.
    pub fn set_autoplay(&mut self, enabled: bool) {
        if self.timeline.is_disposed() {
            return;
        }
        self.autoplay = enabled;
        if enabled {
            self.restart_tick();
        } else if let Some(tick) = self.tick.take() {
            self.timeline.cancel(tick);
        }
        debug!(carousel = self.name, autoplay = enabled, "Autoplay set");
    }

    fn step_forward(&mut self) {
        self.cursor = (self.cursor + 1) % self.items.len();
    }

    /// Cancels the live tick (if any) and schedules a new one, when
    /// autoplay is on.
    fn restart_tick(&mut self) {
        if let Some(tick) = self.tick.take() {
            self.timeline.cancel(tick);
        }
        if self.autoplay {
            self.tick = Some(self.timeline.schedule_in(self.interval, AutoAdvance));
        }
    }
}

impl<T> Scheduled for Carousel<T> {
    fn advance(&mut self, by: Duration) {
        if self.timeline.is_disposed() {
            return;
        }
        let until = self.timeline.horizon(by);
        while let Some((id, AutoAdvance)) = self.timeline.pop_due(until) {
            if self.tick != Some(id) {
                continue;
            }
            self.tick = None;
            self.step_forward();
            self.restart_tick();
        }
        self.timeline.settle(until);
    }

    fn time_until_next(&self) -> Option<Duration> {
        self.timeline.time_until_next()
    }

    fn dispose(&mut self) {
        self.timeline.dispose();
        self.tick = None;
        self.autoplay = false;
    }

    fn is_disposed(&self) -> bool {
        self.timeline.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn carousel(len: usize, autoplay: bool) -> Carousel<usize> {
        Carousel::new("test", (0..len).collect(), ms(5000), autoplay).unwrap()
    }

    #[test]
    fn test_empty_list_fails_at_construction() {
        let err = Carousel::<u8>::new("empty", Vec::new(), ms(5000), true).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCarousel { .. }));
    }

    #[test]
    fn test_zero_interval_fails_at_construction() {
        let err = Carousel::new("zero", vec![1, 2], Duration::ZERO, true).unwrap_err();
        assert!(matches!(err, CoreError::ZeroInterval { .. }));
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut c = carousel(4, false);
        c.prev();
        assert_eq!(c.cursor(), 3);
        c.next();
        assert_eq!(c.cursor(), 0);
        c.next();
        assert_eq!(*c.current(), 1);
    }

    #[test]
    fn test_next_n_times_is_identity() {
        for len in 2..=7 {
            for start in 0..len {
                let mut c = carousel(len, false);
                assert!(c.go_to(start));
                for _ in 0..len {
                    c.next();
                }
                assert_eq!(c.cursor(), start, "len {len} start {start}");
            }
        }
    }

    #[test]
    fn test_go_to_out_of_range_is_no_op() {
        let mut c = carousel(3, true);
        c.advance(ms(4000));
        assert!(!c.go_to(3));
        assert_eq!(c.cursor(), 0);
        // timer was not restarted by the rejected jump
        assert_eq!(c.time_until_next(), Some(ms(1000)));
    }

    #[test]
    fn test_single_item_navigation_is_no_op() {
        let mut c = carousel(1, true);
        c.next();
        c.prev();
        assert_eq!(c.cursor(), 0);
        c.advance(ms(12_000));
        assert_eq!(c.cursor(), 0);
        assert!(c.time_until_next().is_some());
    }

    #[test]
    fn test_autoplay_advances_every_interval() {
        let mut c = carousel(4, true);
        c.advance(ms(4999));
        assert_eq!(c.cursor(), 0);
        c.advance(ms(1));
        assert_eq!(c.cursor(), 1);
        c.advance(ms(10_000));
        assert_eq!(c.cursor(), 3);
        c.advance(ms(5000));
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_manual_navigation_resets_timer() {
        let mut c = carousel(4, true);
        c.advance(ms(4000));
        c.next();
        assert_eq!(c.cursor(), 1);

        // a full interval minus epsilon after the click: no auto-advance
        c.advance(ms(4999));
        assert_eq!(c.cursor(), 1);
        c.advance(ms(1));
        assert_eq!(c.cursor(), 2);

        c.advance(ms(2500));
        c.prev();
        c.advance(ms(4999));
        assert_eq!(c.cursor(), 1);

        c.go_to(3);
        c.advance(ms(4999));
        assert_eq!(c.cursor(), 3);
        c.advance(ms(1));
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_exactly_one_timer_live() {
        let mut c = carousel(5, true);
        for _ in 0..10 {
            c.next();
            c.prev();
            c.go_to(2);
            c.set_autoplay(true);
        }
        assert_eq!(c.timeline.pending_len(), 1);

        c.set_autoplay(false);
        assert_eq!(c.timeline.pending_len(), 0);
        c.advance(ms(60_000));
        assert_eq!(c.cursor(), 2);
    }

    #[test]
    fn test_pause_then_resume_starts_full_interval() {
        let mut c = carousel(3, true);
        c.advance(ms(3000));
        c.set_autoplay(false);
        c.advance(ms(3000));
        c.set_autoplay(true);
        c.advance(ms(4999));
        assert_eq!(c.cursor(), 0);
        c.advance(ms(1));
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_dispose_cancels_autoplay() {
        let mut c = carousel(3, true);
        c.dispose();
        c.advance(ms(60_000));
        c.next();
        assert_eq!(c.cursor(), 0);
        assert!(!c.is_autoplay());
        assert_eq!(c.time_until_next(), None);
    }
}
