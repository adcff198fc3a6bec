//! # Reveal Scheduler
//!
//! Staggered entrance animation for a fixed number of items, started by the
//! first "became visible" signal.
//!
//! ```text
//!   visible ─┐
//!            ▼ (rising edge, once)
//!   t = base            item 0 revealed
//!   t = base + stagger  item 1 revealed
//!   t = base + 2·stagger item 2 revealed
//!   ...
//! ```
//!
//! Later visibility signals are ignored. `revealed` only grows.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::timeline::{Scheduled, Timeline};

/// Delays of a reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    /// Delay before the first item.
    pub base_delay: Duration,
    /// Extra delay per following item.
    pub stagger: Duration,
}

impl RevealTiming {
    pub const fn from_millis(base_ms: u64, stagger_ms: u64) -> Self {
        RevealTiming {
            base_delay: Duration::from_millis(base_ms),
            stagger: Duration::from_millis(stagger_ms),
        }
    }

    /// When item `index` is revealed, measured from the trigger.
    pub fn offset(&self, index: usize) -> Duration {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_delay.saturating_add(self.stagger.saturating_mul(steps))
    }
}

/// One-shot staggered reveal of `count` items.
#[derive(Debug)]
pub struct RevealScheduler {
    count: usize,
    timing: RevealTiming,
    triggered: bool,
    revealed: BTreeSet<usize>,
    timeline: Timeline<usize>,
}

impl RevealScheduler {
    pub fn new(count: usize, timing: RevealTiming) -> Self {
        RevealScheduler {
            count,
            timing,
            triggered: false,
            revealed: BTreeSet::new(),
            timeline: Timeline::new(),
        }
    }

    /// Feeds the viewport signal. Only the first `true` does anything.
    ///
    /// Returns whether this call started the sequence.
    pub fn on_visibility(&mut self, visible: bool) -> bool {
        if !visible || self.triggered || self.timeline.is_disposed() {
            return false;
        }

        self.triggered = true;
        for index in 0..self.count {
            self.timeline.schedule_in(self.timing.offset(index), index);
        }
        debug!(count = self.count, "Reveal sequence started");
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    /// Indices revealed so far, ascending.
    pub fn revealed(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Every item is on screen.
    pub fn is_complete(&self) -> bool {
        self.triggered && self.revealed.len() == self.count
    }

    pub fn view(&self) -> RevealView {
        RevealView::from_indices(self.triggered, &self.revealed, self.is_complete())
    }
}

impl Scheduled for RevealScheduler {
    fn advance(&mut self, by: Duration) {
        if self.timeline.is_disposed() {
            return;
        }
        let until = self.timeline.horizon(by);
        while let Some((_, index)) = self.timeline.pop_due(until) {
            self.revealed.insert(index);
        }
        self.timeline.settle(until);
    }

    fn time_until_next(&self) -> Option<Duration> {
        self.timeline.time_until_next()
    }

    fn dispose(&mut self) {
        self.timeline.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.timeline.is_disposed()
    }
}

/// What the frontend needs to animate items in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RevealView {
    pub triggered: bool,
    pub revealed: Vec<u32>,
    pub complete: bool,
}

impl RevealView {
    fn from_indices(triggered: bool, revealed: &BTreeSet<usize>, complete: bool) -> Self {
        RevealView {
            triggered,
            revealed: revealed
                .iter()
                .filter_map(|i| u32::try_from(*i).ok())
                .collect(),
            complete,
        }
    }
}
