//! # Page State
//!
//! The mounted [`LandingPage`] shared between the command layer and the
//! real-time driver, together with the real instant its virtual clock was
//! last synced to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commands ──with_page_mut──► Mutex<{ LandingPage, synced_at }> ◄── tick │
//! │                 │                                              driver   │
//! │                 └──────────── Notify (wake) ─────────────────────▲      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Clock Sync
//! Before every read or mutation the page is advanced by the whole
//! milliseconds of real time since `synced_at`, so reads never see a timer
//! that is already past due and a timer scheduled by the mutation starts
//! from the current instant. Sub-millisecond remainders carry over to the
//! next sync. A zero step still fires timers due at the current instant.
//!
//! Timers fired by a read are picked up on the driver's next tick, which
//! is due no later than the earliest of them.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use premier_core::{LandingPage, PageEvent, Scheduled};
use tokio::sync::Notify;
use tokio::time::Instant;

#[derive(Debug)]
struct Mounted {
    page: LandingPage,
    synced_at: Instant,
}

impl Mounted {
    /// Advances the page up to `now`, whole milliseconds only.
    fn catch_up(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.synced_at);
        let whole_ms = Duration::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        if whole_ms.is_zero() && self.page.time_until_next() != Some(Duration::ZERO) {
            return;
        }
        self.page.advance(whole_ms);
        self.synced_at += whole_ms;
    }
}

/// What one driver tick produced.
#[derive(Debug)]
pub(crate) struct Tick {
    /// Events drained from the page outbox, oldest first
    pub events: Vec<PageEvent>,
    /// Real instant of the next due timer, if any
    pub next_due: Option<Instant>,
}

/// Shared, thread-safe handle to the page.
#[derive(Debug, Clone)]
pub struct PageState {
    mounted: Arc<Mutex<Mounted>>,
    changed: Arc<Notify>,
}

impl PageState {
    /// Wraps a freshly mounted page; its clock starts now.
    pub fn new(page: LandingPage) -> Self {
        PageState {
            mounted: Arc::new(Mutex::new(Mounted {
                page,
                synced_at: Instant::now(),
            })),
            changed: Arc::new(Notify::new()),
        }
    }

    /// Executes a function with read access to the page, after syncing its
    /// clock. Does not wake the driver.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let view = page_state.with_page(|page| page.view());
    /// ```
    pub fn with_page<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&LandingPage) -> R,
    {
        let mut mounted = self.lock();
        mounted.catch_up(Instant::now());
        f(&mounted.page)
    }

    /// Executes a function with write access to the page, then wakes the
    /// driver.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// page_state.with_page_mut(|page| page.select_package(1));
    /// ```
    pub fn with_page_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut LandingPage) -> R,
    {
        let result = {
            let mut mounted = self.lock();
            mounted.catch_up(Instant::now());
            f(&mut mounted.page)
        };
        self.changed.notify_one();
        result
    }

    /// Syncs the clock and drains the outbox. Does not wake the driver.
    pub(crate) fn tick(&self) -> Tick {
        let mut mounted = self.lock();
        mounted.catch_up(Instant::now());
        Tick {
            events: mounted.page.take_events(),
            next_due: mounted
                .page
                .time_until_next()
                .map(|wait| mounted.synced_at + wait),
        }
    }

    /// Disposes the page and returns whatever was still in the outbox.
    pub(crate) fn dispose(&self) -> Vec<PageEvent> {
        let mut mounted = self.lock();
        mounted.page.dispose();
        mounted.page.take_events()
    }

    /// Resolves once a mutation happened since the last call.
    pub(crate) async fn changed(&self) {
        self.changed.notified().await;
    }

    // Core mutations validate before they write, so a page behind a
    // poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Mounted> {
        self.mounted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use premier_core::{LocaleTheme, PageTimings};

    fn state() -> PageState {
        PageState::new(LandingPage::new(LocaleTheme::default(), &PageTimings::default()).unwrap())
    }

    #[test]
    fn test_clones_share_the_page() {
        let state = state();
        let other = state.clone();
        assert!(other.with_page_mut(|p| p.select_package(1)));
        assert!(state.with_page(|p| p.booking().is_open()));
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let state = state();
        let poisoner = state.clone();
        let _ = std::thread::spawn(move || {
            poisoner.with_page_mut(|_| panic!("boom"));
        })
        .join();

        assert!(state.with_page(|p| !p.booking().is_open()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_catches_clock_up_first() {
        let state = state();
        tokio::time::advance(Duration::from_millis(3000)).await;

        // The hero rotated at 3000 ms before the click was applied.
        let cursor = state.with_page_mut(|p| p.hero().cursor());
        assert_eq!(cursor, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_reports_next_deadline() {
        let state = state();
        let start = Instant::now();

        // Loading gate at 2000 ms is the earliest timer after mount.
        let tick = state.tick();
        assert!(tick.events.is_empty());
        assert_eq!(tick.next_due, Some(start + Duration::from_millis(2000)));

        tokio::time::advance(Duration::from_millis(2500)).await;
        let tick = state.tick();
        assert!(state.with_page(|p| !p.is_loading()));
        assert_eq!(tick.next_due, Some(start + Duration::from_millis(3000)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_sees_timers_already_due() {
        let state = state();
        assert!(state.with_page_mut(|p| p.submit_search()));
        tokio::time::advance(Duration::from_millis(2000)).await;

        // No driver runs here; the read itself settles the latency timer.
        assert!(state.with_page(|p| !p.search().is_searching()));
        assert_eq!(state.tick().events.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_timer_fires_without_elapsed_time() {
        let timings = PageTimings {
            loading: Duration::ZERO,
            ..PageTimings::default()
        };
        let state = PageState::new(LandingPage::new(LocaleTheme::default(), &timings).unwrap());

        let tick = state.tick();
        assert!(state.with_page(|p| !p.is_loading()));
        assert!(tick.next_due.is_some_and(|due| due > Instant::now()));
    }

    #[tokio::test]
    async fn test_mutation_wakes_waiter() {
        let state = state();
        state.with_page_mut(|p| p.toggle_dark_mode());
        // The permit stored by notify_one resolves the next wait immediately.
        tokio::time::timeout(Duration::from_millis(100), state.changed())
            .await
            .unwrap();
    }

    #[test]
    fn test_dispose_flushes_outbox() {
        let state = state();
        state.with_page_mut(|p| p.select_service(1));
        let events = state.dispose();
        assert_eq!(events.len(), 1);
        assert!(!state.with_page_mut(|p| p.select_service(2)));
    }
}
