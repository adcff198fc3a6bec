//! # Page Driver
//!
//! Background task that runs the page's virtual clock against real time.
//!
//! ## Driver Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Page Driver Loop                                   │
//! │                                                                         │
//! │  ┌──────────────┐                                                      │
//! │  │ PageState    │── tick() ──► advance by whole ms since last sync     │
//! │  │ ::tick()     │             drain outbox ──► PageEventEmitter        │
//! │  └──────┬───────┘             next due timer ──┐                       │
//! │         │                                      ▼                        │
//! │         │              ┌─────────────────────────────────────────┐     │
//! │         │              │ select!                                 │     │
//! │         │              │   sleep_until(next_due)  ── timer due   │     │
//! │         └──────────────│   state.changed()        ── command ran │     │
//! │                        │   shutdown_rx.recv()     ── stop        │     │
//! │                        └─────────────────────────────────────────┘     │
//! │                                                                         │
//! │  On shutdown: dispose the page, flush the outbox, exit.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With no pending timer the driver sleeps until a command or shutdown
//! arrives.

use std::sync::Arc;

use premier_core::PageEvent;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::{ShellError, ShellResult};
use crate::state::PageState;

// =============================================================================
// Event Emitter Trait
// =============================================================================

/// Receives every event the page raises (implemented by the frontend bridge).
pub trait PageEventEmitter: Send + Sync {
    fn emit(&self, event: &PageEvent);
}

/// Writes each event to the log. The default sink for the binary.
pub struct LoggingEmitter;

impl PageEventEmitter for LoggingEmitter {
    fn emit(&self, event: &PageEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(event = event.name(), %payload, "Page event"),
            Err(e) => info!(event = event.name(), error = %e, "Page event (unserializable)"),
        }
    }
}

/// No-op event emitter for testing.
pub struct NoOpEmitter;

impl PageEventEmitter for NoOpEmitter {
    fn emit(&self, _event: &PageEvent) {}
}

// =============================================================================
// Page Driver
// =============================================================================

pub struct PageDriver {
    state: PageState,
    emitter: Arc<dyn PageEventEmitter>,
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for stopping the driver.
#[derive(Clone)]
pub struct PageDriverHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl PageDriverHandle {
    /// Asks the driver to dispose the page and stop.
    pub async fn shutdown(&self) -> ShellResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| ShellError::ChannelError("Shutdown channel closed".into()))
    }
}

impl PageDriver {
    /// Creates a driver and returns its handle.
    pub fn new(state: PageState, emitter: Arc<dyn PageEventEmitter>) -> (Self, PageDriverHandle) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let driver = PageDriver {
            state,
            emitter,
            shutdown_rx,
        };
        (driver, PageDriverHandle { shutdown_tx })
    }

    /// Runs the driver loop.
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) {
        info!("Page driver starting");

        loop {
            let tick = self.state.tick();
            self.emit_all(&tick.events);

            let due = async {
                match tick.next_due {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                _ = due => {}

                _ = self.state.changed() => {
                    debug!("Page changed, resyncing");
                }

                _ = self.shutdown_rx.recv() => {
                    info!("Page driver shutting down");
                    break;
                }
            }
        }

        let remaining = self.state.dispose();
        self.emit_all(&remaining);
        info!("Page driver stopped");
    }

    fn emit_all(&self, events: &[PageEvent]) {
        for event in events {
            self.emitter.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use premier_core::reveal::RevealTiming;
    use premier_core::{LandingPage, LocaleTheme, PageTimings, Scheduled, Section};

    #[derive(Default)]
    struct CollectingEmitter {
        events: Mutex<Vec<PageEvent>>,
    }

    impl CollectingEmitter {
        fn names(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().iter().map(|e| e.name()).collect()
        }
    }

    impl PageEventEmitter for CollectingEmitter {
        fn emit(&self, event: &PageEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    type Spawned = (PageState, Arc<CollectingEmitter>, PageDriverHandle, tokio::task::JoinHandle<()>);

    fn spawn() -> Spawned {
        spawn_with(PageTimings::default())
    }

    fn spawn_with(timings: PageTimings) -> Spawned {
        let page = LandingPage::new(LocaleTheme::default(), &timings).unwrap();
        let state = PageState::new(page);
        let emitter = Arc::new(CollectingEmitter::default());
        let (driver, handle) = PageDriver::new(state.clone(), emitter.clone());
        let task = tokio::spawn(driver.run());
        (state, emitter, handle, task)
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_follows_real_time() {
        let (state, _, handle, task) = spawn();

        sleep_ms(1999).await;
        assert!(state.with_page(|p| p.is_loading()));
        sleep_ms(2).await;
        assert!(state.with_page(|p| !p.is_loading()));

        sleep_ms(1000).await;
        assert_eq!(state.with_page(|p| p.hero().cursor()), 1);
        sleep_ms(3000).await;
        assert_eq!(state.with_page(|p| p.hero().cursor()), 2);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delays_do_not_stall_the_loop() {
        let timings = PageTimings {
            loading: Duration::ZERO,
            map_reveal: RevealTiming::from_millis(0, 0),
            ..PageTimings::default()
        };
        let (state, _, handle, task) = spawn_with(timings);

        state.with_page_mut(|p| p.set_section_visible(Section::Map, true));
        sleep_ms(10).await;
        assert!(state.with_page(|p| !p.is_loading()));
        assert!(state.with_page(|p| p.view().map.pins.iter().all(|pin| pin.revealed)));

        sleep_ms(2990).await;
        assert_eq!(state.with_page(|p| p.hero().cursor()), 1);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_completes_after_latency() {
        let (state, emitter, handle, task) = spawn();

        sleep_ms(500).await;
        assert!(state.with_page_mut(|p| p.submit_search()));
        sleep_ms(1999).await;
        assert!(state.with_page(|p| p.search().is_searching()));
        assert!(emitter.names().is_empty());

        sleep_ms(2).await;
        assert!(state.with_page(|p| !p.search().is_searching()));
        assert_eq!(emitter.names(), vec!["search_submitted"]);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_counters_run_once_section_is_visible() {
        let (state, _, handle, task) = spawn();

        state.with_page_mut(|p| p.set_section_visible(Section::Services, true));
        sleep_ms(10_000).await;
        let settled = state.with_page(|p| {
            p.catalog()
                .services()
                .all(|s| p.catalog().counter(s.id).is_some_and(|c| c.is_settled()))
        });
        assert!(settled);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_disposes_and_flushes() {
        let (state, emitter, handle, task) = spawn();

        state.with_page_mut(|p| {
            p.select_package(1);
            p.booking_mut().set_guests(3).unwrap();
            p.submit_booking();
        });
        handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert_eq!(emitter.names(), vec!["offer_selected", "booking_submitted"]);
        assert!(state.with_page(|p| p.is_disposed()));
        assert!(handle.shutdown().await.is_err());
    }
}
