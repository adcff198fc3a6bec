//! # Premier Shell Library
//!
//! Embedding shell for the Dubai Premier landing page: maps the page's
//! virtual clock onto real time, exposes the command surface a frontend
//! bridge calls, and reports page events.
//!
//! ## Module Organization
//! ```text
//! premier_shell/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── page.rs     ◄─── PageState (Arc<Mutex<LandingPage>> + clock sync)
//! │   └── config.rs   ◄─── ShellConfig (TOML + env)
//! ├── commands/       ◄─── Thin calls over PageState
//! ├── driver.rs       ◄─── PageDriver task + PageEventEmitter
//! └── error.rs        ◄─── ShellError, ApiError
//! ```

pub mod commands;
pub mod driver;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use premier_core::{LandingPage, Section};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use driver::{LoggingEmitter, PageDriver};
use error::ShellResult;
use state::{PageState, ShellConfig};

pub use error::{ApiError, ErrorCode, ShellError};

/// Runs the shell until Ctrl-C.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → premier.toml → PREMIER_* environment                   │
/// │     • invalid config: defaults, warned once logging is up               │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG if set, else [logging].filter                            │
/// │                                                                         │
/// │  3. Mount Page ───────────────────────────────────────────────────────► │
/// │     • LandingPage with configured locale and timings                    │
/// │     • PageState wraps it for commands and the driver                    │
/// │                                                                         │
/// │  4. Spawn Driver ─────────────────────────────────────────────────────► │
/// │     • PageDriver with LoggingEmitter                                    │
/// │                                                                         │
/// │  5. Headless Viewport ────────────────────────────────────────────────► │
/// │     • every section reported visible (no scroll position to observe)    │
/// │                                                                         │
/// │  6. Wait for Ctrl-C, shut the driver down (page disposed)               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> ShellResult<()> {
    let (config, load_error) = match ShellConfig::load(config_path) {
        Ok(config) => (config, None),
        Err(e) => (ShellConfig::default(), Some(e)),
    };

    init_tracing(&config.logging.filter);
    if let Some(e) = load_error {
        warn!("Failed to load shell config: {}. Using defaults.", e);
    }

    info!(
        language = %config.locale.language,
        dark_mode = config.locale.dark_mode,
        "Starting Premier shell"
    );

    let page = LandingPage::new(config.locale(), &config.to_page_timings())?;
    let state = PageState::new(page);

    let (driver, handle) = PageDriver::new(state.clone(), Arc::new(LoggingEmitter));
    let task = tokio::spawn(driver.run());

    for section in [Section::Services, Section::Testimonials, Section::Map] {
        commands::page::set_section_visible(&state, section, true);
    }

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received");

    handle.shutdown().await?;
    if let Err(e) = task.await {
        warn!(error = %e, "Page driver task ended abnormally");
    }

    info!("Premier shell stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=premier_core=trace` - Trace the page engine only
/// - Default: the configured filter (`info`)
fn init_tracing(config_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed by an embedding host.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
