//! # Shell Configuration
//!
//! Configuration for the landing page shell, loaded from TOML with
//! environment overrides.
//!
//! ## Configuration Sources (in priority order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     PREMIER_LANGUAGE=ar                                                 │
//! │     PREMIER_DARK_MODE=true                                              │
//! │     PREMIER_AUTOPLAY_MS=5000                                            │
//! │     PREMIER_SEARCH_LATENCY_MS=2000                                      │
//! │     PREMIER_LOG=premier_core=debug                                      │
//! │                                                                         │
//! │  2. Config File                                                         │
//! │     Linux:   ~/.config/premier/premier.toml                             │
//! │     macOS:   ~/Library/Application Support/com.dubai.premier/...        │
//! │     Windows: %APPDATA%\dubai\premier\config\premier.toml                │
//! │                                                                         │
//! │  3. Defaults (lowest priority)                                          │
//! │     The page's built-in timings, English, light mode                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! [locale]
//! language = "AR"
//! dark_mode = true
//!
//! [timings]
//! hero_interval_ms = 3000
//! testimonial_interval_ms = 5000
//! search_latency_ms = 1500
//!
//! [logging]
//! filter = "info,premier_core=debug"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use premier_core::page::PageTimings;
use premier_core::reveal::RevealTiming;
use premier_core::{Language, LocaleTheme};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ShellError, ShellResult};

/// Root shell configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub locale: LocaleSection,

    #[serde(default)]
    pub timings: TimingsSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

// =============================================================================
// Config Sections
// =============================================================================

/// Initial language and colour scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSection {
    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub dark_mode: bool,
}

/// Page timings, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingsSection {
    #[serde(default = "default_hero_interval")]
    pub hero_interval_ms: u64,

    /// Testimonial autoplay interval
    #[serde(default = "default_testimonial_interval")]
    pub testimonial_interval_ms: u64,

    /// Delay before the first map pin drops
    #[serde(default = "default_reveal_base")]
    pub reveal_base_ms: u64,

    /// Extra delay per following map pin
    #[serde(default = "default_reveal_stagger")]
    pub reveal_stagger_ms: u64,

    /// Booking counter animation tick
    #[serde(default = "default_counter_tick")]
    pub counter_tick_ms: u64,

    /// Simulated search latency
    #[serde(default = "default_search_latency")]
    pub search_latency_ms: u64,

    /// Skeleton phase after mount
    #[serde(default = "default_loading")]
    pub loading_ms: u64,

    /// How long the newsletter confirmation stays up
    #[serde(default = "default_newsletter_reset")]
    pub newsletter_reset_ms: u64,
}

impl Default for TimingsSection {
    fn default() -> Self {
        TimingsSection {
            hero_interval_ms: default_hero_interval(),
            testimonial_interval_ms: default_testimonial_interval(),
            reveal_base_ms: default_reveal_base(),
            reveal_stagger_ms: default_reveal_stagger(),
            counter_tick_ms: default_counter_tick(),
            search_latency_ms: default_search_latency(),
            loading_ms: default_loading(),
            newsletter_reset_ms: default_newsletter_reset(),
        }
    }
}

fn default_hero_interval() -> u64 {
    3000
}

fn default_testimonial_interval() -> u64 {
    5000
}

fn default_reveal_base() -> u64 {
    500
}

fn default_reveal_stagger() -> u64 {
    300
}

fn default_counter_tick() -> u64 {
    50
}

fn default_search_latency() -> u64 {
    2000
}

fn default_loading() -> u64 {
    2000
}

fn default_newsletter_reset() -> u64 {
    3000
}

/// Log filter directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins over this
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        LoggingSection {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

// =============================================================================
// Loading & Saving
// =============================================================================

impl ShellConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Load from config file (if exists)
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> ShellResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shell config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load shell config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ShellResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ShellError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Shell config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// Repeating intervals and the delays that gate a user-visible result
    /// must be non-zero. One-shot delays (`loading_ms`, `reveal_base_ms`,
    /// `reveal_stagger_ms`) may be zero, which shows the page or the map
    /// pins immediately.
    pub fn validate(&self) -> ShellResult<()> {
        let t = &self.timings;
        let intervals = [
            ("hero_interval_ms", t.hero_interval_ms),
            ("testimonial_interval_ms", t.testimonial_interval_ms),
            ("counter_tick_ms", t.counter_tick_ms),
            ("search_latency_ms", t.search_latency_ms),
            ("newsletter_reset_ms", t.newsletter_reset_ms),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(ShellError::InvalidConfig(format!(
                    "timings.{} must be greater than 0",
                    name
                )));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ShellError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(language) = lookup("PREMIER_LANGUAGE") {
            match language.parse() {
                Ok(parsed) => {
                    debug!(language = %language, "Overriding language from environment");
                    self.locale.language = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring PREMIER_LANGUAGE"),
            }
        }

        if let Some(dark) = lookup("PREMIER_DARK_MODE") {
            match dark.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.locale.dark_mode = true,
                "0" | "false" | "no" | "off" => self.locale.dark_mode = false,
                other => warn!(value = %other, "Ignoring PREMIER_DARK_MODE"),
            }
        }

        if let Some(ms) = lookup("PREMIER_AUTOPLAY_MS") {
            if let Ok(ms) = ms.trim().parse::<u64>() {
                self.timings.testimonial_interval_ms = ms;
            }
        }

        if let Some(ms) = lookup("PREMIER_SEARCH_LATENCY_MS") {
            if let Ok(ms) = ms.trim().parse::<u64>() {
                self.timings.search_latency_ms = ms;
            }
        }

        if let Some(filter) = lookup("PREMIER_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dubai", "premier")
            .map(|dirs| dirs.config_dir().join("premier.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Initial locale for the page.
    pub fn locale(&self) -> LocaleTheme {
        LocaleTheme::new(self.locale.language, self.locale.dark_mode)
    }

    /// Typed timing table for [`premier_core::LandingPage::new`].
    pub fn to_page_timings(&self) -> PageTimings {
        let t = &self.timings;
        PageTimings {
            hero_interval: Duration::from_millis(t.hero_interval_ms),
            testimonial_interval: Duration::from_millis(t.testimonial_interval_ms),
            map_reveal: RevealTiming::from_millis(t.reveal_base_ms, t.reveal_stagger_ms),
            counter_tick: Duration::from_millis(t.counter_tick_ms),
            search_latency: Duration::from_millis(t.search_latency_ms),
            loading: Duration::from_millis(t.loading_ms),
            newsletter_reset: Duration::from_millis(t.newsletter_reset_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use premier_core::LandingPage;

    #[test]
    fn test_default_config_matches_page_defaults() {
        let config = ShellConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.to_page_timings(), PageTimings::default());
        assert_eq!(config.locale(), LocaleTheme::default());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ShellConfig::default();
        config.timings.counter_tick_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ShellError::InvalidConfig(msg)) if msg.contains("counter_tick_ms")
        ));

        config.timings.counter_tick_ms = 50;
        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_one_shot_delays_are_allowed() {
        let mut config = ShellConfig::default();
        config.timings.loading_ms = 0;
        config.timings.reveal_base_ms = 0;
        config.timings.reveal_stagger_ms = 0;
        assert!(config.validate().is_ok());

        let timings = config.to_page_timings();
        assert_eq!(timings.loading, Duration::ZERO);
        assert!(LandingPage::new(config.locale(), &timings).is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("premier.toml");
        std::fs::write(
            &path,
            "[locale]\nlanguage = \"AR\"\n\n[timings]\nsearch_latency_ms = 1500\n",
        )
        .unwrap();

        let config: ShellConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config.locale.language, Language::Ar);
        assert!(!config.locale.dark_mode);
        assert_eq!(config.timings.search_latency_ms, 1500);
        assert_eq!(config.timings.hero_interval_ms, 3000);
        assert_eq!(config.logging, LoggingSection::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("premier.toml");

        let mut config = ShellConfig::default();
        config.locale.dark_mode = true;
        config.timings.hero_interval_ms = 4000;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: ShellConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_zero_interval_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("premier.toml");
        std::fs::write(&path, "[timings]\nhero_interval_ms = 0\n").unwrap();

        assert!(ShellConfig::load(Some(path.clone())).is_err());
        let config = ShellConfig::load_or_default(Some(path));
        assert_eq!(config.timings.hero_interval_ms, 3000);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("premier.toml");
        std::fs::write(&path, "[timings\n").unwrap();
        assert!(matches!(
            ShellConfig::load(Some(path)),
            Err(ShellError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PREMIER_LANGUAGE", "arabic"),
            ("PREMIER_DARK_MODE", "on"),
            ("PREMIER_AUTOPLAY_MS", "7000"),
            ("PREMIER_SEARCH_LATENCY_MS", "not-a-number"),
            ("PREMIER_LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = ShellConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.locale.language, Language::Ar);
        assert!(config.locale.dark_mode);
        assert_eq!(config.timings.testimonial_interval_ms, 7000);
        assert_eq!(config.timings.search_latency_ms, 2000);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_bad_language_override_is_ignored() {
        let mut config = ShellConfig::default();
        config.apply_overrides(|key| (key == "PREMIER_LANGUAGE").then(|| "klingon".to_string()));
        assert_eq!(config.locale.language, Language::En);
    }
}
