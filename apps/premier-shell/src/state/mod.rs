//! # Shell State
//!
//! - [`PageState`] - the mounted page, shared by commands and the driver
//! - [`ShellConfig`] - startup configuration

mod config;
mod page;

pub use config::{LocaleSection, LoggingSection, ShellConfig, TimingsSection};
pub use page::PageState;
