//! # Premier Shell Entry Point
//!
//! ```text
//! premier-shell [CONFIG_PATH]
//! ```
//!
//! Without a path the platform config directory is searched for
//! `premier.toml`. The setup lives in lib.rs so it can be embedded.

use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    match premier_shell::run(config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("premier-shell: {e}");
            ExitCode::FAILURE
        }
    }
}
