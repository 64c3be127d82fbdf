//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `social_core` linkage, configuration loading and database
//!   bootstrap from one executable.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `social_cli [config.toml]`

use social_core::db::migrations::current_version;
use social_core::db::{open_db_in_memory, open_db_with_timeout};
use social_core::{sqlite_service, CoreConfig, Post};
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("social_cli error={message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::load_from(path),
        None => CoreConfig::load(),
    }
    .map_err(|err| err.to_string())?;

    let logging_active = social_core::init_logging_from(&config.logging)?;
    log::info!("event=cli_start module=cli status=ok logging_active={logging_active}");

    let conn = match config.database.path.as_ref() {
        Some(path) => {
            open_db_with_timeout(path, Duration::from_millis(config.database.busy_timeout_ms))
        }
        None => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    let posts = sqlite_service::<Post>(&conn, &config.recency)
        .retrieve_all()
        .map_err(|err| format!("{err}: {}", err.detail()))?;

    println!("social_core ping={}", social_core::ping());
    println!("social_core version={}", social_core::core_version());
    println!(
        "social_core schema_version={}",
        current_version(&conn).map_err(|err| err.to_string())?
    );
    println!("social_core posts={}", posts.len());
    Ok(())
}
