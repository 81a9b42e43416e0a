mod app;
mod client;
mod config;
mod error;
mod ui;

#[cfg(test)]
mod testing;

use std::{fs::OpenOptions, sync::Mutex};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;
    tracing::info!(api_url = %config.api_url, "starting fluxo_tui");

    let mut app = app::App::new(&config)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file: stdout is the alternate screen while the UI runs.
fn init_tracing(config: &AppConfig) -> Result<()> {
    if config.log_file.is_empty() {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fluxo_tui={level},api_types={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
