use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/fluxo.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL; the ledger resource lives at `{api_url}/api/caixas`.
    pub api_url: String,
    pub log_level: String,
    /// Empty disables logging. The terminal is owned by the UI, so logs never
    /// go to stdout.
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5000".to_string(),
            log_level: "info".to_string(),
            log_file: "fluxo_tui.log".to_string(),
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "fluxo_tui", about = "Fluxo de caixa", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override backend base URL (e.g. http://127.0.0.1:5000).
    #[arg(long)]
    api_url: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FLUXO"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    Ok(settings)
}
