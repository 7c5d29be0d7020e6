use anyhow::Context;
use tracing_subscriber::EnvFilter;

use grist_calendar::storage::config::Config;

mod cli;
use cli::{CliMode, USAGE, parse_cli_mode, run_agenda_mode};
mod tui;
use tui::run_tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = match parse_cli_mode() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    if options.mode == CliMode::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    setup_logging();

    let config_path = options.config_path.unwrap_or_else(Config::config_path);
    let config = Config::load_or_create_at(&config_path)
        .with_context(|| format!("Cannot load config from {}", config_path.display()))?
        .with_env_overrides();

    let result = match options.mode {
        CliMode::Agenda(date) => run_agenda_mode(config, date).await,
        CliMode::Calendar | CliMode::Help => run_tui(config).await,
    };

    if let Err(e) = &result {
        tracing::error!("Exiting with error: {:#}", e);
    }
    result
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "grist-calendar.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    std::mem::forget(_guard);

    tracing::info!("grist-calendar started");
}
