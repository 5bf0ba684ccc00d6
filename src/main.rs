// src/main.rs
use clap::Parser;
use release_calendar::calendar::CalendarRenderer;
use release_calendar::cli::{Args, is_config_operation};
use release_calendar::commands::{
    handle_config_update_command, handle_list_config_command, handle_once_command,
    handle_version_command, start_target,
};
use release_calendar::config::Config;
use release_calendar::data_fetcher::{GameApiClient, MonthGameFetcher, SearchService};
use release_calendar::error::AppError;
use release_calendar::logging::setup_logging;
use release_calendar::preferences::PreferenceStore;
use release_calendar::ui::run_interactive_ui;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Handle version flag first
    if args.version {
        return handle_version_command();
    }

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_operation(&args) {
        return handle_config_update_command(&args).await;
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;
    let start = start_target(&args)?;

    let api = GameApiClient::from_config(&config)?;
    tracing::info!("Using release calendar proxy at {}", api.proxy_url());
    let renderer = CalendarRenderer::new(MonthGameFetcher::new(api.clone()), SearchService::new(api));

    if args.once {
        return handle_once_command(renderer, start).await;
    }

    run_interactive_ui(renderer, PreferenceStore::default_location(), start, args.debug).await
}
