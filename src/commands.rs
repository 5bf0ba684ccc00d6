use crate::calendar::dates::YearMonth;
use crate::calendar::renderer::CalendarRenderer;
use crate::cli::Args;
use crate::config::Config;
use crate::config::user_prompts::prompt_for_proxy_url;
use crate::config::validation::normalize_proxy_url;
use crate::error::AppError;
use crate::ui::StartTarget;
use crate::ui::calendar_view::render_plain;
use crate::{NAME, VERSION};
use chrono::NaiveDate;
use crossterm::{execute, terminal::SetTitle};
use std::io::{Write, stdout};
use std::path::Path;

const WINDOW_TITLE: &str = "Game Release Calendar";

/// Parses a `YYYY-MM` month argument
pub fn parse_month_arg(value: &str) -> Result<YearMonth, AppError> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map(YearMonth::from_date)
        .map_err(|_| AppError::invalid_date(value))
}

/// Where to open the calendar, from `--month` or `--game`
pub fn start_target(args: &Args) -> Result<StartTarget, AppError> {
    if let Some(month) = &args.month {
        return Ok(StartTarget::Month(parse_month_arg(month)?));
    }
    Ok(match &args.game {
        Some(name) if !name.trim().is_empty() => StartTarget::Game(name.trim().to_string()),
        _ => StartTarget::Today,
    })
}

/// Handles the --version command.
pub fn handle_version_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(WINDOW_TITLE))?;
    println!("{NAME} {VERSION}");
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(WINDOW_TITLE))?;
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// A bare `--config` prompts for the new proxy URL. Changes are validated
/// before they are written.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_proxy_url) = &args.new_proxy_url {
        let new_proxy_url = if new_proxy_url.trim().is_empty() {
            prompt_for_proxy_url().await?
        } else {
            new_proxy_url.clone()
        };
        config.proxy_url = normalize_proxy_url(&new_proxy_url);
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Renders the start month once and writes it as plain text.
///
/// A failed load prints the error message instead of a grid.
pub async fn render_once<W: Write>(
    out: &mut W,
    renderer: &mut CalendarRenderer,
    start: StartTarget,
) -> Result<(), AppError> {
    match start {
        StartTarget::Today => renderer.jump_to_today().await,
        StartTarget::Month(month) => renderer.navigate_to(month).await,
        StartTarget::Game(name) => renderer.jump_to_game(&name, None, None).await,
    };

    if let Some(message) = renderer.message() {
        writeln!(out, "{message}")?;
    } else if let Some(grid) = renderer.grid() {
        for line in render_plain(grid, renderer.slideshow()) {
            writeln!(out, "{line}")?;
        }
    }

    renderer.teardown();
    Ok(())
}

/// Handles the --once command.
pub async fn handle_once_command(
    mut renderer: CalendarRenderer,
    start: StartTarget,
) -> Result<(), AppError> {
    execute!(stdout(), SetTitle(WINDOW_TITLE))?;
    let mut out = stdout();
    render_once(&mut out, &mut renderer, start).await?;
    out.flush()?;
    Ok(())
}
