use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode.
/// That is the case for `--once`, for config operations and for `--version`.
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once
        || args.new_proxy_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
        || args.version
}

/// Whether the command only touches the config file and exits
pub fn is_config_operation(args: &Args) -> bool {
    args.new_proxy_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Video Game Release Calendar
///
/// A month-grid calendar of video game releases, fed by a key-hiding proxy in
/// front of a game-data service. Each day shows the games released on it and
/// rotates through their artwork.
///
/// In interactive mode (default):
/// - Use arrow keys (←/→) to move between months, 't' jumps to today
/// - Press '/' to search; type at least three characters for suggestions,
///   ↑/↓ to pick one and Enter to jump to its release month
/// - Press 'd' to toggle dark mode (remembered between runs)
/// - Press 'q' to quit
#[derive(Parser, Debug, Default)]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
pub struct Args {
    /// Print one month once and exit. Useful for scripts.
    #[arg(short, long)]
    pub once: bool,

    /// Month to show in YYYY-MM format. Defaults to the current month.
    #[arg(long = "month", short = 'm', help_heading = "Display Options")]
    pub month: Option<String>,

    /// Jump to the release month of the named game.
    #[arg(
        long = "game",
        short = 'g',
        help_heading = "Display Options",
        conflicts_with = "month"
    )]
    pub game: Option<String>,

    /// Update proxy URL in config. Will prompt for a new URL if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "PROXY_URL",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_proxy_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Show version information
    #[arg(short = 'V', long = "version", help_heading = "Info")]
    pub version: bool,

    /// Also print logs to the terminal in `--once` mode.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
