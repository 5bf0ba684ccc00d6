//! First-run prompts for settings that have no sensible default

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

/// Prompts for the URL of the game-data proxy and returns the trimmed input.
///
/// # Example
/// ```no_run
/// use release_calendar::config::user_prompts::prompt_for_proxy_url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let proxy_url = prompt_for_proxy_url().await?;
/// println!("Using proxy at {}", proxy_url);
/// # Ok(())
/// # }
/// ```
pub async fn prompt_for_proxy_url() -> Result<String, AppError> {
    println!("Please enter the URL of your game data proxy (e.g. https://example.com/api/proxy): ");
    let mut input = String::new();
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin);
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}
