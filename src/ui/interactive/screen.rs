//! Full-screen drawing of the interactive calendar

use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

use super::state_manager::{InputMode, InteractiveState, SearchBox};
use crate::calendar::renderer::CalendarRenderer;
use crate::error::AppError;
use crate::ui::calendar_view::queue_grid;

const APP_TITLE: &str = "GAME RELEASE CALENDAR";
const CALENDAR_HELP: &str = "←/→ month   t today   / search   d dark mode   q quit";
const SEARCH_HELP: &str = "type to search   ↑/↓ pick   Enter go   Esc cancel";

/// Text of the header line
pub fn header_text(renderer: &CalendarRenderer, state: &InteractiveState) -> String {
    let month = renderer
        .display()
        .map(|month| month.title())
        .unwrap_or_default();
    match &state.loading {
        Some(indicator) => format!("{APP_TITLE}  {month}  {}", indicator.line()),
        None => format!("{APP_TITLE}  {month}"),
    }
}

pub fn footer_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Calendar => CALENDAR_HELP,
        InputMode::Search => SEARCH_HELP,
    }
}

/// Suggestion lines as shown under the search box, with release dates
pub fn suggestion_lines(search: &SearchBox) -> Vec<String> {
    search
        .suggestions()
        .iter()
        .map(|game| match game.released.as_deref() {
            Some(released) => format!("{} ({released})", game.name),
            None => format!("{} (TBA)", game.name),
        })
        .collect()
}

fn queue_line<W: Write>(out: &mut W, text: &str) -> Result<(), AppError> {
    out.queue(Print(text))?
        .queue(Clear(ClearType::UntilNewLine))?
        .queue(Print("\r\n"))?;
    Ok(())
}

fn queue_search_box<W: Write>(out: &mut W, state: &InteractiveState) -> Result<(), AppError> {
    let theme = state.theme;
    out.queue(SetForegroundColor(theme.text_fg()))?;
    queue_line(out, &format!("Search: {}_", state.search.query()))?;

    for (index, line) in suggestion_lines(&state.search).iter().enumerate() {
        let selected = state.search.selected_index() == Some(index);
        if selected {
            out.queue(SetBackgroundColor(theme.selection_bg()))?;
        }
        queue_line(out, &format!("  {line}"))?;
        if selected {
            out.queue(SetBackgroundColor(theme.background()))?;
        }
    }
    Ok(())
}

/// Redraws the whole screen and flushes it
pub fn draw<W: Write>(
    out: &mut W,
    renderer: &CalendarRenderer,
    state: &InteractiveState,
) -> Result<(), AppError> {
    let theme = state.theme;
    out.queue(SetBackgroundColor(theme.background()))?
        .queue(Clear(ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?;

    out.queue(SetBackgroundColor(theme.header_bg()))?
        .queue(SetForegroundColor(theme.header_fg()))?
        .queue(SetAttribute(Attribute::Bold))?;
    queue_line(out, &header_text(renderer, state))?;
    out.queue(SetAttribute(Attribute::NormalIntensity))?
        .queue(SetBackgroundColor(theme.background()))?;
    queue_line(out, "")?;

    if let Some(grid) = renderer.grid() {
        queue_grid(out, grid, renderer.slideshow(), theme)?;
        out.queue(SetBackgroundColor(theme.background()))?;
    }

    if let Some(message) = renderer.message() {
        out.queue(SetForegroundColor(theme.error_fg()))?;
        queue_line(out, message)?;
    }

    if state.mode == InputMode::Search {
        queue_search_box(out, state)?;
    }

    out.queue(SetForegroundColor(theme.filler_fg()))?;
    queue_line(out, footer_text(state.mode))?;
    out.queue(ResetColor)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::dates::YearMonth;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use crate::data_fetcher::models::GameRecord;
    use crate::data_fetcher::{GameApiClient, MonthGameFetcher, SearchService};
    use crate::error::AppError;
    use crate::ui::colors::Theme;
    use crate::ui::loading_indicator::LoadingIndicator;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn offline_renderer() -> CalendarRenderer {
        let api = GameApiClient::new(create_test_http_client(), "http://127.0.0.1:9");
        CalendarRenderer::new(MonthGameFetcher::new(api.clone()), SearchService::new(api))
            .with_clock(|| NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
    }

    #[tokio::test]
    async fn test_draw_shows_grid_error_and_footer() {
        let mut renderer = offline_renderer();
        let ticket = renderer.begin_navigation(YearMonth::new(2024, 1).unwrap());
        let mut game = GameRecord::from_selection("Helldivers 2", Some("2024-02-08".into()), None);
        game.metacritic = Some(82);
        renderer.complete_navigation(ticket, Ok(Arc::new(vec![game])));
        renderer.report_error(&AppError::game_not_found("Half-Life 3"));

        let state = InteractiveState::new(Theme::Dark);
        let mut buffer = Vec::new();
        draw(&mut buffer, &renderer, &state).unwrap();

        let text = String::from_utf8_lossy(&buffer);
        assert!(text.contains("February 2024"));
        assert!(text.contains("Helldivers 2"));
        assert!(text.contains("Half-Life 3"));
        assert!(text.contains(CALENDAR_HELP));
    }

    #[tokio::test]
    async fn test_header_shows_loading_indicator() {
        let renderer = offline_renderer();
        let mut state = InteractiveState::new(Theme::Light);
        assert_eq!(header_text(&renderer, &state), format!("{APP_TITLE}  "));

        state.loading = Some(LoadingIndicator::for_month(YearMonth::new(2024, 2).unwrap()));
        assert!(header_text(&renderer, &state).ends_with("| Loading March 2024"));
    }

    #[test]
    fn test_suggestion_lines_mark_unannounced_dates() {
        let mut state = InteractiveState::new(Theme::Light);
        state.enter_search();
        for c in "hollow".chars() {
            state.search.push(c);
        }
        state.search.apply(
            "hollow",
            vec![
                GameRecord::from_selection("Hollow Knight", Some("2017-02-24".into()), None),
                GameRecord::from_selection("Hollow Knight: Silksong", None, None),
            ],
        );
        assert_eq!(
            suggestion_lines(&state.search),
            vec![
                "Hollow Knight (2017-02-24)".to_string(),
                "Hollow Knight: Silksong (TBA)".to_string()
            ]
        );
        assert_eq!(footer_text(state.mode), SEARCH_HELP);
    }
}
