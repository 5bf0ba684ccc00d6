//! Text layout of the month grid.
//!
//! A day cell is `CELL_WIDTH` columns by [`CELL_HEIGHT`] lines: the day number,
//! then the title of the game whose artwork is the active slide, then the
//! remaining games of the day. Terminals cannot show the artwork itself, so
//! the slideshow is rendered as the rotating highlighted title.

use crossterm::{
    QueueableCommand,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use std::io::Write;

use super::colors::Theme;
use crate::calendar::grid::{CalendarGrid, DayCell, GridCell};
use crate::calendar::slideshow::{Slideshow, SlideshowController};
use crate::constants::calendar::{CELL_WIDTH, WEEKDAY_LABELS};
use crate::error::AppError;

/// Lines per day cell
pub const CELL_HEIGHT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLineKind {
    Filler,
    DayNumber { today: bool },
    ActiveSlide,
    Game,
    More,
    Blank,
}

/// One line of one cell, padded to the cell width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLine {
    pub text: String,
    pub kind: CellLineKind,
}

impl CellLine {
    fn new(text: &str, kind: CellLineKind) -> Self {
        Self {
            text: fit(text, CELL_WIDTH),
            kind,
        }
    }

    fn blank() -> Self {
        Self::new("", CellLineKind::Blank)
    }
}

/// Truncates or pads `text` to exactly `width` characters
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    } else {
        format!("{text}{}", " ".repeat(width - count))
    }
}

/// Name of the game whose image is the active slide of `cell`
pub fn active_slide_title<'a>(cell: &'a DayCell, slide: Option<&Slideshow>) -> Option<&'a str> {
    let slide = slide.filter(|s| !s.is_empty())?;
    cell.games_with_images()
        .get(slide.active_index())
        .map(|game| game.name.as_str())
}

/// Lines of one grid cell
pub fn cell_lines(cell: &GridCell, slide: Option<&Slideshow>) -> Vec<CellLine> {
    let GridCell::Day(day) = cell else {
        return vec![CellLine::new("", CellLineKind::Filler); CELL_HEIGHT];
    };

    let mut lines = Vec::with_capacity(CELL_HEIGHT);
    let number = if day.is_today {
        format!("{:>2} today", day.day)
    } else {
        format!("{:>2}", day.day)
    };
    lines.push(CellLine::new(
        &number,
        CellLineKind::DayNumber {
            today: day.is_today,
        },
    ));

    let active = active_slide_title(day, slide);
    if let Some(title) = active {
        lines.push(CellLine::new(&format!("▶{title}"), CellLineKind::ActiveSlide));
    }

    let mut rest: Vec<&str> = day.games.iter().map(|g| g.name.as_str()).collect();
    if let Some(title) = active
        && let Some(pos) = rest.iter().position(|name| *name == title)
    {
        rest.remove(pos);
    }

    let room = CELL_HEIGHT - lines.len();
    if rest.len() > room {
        for name in rest.iter().take(room - 1) {
            lines.push(CellLine::new(name, CellLineKind::Game));
        }
        let hidden = rest.len() - (room - 1);
        lines.push(CellLine::new(&format!("+{hidden} more"), CellLineKind::More));
    } else {
        for name in rest {
            lines.push(CellLine::new(name, CellLineKind::Game));
        }
    }

    lines.resize(CELL_HEIGHT, CellLine::blank());
    lines
}

/// Lines of one week: `CELL_HEIGHT` rows of seven cell lines each
pub fn week_lines(week: &[GridCell], slides: &SlideshowController) -> Vec<Vec<CellLine>> {
    let columns: Vec<Vec<CellLine>> = week
        .iter()
        .map(|cell| {
            let slide = match cell {
                GridCell::Day(day) => slides.slide(day.day),
                GridCell::Filler => None,
            };
            cell_lines(cell, slide.as_deref())
        })
        .collect();

    (0..CELL_HEIGHT)
        .map(|row| columns.iter().map(|column| column[row].clone()).collect())
        .collect()
}

fn weekday_header() -> String {
    WEEKDAY_LABELS
        .iter()
        .map(|label| fit(label, CELL_WIDTH))
        .collect::<Vec<_>>()
        .join("│")
}

fn week_separator() -> String {
    vec!["─".repeat(CELL_WIDTH); 7].join("┼")
}

/// Plain-text rendering of the whole month, used for `--once` output
pub fn render_plain(grid: &CalendarGrid, slides: &SlideshowController) -> Vec<String> {
    let mut out = vec![grid.month.title(), weekday_header(), week_separator()];
    for week in grid.weeks() {
        for row in week_lines(week, slides) {
            out.push(
                row.iter()
                    .map(|line| line.text.as_str())
                    .collect::<Vec<_>>()
                    .join("│"),
            );
        }
        out.push(week_separator());
    }
    out
}

fn line_colors(kind: CellLineKind, theme: Theme) -> (crossterm::style::Color, bool) {
    match kind {
        CellLineKind::Filler => (theme.filler_fg(), false),
        CellLineKind::DayNumber { today: true } => (theme.today_fg(), true),
        CellLineKind::DayNumber { today: false } => (theme.text_fg(), true),
        CellLineKind::ActiveSlide => (theme.slide_fg(), true),
        CellLineKind::Game | CellLineKind::More | CellLineKind::Blank => (theme.text_fg(), false),
    }
}

/// Queues the weekday header and the grid rows, starting at the cursor's line
pub fn queue_grid<W: Write>(
    out: &mut W,
    grid: &CalendarGrid,
    slides: &SlideshowController,
    theme: Theme,
) -> Result<(), AppError> {
    out.queue(SetBackgroundColor(theme.background()))?
        .queue(SetForegroundColor(theme.weekday_fg()))?
        .queue(Print(weekday_header()))?
        .queue(Print("\r\n"))?;

    for week in grid.weeks() {
        out.queue(SetForegroundColor(theme.filler_fg()))?
            .queue(Print(week_separator()))?
            .queue(Print("\r\n"))?;
        for row in week_lines(week, slides) {
            for (column, line) in row.iter().enumerate() {
                if column > 0 {
                    out.queue(SetForegroundColor(theme.filler_fg()))?
                        .queue(Print("│"))?;
                }
                let (color, bold) = line_colors(line.kind, theme);
                out.queue(SetForegroundColor(color))?;
                if bold {
                    out.queue(SetAttribute(Attribute::Bold))?;
                }
                out.queue(Print(&line.text))?;
                if bold {
                    out.queue(SetAttribute(Attribute::NormalIntensity))?;
                }
            }
            out.queue(Print("\r\n"))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::dates::YearMonth;
    use crate::data_fetcher::models::GameRecord;
    use chrono::NaiveDate;

    fn game(name: &str, released: &str, image: bool) -> GameRecord {
        let mut game = GameRecord::from_selection(name, Some(released.to_string()), None);
        if image {
            game.background_image = Some(format!("https://img.example/{name}.jpg"));
        }
        game
    }

    fn february_grid(games: &[GameRecord]) -> CalendarGrid {
        CalendarGrid::build(
            YearMonth::new(2024, 1).unwrap(),
            games,
            NaiveDate::from_ymd_opt(2024, 2, 8).unwrap(),
        )
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 5), "abcd…");
        assert_eq!(fit("abcde", 5).chars().count(), 5);
    }

    #[test]
    fn test_filler_cell_is_blank() {
        let lines = cell_lines(&GridCell::Filler, None);
        assert_eq!(lines.len(), CELL_HEIGHT);
        assert!(lines.iter().all(|l| l.kind == CellLineKind::Filler));
        assert!(lines.iter().all(|l| l.text.trim().is_empty()));
    }

    #[tokio::test]
    async fn test_active_slide_listed_first_then_rest() {
        let grid = february_grid(&[
            game("Alpha", "2024-02-08", true),
            game("Beta", "2024-02-08", false),
            game("Gamma", "2024-02-08", true),
        ]);
        let mut slides = SlideshowController::new();
        slides.start(&grid);

        let cell = grid.cells.iter().find(|c| matches!(c, GridCell::Day(d) if d.day == 8)).unwrap();
        let slide = slides.slide(8).unwrap();
        let lines = cell_lines(cell, Some(&slide));

        assert_eq!(lines[0].kind, CellLineKind::DayNumber { today: true });
        assert!(lines[0].text.starts_with(" 8 today"));
        assert_eq!(lines[1].kind, CellLineKind::ActiveSlide);
        assert!(lines[1].text.starts_with("▶Alpha"));
        assert!(lines[2].text.starts_with("Beta"));
        assert!(lines[3].text.starts_with("Gamma"));
    }

    #[test]
    fn test_overflow_collapses_into_more_line() {
        let games: Vec<GameRecord> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|name| game(name, "2024-02-10", false))
            .collect();
        let grid = february_grid(&games);
        let cell = grid.cells.iter().find(|c| matches!(c, GridCell::Day(d) if d.day == 10)).unwrap();

        let lines = cell_lines(cell, None);
        assert_eq!(lines.len(), CELL_HEIGHT);
        assert!(lines[1].text.starts_with('A'));
        assert!(lines[2].text.starts_with('B'));
        assert_eq!(lines[3].kind, CellLineKind::More);
        assert!(lines[3].text.starts_with("+3 more"));
    }

    #[test]
    fn test_render_plain_shape() {
        let grid = february_grid(&[]);
        let slides = SlideshowController::new();
        let lines = render_plain(&grid, &slides);

        assert_eq!(lines[0], "February 2024");
        assert!(lines[1].starts_with("SUN"));
        let weeks = grid.cells.len() / 7;
        assert_eq!(lines.len(), 3 + weeks * (CELL_HEIGHT + 1));

        let row_width = 7 * CELL_WIDTH + 6;
        assert!(lines[3..].iter().all(|l| l.chars().count() == row_width));
    }

    #[test]
    fn test_queue_grid_writes_output() {
        let grid = february_grid(&[game("Helldivers 2", "2024-02-08", false)]);
        let slides = SlideshowController::new();
        let mut buffer = Vec::new();
        queue_grid(&mut buffer, &grid, &slides, Theme::Dark).unwrap();

        let text = String::from_utf8_lossy(&buffer);
        assert!(text.contains("Helldivers 2"));
        assert!(text.contains("SAT"));
    }
}
