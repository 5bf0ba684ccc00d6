//! Pure month-grid construction: day bucketing and week alignment.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

use super::dates::YearMonth;
use crate::data_fetcher::models::GameRecord;

/// Games of the rendered month keyed by day of month.
pub type DayBucketMap = BTreeMap<u32, Vec<GameRecord>>;

/// Partitions a month's games by release day, keeping the incoming order
/// within each day.
///
/// Games without a release date, with an unparsable one, or dated outside
/// `month` are left out of the grid.
pub fn bucket_by_day(month: YearMonth, games: &[GameRecord]) -> DayBucketMap {
    let mut buckets = DayBucketMap::new();
    for game in games {
        match game.release_date() {
            Some(date) if month.contains(date) => {
                buckets.entry(date.day()).or_default().push(game.clone());
            }
            Some(date) => debug!("Skipping '{}' released outside {}: {}", game.name, month, date),
            None => debug!("Skipping '{}' without a usable release date", game.name),
        }
    }
    buckets
}

/// Filler cells before day 1: the weekday index of day 1, Sunday = 0
pub fn leading_fillers(month: YearMonth) -> usize {
    month.first_weekday() as usize
}

/// Filler cells after the last day so the grid ends on a full week
pub fn trailing_fillers(leading: usize, days: usize) -> usize {
    let total_cells = leading + days;
    (7 - total_cells % 7) % 7
}

/// One rendered day of the month
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub games: Vec<GameRecord>,
    pub is_today: bool,
}

impl DayCell {
    /// Slideshow images of the cell, in game order
    pub fn images(&self) -> Vec<String> {
        self.games
            .iter()
            .filter_map(|game| game.background_image.clone())
            .collect()
    }

    /// Games that contribute a slide, aligned with [`DayCell::images`]
    pub fn games_with_images(&self) -> Vec<&GameRecord> {
        self.games
            .iter()
            .filter(|game| game.background_image.is_some())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Filler,
    Day(DayCell),
}

/// A month laid out in Sunday-first weeks
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    pub month: YearMonth,
    pub cells: Vec<GridCell>,
}

impl CalendarGrid {
    /// Lays out `month`, marking `today` when it falls inside the month.
    pub fn build(month: YearMonth, games: &[GameRecord], today: NaiveDate) -> Self {
        let mut buckets = bucket_by_day(month, games);
        let days = month.last_day();
        let leading = leading_fillers(month);
        let trailing = trailing_fillers(leading, days as usize);
        let today_day = month.contains(today).then(|| today.day());

        let mut cells = Vec::with_capacity(leading + days as usize + trailing);
        cells.extend(std::iter::repeat_n(GridCell::Filler, leading));
        for day in 1..=days {
            cells.push(GridCell::Day(DayCell {
                day,
                games: buckets.remove(&day).unwrap_or_default(),
                is_today: today_day == Some(day),
            }));
        }
        cells.extend(std::iter::repeat_n(GridCell::Filler, trailing));

        Self { month, cells }
    }

    /// Rows of seven cells
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            GridCell::Filler => None,
        })
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.day_cells().find(|cell| cell.day == day)
    }

    pub fn filler_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, GridCell::Filler))
            .count()
    }

    /// Total number of games placed in day cells
    pub fn game_count(&self) -> usize {
        self.day_cells().map(|cell| cell.games.len()).sum()
    }
}
