//! Loading indicator for the calendar header

use crate::calendar::dates::YearMonth;

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Rotating ASCII spinner shown while a month is being fetched
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    message: String,
    frame: usize,
}

impl LoadingIndicator {
    pub fn new(message: String) -> Self {
        Self { message, frame: 0 }
    }

    pub fn for_month(month: YearMonth) -> Self {
        Self::new(format!("Loading {}", month.title()))
    }

    pub fn current_frame(&self) -> &str {
        FRAMES[self.frame]
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn next_frame(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Spinner and message as one line
    pub fn line(&self) -> String {
        format!("{} {}", self.current_frame(), self.message)
    }
}
