//! Terminal event polling with activity-based intervals

use crate::constants::polling;
use crate::error::AppError;
use crossterm::event::{self, Event, KeyEvent};
use std::time::Duration;

/// Terminal input relevant to the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
}

/// Adaptive polling interval based on user activity
pub fn calculate_poll_interval(time_since_activity: Duration) -> Duration {
    if time_since_activity < Duration::from_secs(polling::SEMI_ACTIVE_THRESHOLD_SECONDS) {
        Duration::from_millis(polling::ACTIVE_MS)
    } else if time_since_activity < Duration::from_secs(polling::IDLE_THRESHOLD_SECONDS) {
        Duration::from_millis(polling::SEMI_ACTIVE_MS)
    } else {
        Duration::from_millis(polling::IDLE_MS)
    }
}

#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Waits up to one poll interval for a terminal event.
    ///
    /// `busy` forces the active interval, e.g. while a spinner or slideshow
    /// must keep animating.
    pub fn next_event(
        &self,
        time_since_activity: Duration,
        busy: bool,
    ) -> Result<Option<InputEvent>, AppError> {
        let poll_interval = if busy {
            Duration::from_millis(polling::ACTIVE_MS)
        } else {
            calculate_poll_interval(time_since_activity)
        };

        if !event::poll(poll_interval)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key_event) => Some(InputEvent::Key(key_event)),
            Event::Resize(_, _) => {
                tracing::debug!("Resize event received");
                Some(InputEvent::Resize)
            }
            _ => None,
        })
    }
}
