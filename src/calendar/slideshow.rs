//! Per-cell rotating artwork timers.
//!
//! Every day cell with artwork gets a [`Slideshow`]; cells with two or more
//! images also get a repeating timer that advances the active image. All
//! timers of a render are owned by the [`SlideshowController`] and cancelled
//! together before the next render starts its own.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::grid::CalendarGrid;
use crate::constants::slideshow;

/// Rotating images of one cell
#[derive(Debug)]
pub struct Slideshow {
    images: Vec<String>,
    active: AtomicUsize,
    advances: AtomicU64,
}

impl Slideshow {
    fn new(images: Vec<String>) -> Self {
        Self {
            images,
            active: AtomicUsize::new(0),
            advances: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn active_image(&self) -> Option<&str> {
        self.images.get(self.active_index()).map(String::as_str)
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.active_index()
    }

    /// Active flag per image; exactly one is set for a non-empty slideshow
    pub fn active_flags(&self) -> Vec<bool> {
        let active = self.active_index();
        (0..self.images.len()).map(|i| i == active).collect()
    }

    /// Number of timer-driven advances so far
    pub fn advance_count(&self) -> u64 {
        self.advances.load(Ordering::SeqCst)
    }

    /// Moves to the next image, wrapping, and returns the new index.
    ///
    /// The active index is a single value, so the previous image stops being
    /// active in the same step the next one becomes active.
    fn advance(&self) -> usize {
        let len = self.images.len().max(1);
        let previous = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |i| Some((i + 1) % len))
            .unwrap_or(0);
        self.advances.fetch_add(1, Ordering::SeqCst);
        (previous + 1) % len
    }
}

/// Owner of every live slideshow timer of the current render
#[derive(Debug)]
pub struct SlideshowController {
    interval: Duration,
    slides: HashMap<u32, Arc<Slideshow>>,
    timers: Vec<JoinHandle<()>>,
    changed: Arc<AtomicBool>,
}

impl SlideshowController {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(slideshow::INTERVAL_MS))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            slides: HashMap::new(),
            timers: Vec::new(),
            changed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replaces all slideshows with those of `grid`.
    ///
    /// Timers of the previous render are cancelled before any new timer is
    /// created.
    pub fn start(&mut self, grid: &CalendarGrid) {
        self.cancel_all();
        for cell in grid.day_cells() {
            let images = cell.images();
            if !images.is_empty() {
                self.start_cell(cell.day, images);
            }
        }
        debug!(
            "Started {} slideshows with {} timers for {}",
            self.slides.len(),
            self.timers.len(),
            grid.month
        );
    }

    /// Starts the slideshow of one cell; the first image is active immediately.
    ///
    /// A single image is shown statically and gets no timer.
    pub fn start_cell(&mut self, day: u32, images: Vec<String>) -> Arc<Slideshow> {
        let slide = Arc::new(Slideshow::new(images));
        if slide.len() >= 2 {
            self.timers.push(spawn_rotation(
                day,
                Arc::downgrade(&slide),
                self.interval,
                Arc::clone(&self.changed),
            ));
        }
        self.slides.insert(day, Arc::clone(&slide));
        slide
    }

    /// Cancels every timer and forgets every slideshow of the current render
    pub fn cancel_all(&mut self) {
        let cancelled = self.timers.len();
        for timer in self.timers.drain(..) {
            timer.abort();
        }
        self.slides.clear();
        if cancelled > 0 {
            debug!("Cancelled {} slideshow timers", cancelled);
        }
    }

    pub fn slide(&self, day: u32) -> Option<Arc<Slideshow>> {
        self.slides.get(&day).cloned()
    }

    /// Number of tracked timers of the current render
    pub fn active_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Returns whether any slide advanced since the last call
    pub fn take_changed(&self) -> bool {
        self.changed.swap(false, Ordering::SeqCst)
    }
}

impl Default for SlideshowController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SlideshowController {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

fn spawn_rotation(
    day: u32,
    slide: Weak<Slideshow>,
    period: Duration,
    changed: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            // The cell is gone once the controller dropped its handle
            let Some(slide) = slide.upgrade() else {
                break;
            };
            let index = slide.advance();
            changed.store(true, Ordering::SeqCst);
            trace!("Day {} slideshow advanced to image {}", day, index);
        }
    })
}
