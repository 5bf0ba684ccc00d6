//! Calendar state and layout.
//!
//! - `dates`: month arithmetic shared with the proxy
//! - `grid`: day bucketing and week-aligned grid construction
//! - `slideshow`: per-cell artwork rotation timers
//! - `renderer`: navigation state machine tying fetching, grid and slideshows together

pub mod dates;
pub mod grid;
pub mod renderer;
pub mod slideshow;

pub use dates::YearMonth;
pub use grid::{CalendarGrid, DayBucketMap, DayCell, GridCell};
pub use renderer::{CalendarRenderer, NavigationTicket, RenderStatus};
pub use slideshow::{Slideshow, SlideshowController};
