pub mod calendar_view;
pub mod colors;
pub mod interactive;
pub mod loading_indicator;

pub use calendar_view::{queue_grid, render_plain};
pub use colors::Theme;
pub use interactive::{StartTarget, run_interactive_ui};
pub use loading_indicator::LoadingIndicator;
