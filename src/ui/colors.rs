use crossterm::style::Color;

/// Light or dark display palette.
///
/// The mode is purely visual: nothing outside the UI reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        Theme::from_dark_mode(!self.is_dark())
    }

    pub fn background(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(255), // Near white
            Theme::Dark => Color::AnsiValue(234),  // Charcoal
        }
    }

    pub fn text_fg(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(235),
            Theme::Dark => Color::AnsiValue(231), // Pure white
        }
    }

    pub fn header_bg(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(25),
            Theme::Dark => Color::AnsiValue(21), // Bright blue
        }
    }

    pub fn header_fg(self) -> Color {
        Color::AnsiValue(231)
    }

    pub fn weekday_fg(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(28),
            Theme::Dark => Color::AnsiValue(46), // Bright green
        }
    }

    pub fn filler_fg(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(250),
            Theme::Dark => Color::AnsiValue(238),
        }
    }

    pub fn today_fg(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(160),
            Theme::Dark => Color::AnsiValue(226), // Bright yellow
        }
    }

    /// Title of the game whose artwork is the active slide
    pub fn slide_fg(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(90),
            Theme::Dark => Color::AnsiValue(51), // Bright cyan
        }
    }

    pub fn error_fg(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(124),
            Theme::Dark => Color::AnsiValue(203),
        }
    }

    pub fn selection_bg(self) -> Color {
        match self {
            Theme::Light => Color::AnsiValue(153),
            Theme::Dark => Color::AnsiValue(201), // Bright magenta
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert!(Theme::from_dark_mode(true).is_dark());
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Light.background(), Theme::Dark.background());
        assert_ne!(Theme::Light.text_fg(), Theme::Dark.text_fg());
    }
}
