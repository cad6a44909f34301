//! Colors and styles for the show and episode screens
//!
//! Everything is `Color::Rgb` so the palette looks the same on every
//! truecolor terminal.

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0f);
    /// Status bar and search box
    pub const PANEL: Color = Color::Rgb(0x14, 0x14, 0x1e);
    pub const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
    /// Summaries, genres, key descriptions
    pub const DIM: Color = Color::Rgb(0x8a, 0x8a, 0x9a);

    /// Cyan: titles, focus, loading
    pub const PRIMARY: Color = Color::Rgb(0x00, 0xff, 0xf2);
    /// Magenta: episode codes, show status
    pub const SECONDARY: Color = Color::Rgb(0xff, 0x00, 0xff);
    /// Yellow: selection markers, jump target, key hints
    pub const ACCENT: Color = Color::Rgb(0xff, 0xff, 0x00);
    pub const ERROR: Color = Color::Rgb(0xff, 0x00, 0x40);
    pub const BORDER: Color = Color::Rgb(0x00, 0x80, 0x78);

    pub const RATING_HIGH: Color = Color::Rgb(0x00, 0xff, 0x00);
    pub const RATING_MID: Color = Color::Rgb(0xff, 0xaa, 0x00);

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// "Loading shows..." and friends
    pub fn loading() -> Style {
        Self::title()
    }

    // -------------------------------------------------------------------------
    // Chrome
    // -------------------------------------------------------------------------

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }

    pub fn status_bar() -> Style {
        Self::input()
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn keybind_desc() -> Style {
        Self::dimmed()
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Highlighted show or episode row, drawn inverted
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// `S01E01`
    pub fn episode_code() -> Style {
        Self::secondary()
    }

    pub fn genre() -> Style {
        Self::dimmed()
    }

    /// TVMaze average rating out of 10
    pub fn rating(rating: f32) -> Style {
        if rating >= 7.5 {
            Style::default().fg(Self::RATING_HIGH)
        } else if rating >= 6.0 {
            Style::default().fg(Self::RATING_MID)
        } else {
            Self::dimmed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(color: Color) -> f64 {
        let Color::Rgb(r, g, b) = color else {
            panic!("{:?} is not an RGB color", color);
        };
        let channel = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
    }

    /// WCAG contrast ratio, 1.0 to 21.0
    fn contrast(a: Color, b: Color) -> f64 {
        let (la, lb) = (luminance(a), luminance(b));
        (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
    }

    #[test]
    fn test_body_text_meets_aa() {
        for fg in [Theme::TEXT, Theme::DIM, Theme::PRIMARY, Theme::ACCENT] {
            for bg in [Theme::BACKGROUND, Theme::PANEL] {
                let ratio = contrast(fg, bg);
                assert!(ratio >= 4.5, "{:?} on {:?} is {:.2}:1", fg, bg, ratio);
            }
        }
    }

    #[test]
    fn test_selected_row_is_readable() {
        assert!(contrast(Theme::BACKGROUND, Theme::PRIMARY) >= 4.5);
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Theme::rating(8.8).fg, Some(Theme::RATING_HIGH));
        assert_eq!(Theme::rating(7.5).fg, Some(Theme::RATING_HIGH));
        assert_eq!(Theme::rating(6.5).fg, Some(Theme::RATING_MID));
        assert_eq!(Theme::rating(3.0).fg, Some(Theme::DIM));
    }
}
