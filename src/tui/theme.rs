//! UI chrome colors and the active theme.
//!
//! The theme covers borders, text and status colors. Chart colors are data
//! colors and come from [`crate::render::palette`], so a category keeps its
//! color whichever theme is active.

use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Navy and gold of the Rail Saarthi brand.
const NAVY: Color = Color::Rgb(0x1e, 0x3a, 0x5f);
const GOLD: Color = Color::Rgb(0xd4, 0xa8, 0x53);

/// Chrome colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Panel and section titles
    pub brand: Color,
    /// Key hints and emphasis
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    /// What semi-transparent chart fills are composited over
    pub background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub highlight: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    /// Text drawn on a colored badge or bar
    pub on_badge: Color,
}

/// The selectable themes, in toggle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl Theme {
    /// Parse a configured theme name. Unknown names fall back to dark;
    /// config validation rejects them before this point.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            "high-contrast" | "highcontrast" | "hc" => Self::HighContrast,
            _ => Self::Dark,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrast => "high-contrast",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::HighContrast,
            Self::HighContrast => Self::Dark,
        }
    }

    #[must_use]
    pub const fn colors(self) -> ColorScheme {
        match self {
            Self::Dark => ColorScheme {
                brand: Color::Cyan,
                accent: GOLD,
                muted: Color::DarkGray,
                border: Color::DarkGray,
                border_focused: Color::Cyan,
                background: Color::Rgb(0x0f, 0x17, 0x2a),
                text: Color::White,
                text_muted: Color::Gray,
                highlight: GOLD,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                on_badge: Color::White,
            },
            Self::Light => ColorScheme {
                brand: NAVY,
                accent: GOLD,
                muted: Color::Rgb(150, 150, 150),
                border: Color::Rgb(180, 180, 180),
                border_focused: NAVY,
                background: Color::Rgb(255, 255, 255),
                text: Color::Rgb(30, 30, 30),
                text_muted: Color::Rgb(100, 100, 100),
                highlight: Color::Rgb(180, 140, 0),
                success: Color::Rgb(0x16, 0xa3, 0x4a),
                warning: Color::Rgb(0xca, 0x8a, 0x04),
                error: Color::Rgb(0xdc, 0x26, 0x26),
                on_badge: Color::White,
            },
            Self::HighContrast => ColorScheme {
                brand: Color::LightCyan,
                accent: Color::LightYellow,
                muted: Color::Gray,
                border: Color::White,
                border_focused: Color::LightCyan,
                background: Color::Black,
                text: Color::White,
                text_muted: Color::Gray,
                highlight: Color::LightYellow,
                success: Color::LightGreen,
                warning: Color::LightYellow,
                error: Color::LightRed,
                on_badge: Color::Black,
            },
        }
    }
}

static THEME: RwLock<Theme> = RwLock::new(Theme::Dark);

pub fn current_theme() -> Theme {
    *THEME.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Switch to the next theme and return its name.
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name()
}

/// Colors of the active theme.
pub fn colors() -> ColorScheme {
    current_theme().colors()
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Named styles shared by the panels.
pub struct Styles;

impl Styles {
    pub fn header_title() -> Style {
        Style::default().fg(colors().brand).bold()
    }

    pub fn section_title() -> Style {
        Style::default().fg(colors().brand).bold()
    }

    pub fn text() -> Style {
        Style::default().fg(colors().text)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn label() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn value() -> Style {
        Style::default().fg(colors().text).bold()
    }

    pub fn highlight() -> Style {
        Style::default().fg(colors().highlight).bold()
    }

    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error).bold()
    }
}

// ============================================================================
// Footer Hints
// ============================================================================

/// Key hints shown in the footer.
pub struct FooterHints;

impl FooterHints {
    /// Hints while single-key shortcuts are active
    pub fn dashboard() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tab", "type"),
            ("Enter", "analyze"),
            ("←→", "inspect point"),
            ("r", "refresh"),
            ("c", "clear"),
            ("t", "theme"),
            ("?", "help"),
            ("q", "quit"),
        ]
    }

    /// Hints while typing into the complaint input
    pub fn input() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Enter", "analyze"),
            ("Ctrl+W", "delete word"),
            ("Ctrl+L", "clear"),
            ("Esc", "done"),
        ]
    }
}

/// `[key]desc` pairs separated by spaces.
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(colors().accent).bold();
    let desc_style = Style::default().fg(colors().text_muted);
    hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, desc))| {
            let gap = (i > 0).then(|| Span::raw(" "));
            gap.into_iter().chain([
                Span::styled(format!("[{key}]"), key_style),
                Span::styled((*desc).to_string(), desc_style),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_rotation() {
        let theme = Theme::Dark;
        assert_eq!(theme.next(), Theme::Light);
        assert_eq!(theme.next().next(), Theme::HighContrast);
        assert_eq!(theme.next().next().next(), Theme::Dark);
    }

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("LIGHT"), Theme::Light);
        assert_eq!(Theme::from_name("hc"), Theme::HighContrast);
        assert_eq!(Theme::from_name("unknown"), Theme::Dark);
    }

    #[test]
    fn test_configured_names_round_trip() {
        for name in crate::config::VALID_THEMES {
            assert_eq!(Theme::from_name(name).name(), *name);
        }
    }

    #[test]
    fn test_footer_hints_render_key_and_description() {
        let spans = render_footer_hints(&[("q", "quit"), ("r", "refresh")]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[q]quit [r]refresh");
    }

    #[test]
    fn test_light_theme_uses_brand_colors() {
        let light = Theme::Light.colors();
        assert_eq!(light.brand, NAVY);
        assert_eq!(light.accent, GOLD);
        assert_ne!(Theme::Dark.colors(), light);
    }
}
