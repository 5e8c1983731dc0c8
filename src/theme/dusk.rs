//! Dusk theme implementation

use ratatui::style::Color;

use super::Theme;

/// Dusk color palette: warm neutrals with marigold and teal accents
pub const DUSK: Theme = Theme {
    name: String::new(), // Will be set properly with const fn when stabilized

    // Background colors
    bg_primary: Color::Rgb(28, 25, 23),   // #1c1917
    bg_secondary: Color::Rgb(41, 37, 36), // #292524

    // Foreground colors
    fg_primary: Color::Rgb(231, 229, 228),   // #e7e5e4
    fg_secondary: Color::Rgb(214, 211, 209), // #d6d3d1
    fg_muted: Color::Rgb(120, 113, 108),     // #78716c

    // Accent colors
    accent_primary: Color::Rgb(245, 158, 11),  // #f59e0b
    accent_secondary: Color::Rgb(20, 184, 166), // #14b8a6

    // Semantic colors
    success: Color::Rgb(132, 204, 22), // #84cc16
    warning: Color::Rgb(234, 179, 8),  // #eab308
    error: Color::Rgb(239, 68, 68),    // #ef4444

    // UI elements
    border: Color::Rgb(68, 64, 60),             // #44403c
    border_focused: Color::Rgb(245, 158, 11),   // #f59e0b
    selection: Color::Rgb(58, 46, 32),          // #3a2e20
};

// Workaround for const String
impl Theme {
    pub fn dusk() -> Self {
        Theme { name: "Dusk".to_string(), ..DUSK }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dusk_has_correct_name() {
        let theme = Theme::dusk();
        assert_eq!(theme.name, "Dusk");
    }

    #[test]
    fn dusk_colors_are_rgb() {
        let theme = Theme::dusk();
        assert!(matches!(theme.bg_primary, Color::Rgb(_, _, _)));
        assert!(matches!(theme.accent_primary, Color::Rgb(_, _, _)));
    }
}
