//! Color palette

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub success: Color,
    pub error: Color,
}

impl Palette {
    /// Grays, with green/red reserved for notifications
    pub const MONO: Self = Self {
        fg_primary: Color::Rgb(255, 255, 255),    // #ffffff
        fg_secondary: Color::Rgb(136, 136, 136),  // #888888
        accent: Color::Rgb(255, 255, 255),        // #ffffff
        border: Color::Rgb(64, 64, 64),           // #404040
        border_focused: Color::Rgb(200, 200, 200), // #c8c8c8
        success: Color::Rgb(120, 200, 120),       // #78c878
        error: Color::Rgb(230, 100, 100),         // #e66464
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::MONO
    }
}
