//! Theme configuration - Monochrome grayscale with status accents

pub mod borders;
pub mod icons;
pub mod palette;

pub use borders::BorderStyle;
pub use icons::Icons;
pub use palette::Palette;

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::MONO,
            icons: Icons::nerd(),
        }
    }

    pub fn border_set(&self, focused: bool) -> ratatui::symbols::border::Set<'static> {
        if focused {
            BorderStyle::focused_set()
        } else {
            BorderStyle::to_border_set()
        }
    }

    pub fn border_color(&self, focused: bool) -> ratatui::style::Color {
        if focused {
            self.palette.border_focused
        } else {
            self.palette.border
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_theme() -> Theme {
    Theme::new()
}
