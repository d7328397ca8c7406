//! Border styles

use ratatui::symbols::border;

/// Rounded borders, thick ones on the focused panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderStyle;

impl BorderStyle {
    pub fn to_border_set() -> border::Set<'static> {
        border::ROUNDED
    }

    pub fn focused_set() -> border::Set<'static> {
        border::THICK
    }
}
