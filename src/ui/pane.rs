use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};

use crate::config::ThemeConfig;

/// A styled pane with consistent border and title treatment
pub struct Pane<'a> {
    title: &'a str,
    focused: bool,
    theme: &'a ThemeConfig,
}

impl<'a> Pane<'a> {
    pub fn new(title: &'a str, focused: bool, theme: &'a ThemeConfig) -> Self {
        Self {
            title,
            focused,
            theme,
        }
    }

    /// Get the styled block for this pane
    pub fn block(&self) -> Block<'a> {
        let border_color = if self.focused {
            self.theme.border_active()
        } else {
            self.theme.border_subtle()
        };

        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title_style(Style::default().fg(self.theme.primary()))
            .title(self.title)
    }
}
