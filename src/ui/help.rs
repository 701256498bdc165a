use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::View;
use crate::config::ThemeConfig;

pub fn render_help(
    f: &mut Frame,
    area: Rect,
    view: View,
    status: Option<&str>,
    search_query: Option<&str>,
    theme: &ThemeConfig,
) {
    let key_style = Style::default().fg(theme.primary());
    let text_style = Style::default().fg(theme.fg_subtle());
    let search_style = Style::default().fg(theme.fg());
    let cursor_style = Style::default().fg(theme.primary());

    let help_text = match view {
        View::Search => vec![
            Span::styled("/", key_style),
            Span::raw(" "),
            Span::styled(search_query.unwrap_or("").to_string(), search_style),
            Span::styled("_", cursor_style),
            Span::styled("  ", text_style),
            Span::styled("Enter", key_style),
            Span::styled(" confirm  ", text_style),
            Span::styled("Esc", key_style),
            Span::styled(" cancel", text_style),
        ],
        View::List => vec![
            Span::styled("j/k", key_style),
            Span::styled(" nav  ", text_style),
            Span::styled("/", key_style),
            Span::styled(" search  ", text_style),
            Span::styled("1/2/3", key_style),
            Span::styled(" view  ", text_style),
            Span::styled("p", key_style),
            Span::styled(" promos  ", text_style),
            Span::styled("d", key_style),
            Span::styled(" done  ", text_style),
            Span::styled("z/Z", key_style),
            Span::styled(" snooze  ", text_style),
            Span::styled("u", key_style),
            Span::styled(" reopen  ", text_style),
            Span::styled("R", key_style),
            Span::styled(" rescan  ", text_style),
            Span::styled("q", key_style),
            Span::styled(" quit", text_style),
        ],
    };

    let mut line = Line::from(help_text);

    // Add status message if present
    if let Some(msg) = status {
        line.spans
            .push(Span::styled("  │  ", Style::default().fg(theme.border())));
        line.spans
            .push(Span::styled(msg.to_string(), Style::default().fg(theme.success())));
    }

    let paragraph = Paragraph::new(line).style(Style::default().bg(theme.bg_panel()));

    f.render_widget(paragraph, area);
}
