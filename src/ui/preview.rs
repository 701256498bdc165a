use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::config::ThemeConfig;
use crate::feed::{Classification, Item, LifecycleStatus};

use super::feed::format_date;
use super::Pane;

/// Render the preview pane for the selected item: a short header block
/// followed by the message preview text.
pub fn render_preview(
    f: &mut Frame,
    area: Rect,
    selected: Option<(&Item, Classification, LifecycleStatus)>,
    scroll: u16,
    focused: bool,
    theme: &ThemeConfig,
) {
    let title = selected
        .map(|(item, _, _)| format!(" {} ", item.subject_display()))
        .unwrap_or_else(|| " Message ".to_string());
    let pane = Pane::new(&title, focused, theme);

    let lines = match selected {
        Some((item, classification, status)) => header_lines(item, classification, status, theme),
        None => vec![Line::from(Span::styled(
            "Nothing selected",
            Style::default().fg(theme.fg_muted()),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(pane.block())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(paragraph, area);
}

fn header_lines(
    item: &Item,
    classification: Classification,
    status: LifecycleStatus,
    theme: &ThemeConfig,
) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(theme.fg_muted());
    let value_style = Style::default().fg(theme.fg());
    let status_text = match status {
        LifecycleStatus::Open => ("open", theme.fg()),
        LifecycleStatus::Done => ("done", theme.done()),
        LifecycleStatus::Snoozed => ("snoozed", theme.snoozed()),
    };
    let class_color = match classification {
        Classification::Priority => theme.priority(),
        Classification::Promotional => theme.promotional(),
        Classification::Normal => theme.fg(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("From:   ", label_style),
            Span::styled(item.sender_display(), value_style),
        ]),
        Line::from(vec![
            Span::styled("Date:   ", label_style),
            Span::styled(format_date(item.timestamp), value_style),
        ]),
        Line::from(vec![
            Span::styled("Tag:    ", label_style),
            Span::styled(classification.label(), Style::default().fg(class_color)),
            Span::styled("  ·  ", label_style),
            Span::styled(status_text.0, Style::default().fg(status_text.1)),
        ]),
    ];
    if !item.labels.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Labels: ", label_style),
            Span::styled(item.labels.join(", "), value_style),
        ]));
    }
    lines.push(Line::default());
    for text_line in item.preview.lines() {
        lines.push(Line::from(Span::styled(
            text_line.to_string(),
            value_style,
        )));
    }
    lines
}
