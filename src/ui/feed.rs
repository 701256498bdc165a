use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, EmptyReason};
use crate::config::ThemeConfig;
use crate::feed::{classify, resolve_status, ClassFilter, Classification, Item, LifecycleStatus};

use super::Pane;

/// Render the feed list: only the items inside the computed window are
/// turned into rows; everything above them is represented by the rows
/// skipped between the window's top offset and the scroll position.
pub fn render_feed(f: &mut Frame, area: Rect, app: &App, title: &str, focused: bool) {
    let theme = &app.config.theme;
    let pane = Pane::new(title, focused, theme);
    let block = pane.block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(reason) = app.empty_reason() {
        render_empty(f, inner, app, reason);
        return;
    }

    let window = app.window();
    let item_height = app.controller.item_height();
    let avail_width = inner.width as usize;
    let date_width = app.config.layout.date_width;
    let sender_width = app
        .config
        .layout
        .sender_width
        .min(avail_width.saturating_sub(date_width + 6) / 3);

    // The window may be one throttled tick behind a filter change that
    // shrank the list; never render past the end of the array
    let end = window.end.min(app.view_indices.len());
    let start = window.start.min(end);

    // Rows of the windowed block hidden above the viewport edge
    let skip = app.controller.scroll_offset().saturating_sub(window.top_offset);

    let lines: Vec<Line> = (start..end)
        .flat_map(|pos| {
            let item = &app.items[app.view_indices[pos]];
            let classification = classify(item);
            let status = resolve_status(&item.id, app.store.done_ids(), app.store.snoozed_ids());
            item_lines(
                item,
                classification,
                status,
                app.selected == Some(pos),
                item_height,
                avail_width,
                date_width,
                sender_width,
                theme,
            )
        })
        .skip(skip)
        .take(inner.height as usize)
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Render one item as its fixed number of rows. Stateless: everything
/// it needs arrives as arguments; it knows nothing about windowing.
#[allow(clippy::too_many_arguments)]
pub fn item_lines(
    item: &Item,
    classification: Classification,
    status: LifecycleStatus,
    selected: bool,
    item_height: usize,
    avail_width: usize,
    date_width: usize,
    sender_width: usize,
    theme: &ThemeConfig,
) -> Vec<Line<'static>> {
    let subject_width = avail_width.saturating_sub(date_width + sender_width + 6);

    let marker = match status {
        LifecycleStatus::Done => "✓",
        LifecycleStatus::Snoozed => "~",
        LifecycleStatus::Open => match classification {
            Classification::Priority => "!",
            Classification::Promotional => "%",
            Classification::Normal => " ",
        },
    };

    let base = match status {
        LifecycleStatus::Done => Style::default().fg(theme.done()),
        LifecycleStatus::Snoozed => Style::default().fg(theme.snoozed()),
        LifecycleStatus::Open => Style::default().fg(theme.fg()),
    };
    let marker_style = match classification {
        Classification::Priority => Style::default().fg(theme.priority()),
        Classification::Promotional => Style::default().fg(theme.promotional()),
        Classification::Normal => base,
    };
    let row_style = if selected {
        Style::default()
            .bg(theme.selected_bg())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let head = Line::from(vec![
        Span::styled(format!("{marker} "), marker_style.patch(row_style)),
        Span::styled(
            format!("{} ", truncate(&format_date(item.timestamp), date_width)),
            Style::default().fg(theme.fg_muted()).patch(row_style),
        ),
        Span::styled(
            format!("{} ", truncate(&item.sender_display(), sender_width)),
            base.patch(row_style),
        ),
        Span::styled(
            truncate(item.subject_display(), subject_width),
            base.patch(row_style),
        ),
    ]);

    let mut lines = vec![head];
    for row in 1..item_height {
        let line = if row == 1 {
            Line::from(Span::styled(
                format!("  {}", truncate(&item.preview, avail_width.saturating_sub(2))),
                Style::default().fg(theme.fg_subtle()).patch(row_style),
            ))
        } else {
            Line::from(Span::styled(String::new(), row_style))
        };
        lines.push(line);
    }
    lines
}

fn render_empty(f: &mut Frame, area: Rect, app: &App, reason: EmptyReason) {
    let theme = &app.config.theme;
    let message = match reason {
        EmptyReason::NoItems => "Feed is empty".to_string(),
        EmptyReason::NoSearchMatches => {
            format!("No messages match \"{}\"", app.filter.search_text)
        }
        EmptyReason::NothingInClassView => match app.filter.class_filter {
            ClassFilter::PriorityOnly => "No priority messages".to_string(),
            ClassFilter::PromotionalOnly => "No promotions".to_string(),
            ClassFilter::All => "Nothing to show (promotions hidden)".to_string(),
        },
    };

    let vertical_pad = area.height.saturating_sub(1) / 2;
    let padded = Rect {
        y: area.y + vertical_pad,
        height: area.height.saturating_sub(vertical_pad),
        ..area
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(theme.fg_muted()),
    )))
    .alignment(Alignment::Center);
    f.render_widget(paragraph, padded);
}

fn truncate(s: &str, max: usize) -> String {
    if max < 4 {
        return s.chars().take(max).collect();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        format!("{:width$}", s, width = max)
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format an epoch timestamp as "Feb 02 04:11"; items without a usable
/// timestamp show a placeholder instead.
pub fn format_date(timestamp: Option<i64>) -> String {
    let Some(ts) = timestamp else {
        return "--".to_string();
    };
    let days = ts.div_euclid(86_400);
    let secs = ts.rem_euclid(86_400);
    let (_, month, day) = civil_from_days(days);
    format!(
        "{} {:02} {:02}:{:02}",
        MONTHS[(month - 1) as usize],
        day,
        secs / 3600,
        (secs % 3600) / 60
    )
}

/// Days since the epoch to (year, month, day), proleptic Gregorian.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if m <= 2 { y + 1 } else { y }, m, d)
}
