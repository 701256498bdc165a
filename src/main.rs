use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tracing::info;

use feedtui::app::{App, FeedAction, PaneFocus, View};
use feedtui::config::Config;
use feedtui::feed::{classify, resolve_status, scan_feed, ClassFilter, StatusStore};
use feedtui::ui::{render_feed, render_help, render_preview};

fn main() -> Result<()> {
    init_logging();

    let config = Arc::new(Config::load());

    let mut store = StatusStore::load();
    if store.sweep(now_epoch()) > 0 {
        let _ = store.save();
    }

    let items = scan_feed(&config.feed_dir, |_, _| {}).unwrap_or_default();
    info!(count = items.len(), "feed loaded");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(items, config, store);

    // Main loop
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| render(&mut app, f))?;

        // Short poll so reveal deadlines land without input
        if event::poll(Duration::from_millis(33))? {
            // Drain everything queued this frame; the controller keeps
            // only the latest scroll/resize signals anyway
            loop {
                handle_event(&mut app, event::read()?);
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    app.controller.detach();
    let _ = app.store.save();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn handle_event(app: &mut App, ev: Event) {
    match ev {
        Event::Key(key) => {
            app.clear_status();
            match app.view {
                View::List => match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Esc => app.focused_pane = PaneFocus::List,
                    KeyCode::Char('h') | KeyCode::Left => app.focused_pane = PaneFocus::List,
                    KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => {
                        app.focused_pane = PaneFocus::Preview;
                    }
                    KeyCode::Char('j') | KeyCode::Down => match app.focused_pane {
                        PaneFocus::List => app.next(),
                        PaneFocus::Preview => app.preview_scroll_down(),
                    },
                    KeyCode::Char('k') | KeyCode::Up => match app.focused_pane {
                        PaneFocus::List => app.previous(),
                        PaneFocus::Preview => app.preview_scroll_up(),
                    },
                    KeyCode::PageDown => {
                        let page = app.list_area.height.saturating_sub(2) as isize;
                        app.scroll_list(page);
                    }
                    KeyCode::PageUp => {
                        let page = app.list_area.height.saturating_sub(2) as isize;
                        app.scroll_list(-page);
                    }
                    KeyCode::Char('1') => app.set_class_filter(ClassFilter::All),
                    KeyCode::Char('2') => app.set_class_filter(ClassFilter::PriorityOnly),
                    KeyCode::Char('3') => app.set_class_filter(ClassFilter::PromotionalOnly),
                    KeyCode::Char('p') => {
                        app.toggle_suppress_promotional();
                        app.set_status(if app.filter.suppress_promotional {
                            "Promotions hidden"
                        } else {
                            "Promotions shown"
                        });
                    }
                    KeyCode::Char('d') => {
                        if let Some(action) = app.action_on_selected(FeedAction::MarkDone) {
                            apply_action(app, action);
                        }
                    }
                    KeyCode::Char('z') => {
                        if let Some(action) = app.action_on_selected(|id| FeedAction::Snooze(id, 1))
                        {
                            apply_action(app, action);
                        }
                    }
                    KeyCode::Char('Z') => {
                        if let Some(action) =
                            app.action_on_selected(|id| FeedAction::Snooze(id, 24))
                        {
                            apply_action(app, action);
                        }
                    }
                    KeyCode::Char('u') => {
                        if let Some(action) = app.action_on_selected(FeedAction::Reopen) {
                            apply_action(app, action);
                        }
                    }
                    KeyCode::Char('R') => {
                        let items = scan_feed(&app.config.feed_dir, |_, _| {}).unwrap_or_default();
                        app.refresh(items);
                    }
                    KeyCode::Char('/') => app.start_search(),
                    _ => {}
                },
                View::Search => match key.code {
                    KeyCode::Esc => app.cancel_search(),
                    KeyCode::Enter => app.view = View::List,
                    KeyCode::Backspace => app.pop_search_char(),
                    KeyCode::Char(c) => app.push_search_char(c),
                    KeyCode::Down | KeyCode::Tab => app.next(),
                    KeyCode::Up => app.previous(),
                    _ => {}
                },
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(_) => {
                if let Some(action) = app.handle_click(mouse.column, mouse.row) {
                    apply_action(app, action);
                }
            }
            MouseEventKind::ScrollDown => match app.focused_pane {
                PaneFocus::List => app.scroll_list(3),
                PaneFocus::Preview => app.preview_scroll_down(),
            },
            MouseEventKind::ScrollUp => match app.focused_pane {
                PaneFocus::List => app.scroll_list(-3),
                PaneFocus::Preview => app.preview_scroll_up(),
            },
            _ => {}
        },
        Event::Resize(_, _) => {
            // New pane sizes are measured during the next render pass
        }
        _ => {}
    }
}

/// Apply a reported intent to the status store, then rerun the
/// filter/sort/window pass.
fn apply_action(app: &mut App, action: FeedAction) {
    match action {
        FeedAction::Select(_) => {
            app.preview_scroll = 0;
        }
        FeedAction::MarkDone(id) => {
            app.store.mark_done(&id);
            finish_mutation(app, "Marked done");
        }
        FeedAction::Snooze(id, hours) => {
            app.store.snooze(&id, hours, now_epoch());
            finish_mutation(app, &format!("Snoozed {hours}h"));
        }
        FeedAction::Reopen(id) => {
            app.store.reopen(&id);
            finish_mutation(app, "Reopened");
        }
    }
}

fn finish_mutation(app: &mut App, status: &str) {
    if let Err(e) = app.store.save() {
        app.set_status(&format!("Save failed: {e}"));
        return;
    }
    app.recompute();
    app.set_status(status);
}

fn render(app: &mut App, f: &mut Frame) {
    let area = f.area();
    let config = app.config.clone();
    let theme = &config.theme;

    // Split into main area and help bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    // Two-pane layout: list on left, preview on right
    let (list_pct, preview_pct) = match app.focused_pane {
        PaneFocus::List => (
            config.layout.list_focused_width,
            100 - config.layout.list_focused_width,
        ),
        PaneFocus::Preview => (
            100 - config.layout.preview_focused_width,
            config.layout.preview_focused_width,
        ),
    };
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(list_pct),
            Constraint::Percentage(preview_pct),
        ])
        .split(chunks[0]);

    // Store pane areas for mouse handling and report the measured
    // viewport to the controller (resize signal)
    app.set_pane_areas(panes[0], panes[1]);
    app.controller
        .on_resize(panes[0].height.saturating_sub(2) as usize);

    let view_suffix = match app.filter.class_filter {
        ClassFilter::All if app.filter.suppress_promotional => " (promos hidden)",
        ClassFilter::All => "",
        ClassFilter::PriorityOnly => " (Priority)",
        ClassFilter::PromotionalOnly => " (Promotions)",
    };
    let title = if app.view == View::Search || !app.filter.search_text.is_empty() {
        format!(
            " Search: {} ({} matches){} ",
            app.filter.search_text,
            app.view_indices.len(),
            view_suffix
        )
    } else {
        format!(" Feed{} ", view_suffix)
    };

    render_feed(
        f,
        panes[0],
        app,
        &title,
        app.focused_pane == PaneFocus::List,
    );

    let selected = app.selected_item().map(|item| {
        let classification = classify(item);
        let status = resolve_status(&item.id, app.store.done_ids(), app.store.snoozed_ids());
        (item, classification, status)
    });
    render_preview(
        f,
        panes[1],
        selected,
        app.preview_scroll,
        app.focused_pane == PaneFocus::Preview,
        theme,
    );

    let search_query = if app.view == View::Search {
        Some(app.filter.search_text.as_str())
    } else {
        None
    };
    render_help(
        f,
        chunks[1],
        app.view,
        app.status_message.as_deref(),
        search_query,
        theme,
    );
}

fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn init_logging() {
    let Some(path) = dirs::cache_dir().map(|p| p.join("feedtui/feedtui.log")) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
}
