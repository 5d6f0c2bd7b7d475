use crate::core::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = app.theme.clone();

    // Paint the full frame background first.
    let backdrop = Block::default().style(Style::default().bg(theme.background_color));
    f.render_widget(backdrop, f.area());

    let mut constraints = vec![Constraint::Length(1), Constraint::Min(1)];
    if app.error.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(4));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_transcript(f, app, chunks[1]);
    if app.error.is_some() {
        render_error_banner(f, app, chunks[2]);
    }
    render_composer(f, app, chunks[chunks.len() - 1]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let header = Line::from(vec![
        Span::styled("Virtual Assistant ChatBot", theme.title_style),
        Span::styled(
            format!("  •  Theme: {} (Ctrl+T toggles)", app.theme_name),
            theme.timestamp_style,
        ),
    ]);
    f.render_widget(
        Paragraph::new(header).style(Style::default().bg(theme.background_color)),
        area,
    );
}

fn render_transcript(f: &mut Frame, app: &mut App, area: Rect) {
    let lines = build_display_lines(app);

    let total_lines = lines.len() as u16;
    let max_offset = total_lines.saturating_sub(area.height);
    app.scroll_max = max_offset;
    if app.auto_scroll {
        app.scroll_offset = max_offset;
    } else {
        app.scroll_offset = app.scroll_offset.min(max_offset);
    }

    let transcript = Paragraph::new(lines)
        .style(Style::default().bg(app.theme.transcript_background))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));
    f.render_widget(transcript, area);
}

fn build_display_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = Vec::new();

    for msg in app.conversation.iter() {
        let (label, prefix_style, text_style) = if msg.is_user() {
            ("You", theme.user_prefix_style, theme.user_text_style)
        } else {
            ("Bot", theme.user_prefix_style.patch(theme.bot_text_style), theme.bot_text_style)
        };

        lines.push(Line::from(vec![
            Span::styled(label.to_string(), prefix_style),
            Span::styled(
                format!(" - {}", msg.timestamp.format("%H:%M:%S")),
                theme.timestamp_style,
            ),
        ]));
        for text_line in msg.text.lines() {
            lines.push(Line::from(Span::styled(text_line.to_string(), text_style)));
        }
        lines.push(Line::from(""));
    }

    if app.in_flight {
        lines.push(Line::from(Span::styled(
            "Bot is thinking…".to_string(),
            theme.waiting_indicator_style,
        )));
    }

    lines
}

fn render_error_banner(f: &mut Frame, app: &App, area: Rect) {
    let message = app.error.as_deref().unwrap_or_default();
    let banner = Paragraph::new(Line::from(vec![
        Span::raw(format!(" {message}")),
        Span::raw("  (Esc to dismiss)"),
    ]))
    .style(app.theme.error_banner_style);
    f.render_widget(banner, area);
}

fn render_composer(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let title = if app.in_flight {
        "Waiting for reply…"
    } else {
        "Type your message (Enter to send, Ctrl+C to quit)"
    };

    app.composer.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.input_border_style)
            .title(title),
    );
    app.composer
        .set_style(theme.input_text_style.bg(theme.background_color));
    app.composer.set_cursor_style(theme.input_cursor_style);
    f.render_widget(&app.composer, area);
}
