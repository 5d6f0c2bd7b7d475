//! Main chat event loop and terminal lifecycle.
//!
//! The loop owns the only mutable [`App`] and is the single place state is
//! mutated. The network round trip runs on a spawned task and reports back
//! over an mpsc channel, so the interface stays responsive while a request
//! is outstanding.

use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;
use tui_textarea::Input as TAInput;

use crate::core::app::{App, PendingSend};
use crate::core::config::SessionConfig;
use crate::core::session::{ChatError, ChatSession, HttpBackend};
use crate::ui::renderer::ui;

pub async fn run_chat(
    session_config: SessionConfig,
    theme_name: &str,
    log_file: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(theme_name, log_file);

    // Session setup happens once per run. On failure the composer stays
    // usable and every submit surfaces an explicit error instead of
    // silently dropping the turn.
    let backend = Arc::new(HttpBackend::new());
    let session = match ChatSession::initialize(session_config, backend).await {
        Ok(session) => {
            info!(model = session.model(), "chat session established");
            Some(session)
        }
        Err(err) => {
            app.report_error(&err);
            None
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app, session).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: Option<ChatSession>,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, ChatError>>();

    loop {
        terminal.draw(|f| ui(f, app))?;

        // Drain any resolved request before handling new input.
        while let Ok(outcome) = rx.try_recv() {
            match outcome {
                Ok(reply) => app.finish_send_ok(&reply),
                Err(err) => app.finish_send_err(&err),
            }
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.toggle_theme();
                }
                KeyCode::Esc => {
                    app.dismiss_error();
                }
                KeyCode::Enter
                    if key
                        .modifiers
                        .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
                {
                    app.composer.insert_newline();
                }
                // Enter and Ctrl+S are the same submit path.
                KeyCode::Enter => submit(app, &session, &tx),
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    submit(app, &session, &tx)
                }
                KeyCode::Up => app.scroll_up(1),
                KeyCode::Down => app.scroll_down(1),
                KeyCode::PageUp => app.scroll_up(10),
                KeyCode::PageDown => app.scroll_down(10),
                _ => {
                    app.composer.input(TAInput::from(key));
                }
            },
            _ => {}
        }
    }
}

fn submit(
    app: &mut App,
    session: &Option<ChatSession>,
    tx: &mpsc::UnboundedSender<Result<String, ChatError>>,
) {
    let Some(pending) = app.try_begin_send() else {
        return;
    };
    match session {
        Some(session) => spawn_send(session.clone(), pending, tx.clone()),
        None => app.finish_send_err(&ChatError::NoSession),
    }
}

fn spawn_send(
    session: ChatSession,
    pending: PendingSend,
    tx: mpsc::UnboundedSender<Result<String, ChatError>>,
) {
    tokio::spawn(async move {
        let outcome = session.send(&pending.text, &pending.history).await;
        let _ = tx.send(outcome);
    });
}
