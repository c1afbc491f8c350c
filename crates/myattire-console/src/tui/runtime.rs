/*
[INPUT]:  API client with session, persisted session store, and key events
[OUTPUT]: Ratatui run loop, screen rendering, and shared styles
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use myattire_adapter::MyAttireClient;

use super::LogBufferHandle;
use super::app::{ActiveModal, AppState, Screen, Tab, UiSnapshot};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::modal::draw_modal;
use super::ui::*;
use crate::session_store::SessionStore;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
const LISTING_REFRESH_INTERVAL: Duration = Duration::from_secs(3);

/// Exit after this many ticks without touching the terminal. Lets the binary
/// be exercised where no TTY exists.
const TUI_TEST_TICKS_ENV: &str = "MYATTIRE_TUI_TEST_EXIT_AFTER_TICKS";

enum UiEvent {
    Input(CrosstermEvent),
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn headless_tick_budget() -> Option<u64> {
    std::env::var(TUI_TEST_TICKS_ENV)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
}

pub async fn run_tui(
    client: MyAttireClient,
    store: SessionStore,
    log_buffer: LogBufferHandle,
    tick_interval: Duration,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut app = AppState::new(client, store, log_buffer);
    if app.screen == Screen::Main {
        app.enter_main().await;
    }

    if let Some(ticks) = headless_tick_budget() {
        return run_headless(app, ticks, tick_interval, shutdown).await;
    }

    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut tick = tokio::time::interval(tick_interval);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = shutdown.cancelled() => {
                should_quit = true;
            }
            // Fires right after the optimistic frame was drawn, so a failed
            // PUT rolls the row back on the very next draw.
            _ = std::future::ready(()), if app.pending_status.is_some() => {
                app.finish_status_change().await;
            }
            _ = tick.tick() => {
                handle_tick(&mut app).await;
            }
            maybe_event = event_rx.recv() => {
                if let Some(UiEvent::Input(CrosstermEvent::Key(key))) = maybe_event {
                    if handle_key_event(&mut app, key).await {
                        should_quit = true;
                    }
                }
            }
        }

        let snapshot = app.build_snapshot();
        terminal.draw(|frame| draw_ui(frame, &mut app, &snapshot))?;
    }

    input_shutdown.cancel();
    Ok(())
}

async fn handle_tick(app: &mut AppState) {
    if app.screen != Screen::Main {
        return;
    }
    if app.client.session().is_expired() {
        app.handle_auth_failure().await;
        return;
    }
    if app.last_refresh.elapsed() > LISTING_REFRESH_INTERVAL {
        if let Err(err) = app.refresh_tasks().await {
            if err.is_auth_error() {
                app.handle_auth_failure().await;
            } else {
                app.status_message = format!("Falha ao atualizar tarefas: {err}");
            }
        }
    }
}

/// Same tick cadence as the interactive loop, minus terminal and input.
async fn run_headless(
    mut app: AppState,
    ticks: u64,
    tick_interval: Duration,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut tick = tokio::time::interval(tick_interval);
    for _ in 0..ticks {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tick.tick() => {
                handle_tick(&mut app).await;
                if app.pending_status.is_some() {
                    app.finish_status_change().await;
                }
                let _ = app.build_snapshot();
            }
        }
    }
    info!(ticks, "headless tick budget exhausted, exiting");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState, snapshot: &UiSnapshot) {
    let area = frame.area();

    if app.screen == Screen::Login {
        draw_login(frame, area, app);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[0], app);

    match app.current_tab {
        Tab::Painel => draw_dashboard(frame, layout[1], app, snapshot),
        Tab::Tarefas | Tab::MinhasTarefas => draw_tasks(frame, layout[1], app, snapshot),
        Tab::Usuarios => draw_users_table(frame, layout[1], app),
        Tab::Setores => draw_sectors_table(frame, layout[1], app),
        Tab::Logs => draw_logs(frame, layout[1], &app.log_buffer),
    }

    draw_footer(frame, layout[2], app);

    if let Some(active_modal) = app.active_modal.as_ref() {
        let modal = match active_modal {
            ActiveModal::TaskForm(modal) => modal.to_modal(),
            ActiveModal::UserForm(modal) => modal.to_modal(),
            ActiveModal::SectorForm(modal) => modal.to_modal(),
            ActiveModal::PasswordForm(modal) => modal.to_modal(),
            ActiveModal::ConfirmDelete(modal) => modal.to_modal(),
        };
        let modal_area = centered_rect(area, 60, 60);
        draw_modal(frame, modal_area, &modal);
    }
}

fn key_hint<'a>(spans: &mut Vec<Span<'a>>, key: &'a str, label: &'a str, key_style: Style) {
    spans.push(Span::styled(key, key_style));
    spans.push(Span::raw(format!(" {label}  ")));
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut first = Vec::new();
    key_hint(&mut first, "[Tab]", "Abas", key_style);
    key_hint(&mut first, "[Up/Down]", "Selecionar", key_style);
    key_hint(&mut first, "[r]", "Atualizar", key_style);
    key_hint(&mut first, "[p]", "Senha", key_style);
    key_hint(&mut first, "[o]", "Sair", key_style);
    key_hint(&mut first, "[q]", "Fechar", key_style);

    let mut second = Vec::new();
    match app.current_tab {
        Tab::Tarefas => {
            key_hint(&mut second, "[n]", "Nova", key_style);
            key_hint(&mut second, "[e]", "Editar", key_style);
            key_hint(&mut second, "[d]", "Excluir", key_style);
            key_hint(&mut second, "[c]", "Status", key_style);
            key_hint(&mut second, "[f/g/t]", "Filtros", key_style);
            key_hint(&mut second, "[/]", "Busca", key_style);
            key_hint(&mut second, "[x]", "Limpar", key_style);
        }
        Tab::MinhasTarefas => {
            key_hint(&mut second, "[c]", "Concluir", key_style);
        }
        Tab::Usuarios => {
            key_hint(&mut second, "[u]", "Novo usuário", key_style);
        }
        Tab::Setores => {
            key_hint(&mut second, "[s]", "Novo setor", key_style);
        }
        Tab::Painel | Tab::Logs => {}
    }
    second.push(Span::raw(format!("Status: {}", app.status_message)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Teclas");
    let text = Text::from(vec![Line::from(first), Line::from(second)]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn centered_rect(
    area: ratatui::layout::Rect,
    percent_x: u16,
    percent_y: u16,
) -> ratatui::layout::Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
