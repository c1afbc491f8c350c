/*
[INPUT]:  Login form buffers, focus, validation errors, and notices
[OUTPUT]: Centered login card rendered into the Ratatui frame
[POS]:    TUI UI login screen rendering
[UPDATE]: When login fields or messages change
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::forms::error_for;
use crate::tui::app::AppState;
use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_login(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let card = centered_card(area);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("My Attire");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let login = &app.login;
    let focus_style = |index: usize| {
        if login.focus == index {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        }
    };
    let error_style = Style::default().fg(Color::LightRed);

    let mut lines = vec![
        Line::from("Entre com sua conta"),
        Line::default(),
        Line::from(Span::styled(
            format!("Email: {}", login.form.email),
            focus_style(0),
        )),
    ];
    if let Some(message) = error_for(&login.errors, "email") {
        lines.push(Line::from(Span::styled(format!("  {message}"), error_style)));
    }
    let masked = "•".repeat(login.form.senha.chars().count());
    lines.push(Line::from(Span::styled(
        format!("Senha: {masked}"),
        focus_style(1),
    )));
    if let Some(message) = error_for(&login.errors, "senha") {
        lines.push(Line::from(Span::styled(format!("  {message}"), error_style)));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("[Entrar]", focus_style(2))));

    if let Some(notice) = &login.notice {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(notice.clone(), error_style)));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Tab muda o campo, Enter envia, Esc sai",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn centered_card(area: ratatui::layout::Rect) -> ratatui::layout::Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(14),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(52),
            Constraint::Min(1),
        ])
        .split(vertical[1]);
    horizontal[1]
}
