/*
[INPUT]:  User listing rows from AppState
[OUTPUT]: User table rendered into the frame
[POS]:    TUI UI user table rendering
[UPDATE]: When user columns change
*/

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_users_table(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let mut rows: Vec<Row> = app
        .users
        .iter()
        .map(|user| {
            let ativo = if user.ativo { "Sim" } else { "Não" };
            Row::new(vec![
                Cell::from(user.nome.clone()),
                Cell::from(user.email.clone()),
                Cell::from(user.perfil.label()),
                Cell::from(user.setor.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(ativo),
            ])
        })
        .collect();
    if rows.is_empty() {
        rows.push(Row::new(vec![
            Cell::from("Nenhum usuário encontrado"),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
        ]));
    }

    let header = Row::new(vec![
        Cell::from("Nome"),
        Cell::from("Email"),
        Cell::from("Perfil"),
        Cell::from("Setor"),
        Cell::from("Ativo"),
    ])
    .style(header_style());

    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Min(24),
            Constraint::Length(14),
            Constraint::Length(16),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Usuários"),
    )
    .row_highlight_style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");
    frame.render_stateful_widget(table, area, &mut app.table_state);
}
