/*
[INPUT]:  Sector listing rows from AppState
[OUTPUT]: Sector table rendered into the frame
[POS]:    TUI UI sector table rendering
[UPDATE]: When sector columns change
*/

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::forms::format_prazo;
use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_sectors_table(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let mut rows: Vec<Row> = app
        .sectors
        .iter()
        .map(|sector| {
            let ativo = if sector.ativo { "Sim" } else { "Não" };
            Row::new(vec![
                Cell::from(sector.nome.clone()),
                Cell::from(ativo),
                Cell::from(format_prazo(sector.data_criacao)),
            ])
        })
        .collect();
    if rows.is_empty() {
        rows.push(Row::new(vec![
            Cell::from("Nenhum setor encontrado"),
            Cell::from(""),
            Cell::from(""),
        ]));
    }

    let header = Row::new(vec![
        Cell::from("Nome"),
        Cell::from("Ativo"),
        Cell::from("Criado em"),
    ])
    .style(header_style());

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Setores"),
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
