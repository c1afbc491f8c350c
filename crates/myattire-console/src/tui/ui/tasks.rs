/*
[INPUT]:  Filtered task rows from the UI snapshot and active filters
[OUTPUT]: Task table with filter bar rendered into the frame
[POS]:    TUI UI task table rendering
[UPDATE]: When task columns, filters, or styling change
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use myattire_adapter::{Task, TaskStatus};

use crate::forms::format_prazo;
use crate::tui::app::{AppState, Tab, UiSnapshot};
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_tasks(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
    snapshot: &UiSnapshot,
) {
    if app.current_tab == Tab::Tarefas {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4)])
            .split(area);
        draw_filter_bar(frame, rows[0], app);
        draw_table(frame, rows[1], app, snapshot, "Tarefas");
    } else {
        draw_table(frame, area, app, snapshot, "Minhas Tarefas");
    }
}

fn draw_filter_bar(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let filters = &app.filters;
    let busca_style = if app.editing_busca {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::raw(format!("Status: {}", filters.status_label())),
        Span::raw("  |  "),
        Span::raw(format!("Prioridade: {}", filters.prioridade_label())),
        Span::raw("  |  "),
        Span::raw(format!("Setor: {}", filters.setor_label())),
        Span::raw("  |  "),
        Span::styled(format!("Busca: {}", filters.busca), busca_style),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Filtros"),
    );
    frame.render_widget(widget, area);
}

fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Pendente => Style::default().fg(Color::Yellow),
        TaskStatus::EmAndamento => Style::default().fg(Color::Cyan),
        TaskStatus::Concluida => Style::default().fg(Color::LightGreen),
    }
}

fn task_row<'a>(task: &Task, snapshot: &UiSnapshot) -> Row<'a> {
    let overdue = task.is_overdue(snapshot.now);
    let prazo_style = if overdue {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let prazo_text = if overdue {
        format!("{} !", format_prazo(task.prazo))
    } else {
        format_prazo(task.prazo)
    };

    Row::new(vec![
        Cell::from(task.titulo.clone()),
        Cell::from(task.funcionario.clone()),
        Cell::from(task.setor.clone()),
        Cell::from(Span::styled(prazo_text, prazo_style)),
        Cell::from(task.prioridade.label()),
        Cell::from(Span::styled(
            task.status.label().to_string(),
            status_style(task.status),
        )),
    ])
}

fn draw_table(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
    snapshot: &UiSnapshot,
    title: &str,
) {
    let mut rows: Vec<Row> = snapshot
        .tasks
        .iter()
        .map(|task| task_row(task, snapshot))
        .collect();
    if rows.is_empty() {
        rows.push(Row::new(vec![
            Cell::from("Nenhuma tarefa encontrada"),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
        ]));
    }

    let header = Row::new(vec![
        Cell::from("Título"),
        Cell::from("Funcionário"),
        Cell::from("Setor"),
        Cell::from("Prazo"),
        Cell::from("Prioridade"),
        Cell::from("Status"),
    ])
    .style(header_style());

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(title.to_string()),
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
