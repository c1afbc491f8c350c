/*
[INPUT]:  Task counts and upcoming deadlines from the UI snapshot
[OUTPUT]: Dashboard cards and deadline list rendered into the frame
[POS]:    TUI UI dashboard rendering
[UPDATE]: When cards or the deadline list change
*/

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use myattire_adapter::Task;

use crate::forms::format_prazo;
use crate::tui::app::{AppState, UiSnapshot};
use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_dashboard(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
    snapshot: &UiSnapshot,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    draw_count_cards(frame, rows[0], snapshot);
    draw_upcoming(frame, rows[1], app, snapshot);
}

fn draw_count_cards(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, snapshot: &UiSnapshot) {
    let counts = &snapshot.counts;
    let cards = [
        ("Total", counts.total, Style::default()),
        ("Pendentes", counts.pendente, Style::default().fg(Color::Yellow)),
        (
            "Em andamento",
            counts.em_andamento,
            Style::default().fg(Color::Cyan),
        ),
        (
            "Concluídas",
            counts.concluida,
            Style::default().fg(Color::LightGreen),
        ),
        (
            "Atrasadas",
            counts.atrasadas,
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20); 5])
        .split(area);

    for ((title, value, style), column) in cards.into_iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(title);
        let text = vec![
            Line::default(),
            Line::from(Span::styled(value.to_string(), style.add_modifier(Modifier::BOLD))),
        ];
        let widget = Paragraph::new(text).block(block).alignment(Alignment::Center);
        frame.render_widget(widget, *column);
    }
}

/// Open tasks with the nearest deadlines, overdue ones first.
fn draw_upcoming(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
    snapshot: &UiSnapshot,
) {
    let mut open: Vec<&Task> = app
        .tasks
        .iter()
        .filter(|task| task.status != myattire_adapter::TaskStatus::Concluida && task.prazo.is_some())
        .collect();
    open.sort_by_key(|task| task.prazo);

    let items: Vec<ListItem> = if open.is_empty() {
        vec![ListItem::new("Nenhum prazo em aberto")]
    } else {
        open.iter()
            .take(area.height.saturating_sub(2) as usize)
            .map(|task| {
                let line = format!(
                    "{}  {}  ({} / {})",
                    format_prazo(task.prazo),
                    task.titulo,
                    task.funcionario,
                    task.setor
                );
                if task.is_overdue(snapshot.now) {
                    ListItem::new(Line::from(Span::styled(
                        format!("{line}  ATRASADA"),
                        Style::default().fg(Color::LightRed),
                    )))
                } else {
                    ListItem::new(line)
                }
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Próximos prazos"),
    );
    frame.render_widget(list, area);
}
