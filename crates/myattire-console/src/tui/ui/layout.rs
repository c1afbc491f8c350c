/*
[INPUT]:  Visible tabs for the signed-in role and the current selection
[OUTPUT]: Tab bar rendered into the Ratatui frame
[POS]:    TUI UI tab bar rendering
[UPDATE]: When tab sets or styling change
*/

use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_tabs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
) {
    let tabs = app.visible_tabs();
    let titles: Vec<Line> = tabs
        .iter()
        .enumerate()
        .map(|(index, tab)| Line::from(format!("{} {}", index + 1, tab.title())))
        .collect();
    let selected = tabs
        .iter()
        .position(|tab| *tab == app.current_tab)
        .unwrap_or(0);

    let widget = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Abas"),
        )
        .highlight_style(header_style())
        .select(selected);

    frame.render_widget(widget, area);
}
