/*
[INPUT]:  Modal state, fields, and key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI modal module root
[UPDATE]: When changing the modal framework or adding field kinds
*/

mod password_form;
mod sector_form;
mod task_form;
mod user_form;

pub(in crate::tui) use password_form::PasswordFormModal;
pub(in crate::tui) use sector_form::SectorFormModal;
pub(in crate::tui) use task_form::TaskFormModal;
pub(in crate::tui) use user_form::UserFormModal;

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub(in crate::tui) struct Modal {
    pub(super) title: String,
    pub(super) body: Option<String>,
    pub(super) focus_index: usize,
    pub(super) fields: Vec<Field>,
    pub(super) error: Option<String>,
}

pub(in crate::tui) enum Field {
    TextInput {
        label: String,
        value: String,
        secret: bool,
        error: Option<String>,
    },
    Select {
        label: String,
        options: Vec<String>,
        selected: usize,
        error: Option<String>,
    },
    Button {
        label: String,
        action: ModalAction,
    },
}

impl Field {
    pub(super) fn text(label: &str, value: &str, error: Option<String>) -> Self {
        Field::TextInput {
            label: label.to_string(),
            value: value.to_string(),
            secret: false,
            error,
        }
    }

    pub(super) fn secret(label: &str, value: &str, error: Option<String>) -> Self {
        Field::TextInput {
            label: label.to_string(),
            value: value.to_string(),
            secret: true,
            error,
        }
    }

    pub(super) fn select(
        label: &str,
        options: Vec<String>,
        selected: usize,
        error: Option<String>,
    ) -> Self {
        Field::Select {
            label: label.to_string(),
            options,
            selected,
            error,
        }
    }

    pub(super) fn button(label: &str, action: ModalAction) -> Self {
        Field::Button {
            label: label.to_string(),
            action,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    Submit,
    Cancel,
    None,
}

fn error_style() -> Style {
    Style::default().fg(Color::LightRed)
}

pub(in crate::tui) fn draw_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(body) = &modal.body {
        lines.push(Line::from(body.clone()));
        lines.push(Line::default());
    }

    for (index, field) in modal.fields.iter().enumerate() {
        let (content, field_error) = match field {
            Field::TextInput {
                label,
                value,
                secret,
                error,
            } => {
                let shown = if *secret {
                    "•".repeat(value.chars().count())
                } else {
                    value.clone()
                };
                (format!("{label}: {shown}"), error.clone())
            }
            Field::Select {
                label,
                options,
                selected,
                error,
            } => {
                let selected_value = options.get(*selected).map(String::as_str).unwrap_or("-");
                (format!("{label}: {selected_value}"), error.clone())
            }
            Field::Button { label, .. } => (format!("[{label}]"), None),
        };
        let style = if index == modal.focus_index {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(content, style)));
        if let Some(message) = field_error {
            lines.push(Line::from(Span::styled(format!("  {message}"), error_style())));
        }
    }

    if let Some(message) = &modal.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(message.clone(), error_style())));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab => {
            if !modal.fields.is_empty() {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::Up => {
            if let Some(Field::Select {
                selected, options, ..
            }) = modal.fields.get_mut(modal.focus_index)
            {
                if !options.is_empty() {
                    *selected = selected.saturating_sub(1);
                }
            }
            ModalAction::None
        }
        KeyCode::Down => {
            if let Some(Field::Select {
                selected, options, ..
            }) = modal.fields.get_mut(modal.focus_index)
            {
                if *selected + 1 < options.len() {
                    *selected += 1;
                }
            }
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.push(ch);
            }
            ModalAction::None
        }
        KeyCode::Enter => {
            if let Some(Field::Button { action, .. }) = modal.fields.get(modal.focus_index) {
                return *action;
            }
            ModalAction::None
        }
        _ => ModalAction::None,
    }
}

/// Plain confirmation dialog with no editable fields.
pub(in crate::tui) struct ConfirmDeleteModal {
    id: i64,
    titulo: String,
    focus_index: usize,
}

impl ConfirmDeleteModal {
    pub(in crate::tui) fn new(id: i64, titulo: String) -> Self {
        Self {
            id,
            titulo,
            focus_index: 0,
        }
    }

    pub(in crate::tui) fn id(&self) -> i64 {
        self.id
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        Modal {
            title: String::from("Excluir tarefa"),
            body: Some(format!("Excluir a tarefa \"{}\"?", self.titulo)),
            focus_index: self.focus_index,
            fields: vec![
                Field::button("Excluir", ModalAction::Submit),
                Field::button("Cancelar", ModalAction::Cancel),
            ],
            error: None,
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.focus_index = modal.focus_index;
        action
    }
}
