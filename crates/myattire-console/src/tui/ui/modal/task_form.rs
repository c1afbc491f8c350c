/*
[INPUT]:  Task form field buffers and select options
[OUTPUT]: Task create/edit modal with validated payloads
[POS]:    TUI UI modal for tasks
[UPDATE]: When task fields or validation rules change
*/

use crossterm::event::KeyCode;

use myattire_adapter::{Priority, Task, TaskPayload, TaskStatus, TaskUpdate};

use crate::forms::{FieldError, TaskForm, error_for, format_prazo};

use super::{Field, Modal, ModalAction, handle_modal_key};

pub(in crate::tui) struct TaskFormModal {
    editing: Option<i64>,
    titulo: String,
    descricao: String,
    setor_index: usize,
    funcionario_index: usize,
    prazo: String,
    prioridade_index: usize,
    status_index: usize,
    focus_index: usize,
    sector_options: Vec<String>,
    user_options: Vec<String>,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
}

impl TaskFormModal {
    pub(in crate::tui) fn create(sectors: Vec<String>, users: Vec<String>) -> Self {
        let prioridade_index = position_of_priority(Priority::default());
        Self {
            editing: None,
            titulo: String::new(),
            descricao: String::new(),
            setor_index: 0,
            funcionario_index: 0,
            prazo: String::new(),
            prioridade_index,
            status_index: 0,
            focus_index: 0,
            sector_options: sectors,
            user_options: users,
            errors: Vec::new(),
            submit_error: None,
        }
    }

    /// Pre-fill from an existing task. Its sector or assignee may no longer
    /// be listed (renamed or deactivated), so missing values are kept as an
    /// extra option instead of silently switching the task to another one.
    pub(in crate::tui) fn edit(task: &Task, sectors: Vec<String>, users: Vec<String>) -> Self {
        let mut modal = Self::create(sectors, users);
        modal.editing = task.id;
        modal.titulo = task.titulo.clone();
        modal.descricao = task.descricao.clone();
        modal.prazo = format_prazo(task.prazo);
        modal.setor_index = ensure_option(&mut modal.sector_options, &task.setor);
        modal.funcionario_index = ensure_option(&mut modal.user_options, &task.funcionario);
        modal.prioridade_index = position_of_priority(task.prioridade);
        modal.status_index = position_of_status(task.status);
        modal
    }

    pub(in crate::tui) fn editing_id(&self) -> Option<i64> {
        self.editing
    }

    pub(in crate::tui) fn set_submit_error(&mut self, message: String) {
        self.submit_error = Some(message);
    }

    fn form(&self) -> TaskForm {
        TaskForm {
            titulo: self.titulo.clone(),
            descricao: self.descricao.clone(),
            funcionario: selected_option(&self.user_options, self.funcionario_index),
            setor: selected_option(&self.sector_options, self.setor_index),
            prazo: self.prazo.clone(),
            prioridade: Priority::ALL[self.prioridade_index],
            status: TaskStatus::ALL[self.status_index],
        }
    }

    pub(in crate::tui) fn validate_create(&mut self) -> Option<TaskPayload> {
        match self.form().validate() {
            Ok(payload) => {
                self.errors.clear();
                Some(payload)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub(in crate::tui) fn validate_update(&mut self) -> Option<TaskUpdate> {
        match self.form().validate_update() {
            Ok(update) => {
                self.errors.clear();
                Some(update)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        let title = if self.editing.is_some() {
            "Editar tarefa"
        } else {
            "Nova tarefa"
        };
        let field_error = |field: &str| error_for(&self.errors, field).map(str::to_string);

        Modal {
            title: title.to_string(),
            body: None,
            focus_index: self.focus_index,
            fields: vec![
                Field::text("Título", &self.titulo, field_error("titulo")),
                Field::text("Descrição", &self.descricao, field_error("descricao")),
                Field::select(
                    "Setor",
                    self.sector_options.clone(),
                    self.setor_index,
                    field_error("setor"),
                ),
                Field::select(
                    "Funcionário",
                    self.user_options.clone(),
                    self.funcionario_index,
                    field_error("funcionario"),
                ),
                Field::text("Prazo (AAAA-MM-DD HH:MM)", &self.prazo, field_error("prazo")),
                Field::select(
                    "Prioridade",
                    Priority::ALL.iter().map(|p| p.label().to_string()).collect(),
                    self.prioridade_index,
                    None,
                ),
                Field::select(
                    "Status",
                    TaskStatus::ALL.iter().map(|s| s.label().to_string()).collect(),
                    self.status_index,
                    None,
                ),
                Field::button("Salvar", ModalAction::Submit),
                Field::button("Cancelar", ModalAction::Cancel),
            ],
            error: self.submit_error.clone(),
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.apply_modal_state(&modal);
        action
    }

    fn apply_modal_state(&mut self, modal: &Modal) {
        self.focus_index = modal.focus_index;
        if let Some(Field::TextInput { value, .. }) = modal.fields.first() {
            self.titulo = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(1) {
            self.descricao = value.clone();
        }
        if let Some(Field::Select { selected, .. }) = modal.fields.get(2) {
            self.setor_index = *selected;
        }
        if let Some(Field::Select { selected, .. }) = modal.fields.get(3) {
            self.funcionario_index = *selected;
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(4) {
            self.prazo = value.clone();
        }
        if let Some(Field::Select { selected, .. }) = modal.fields.get(5) {
            self.prioridade_index = *selected;
        }
        if let Some(Field::Select { selected, .. }) = modal.fields.get(6) {
            self.status_index = *selected;
        }
    }
}

fn selected_option(options: &[String], index: usize) -> String {
    options.get(index).cloned().unwrap_or_default()
}

fn ensure_option(options: &mut Vec<String>, value: &str) -> usize {
    if value.is_empty() {
        return 0;
    }
    match options.iter().position(|option| option == value) {
        Some(index) => index,
        None => {
            options.push(value.to_string());
            options.len() - 1
        }
    }
}

fn position_of_priority(priority: Priority) -> usize {
    Priority::ALL
        .iter()
        .position(|p| *p == priority)
        .unwrap_or(0)
}

fn position_of_status(status: TaskStatus) -> usize {
    TaskStatus::ALL
        .iter()
        .position(|s| *s == status)
        .unwrap_or(0)
}
