/*
[INPUT]:  Sector name buffer
[OUTPUT]: Sector creation modal with a validated request
[POS]:    TUI UI modal for sectors
[UPDATE]: When sector fields change
*/

use crossterm::event::KeyCode;

use myattire_adapter::CreateSectorRequest;

use crate::forms::{FieldError, SectorForm, error_for};

use super::{Field, Modal, ModalAction, handle_modal_key};

pub(in crate::tui) struct SectorFormModal {
    nome: String,
    focus_index: usize,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
}

impl SectorFormModal {
    pub(in crate::tui) fn new() -> Self {
        Self {
            nome: String::new(),
            focus_index: 0,
            errors: Vec::new(),
            submit_error: None,
        }
    }

    pub(in crate::tui) fn set_submit_error(&mut self, message: String) {
        self.submit_error = Some(message);
    }

    pub(in crate::tui) fn validate(&mut self) -> Option<CreateSectorRequest> {
        let form = SectorForm {
            nome: self.nome.clone(),
        };
        match form.validate() {
            Ok(request) => {
                self.errors.clear();
                Some(request)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        Modal {
            title: String::from("Novo setor"),
            body: None,
            focus_index: self.focus_index,
            fields: vec![
                Field::text(
                    "Nome",
                    &self.nome,
                    error_for(&self.errors, "nome").map(str::to_string),
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
        self.focus_index = modal.focus_index;
        if let Some(Field::TextInput { value, .. }) = modal.fields.first() {
            self.nome = value.clone();
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_keeps_the_modal_open_with_an_error() {
        let mut modal = SectorFormModal::new();
        assert!(modal.validate().is_none());
        assert_eq!(
            error_for(&modal.errors, "nome"),
            Some("Nome do setor é obrigatório")
        );

        for ch in "Financeiro".chars() {
            modal.handle_key(KeyCode::Char(ch));
        }
        let request = modal.validate().expect("request");
        assert_eq!(request.nome, "Financeiro");
        assert!(modal.errors.is_empty());
    }
}
