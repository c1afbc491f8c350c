/*
[INPUT]:  Current and new password buffers
[OUTPUT]: Password change modal with validated fields
[POS]:    TUI UI modal for password changes
[UPDATE]: When password rules change
*/

use crossterm::event::KeyCode;

use crate::forms::{FieldError, PasswordForm, error_for};

use super::{Field, Modal, ModalAction, handle_modal_key};

pub(in crate::tui) struct PasswordFormModal {
    form: PasswordForm,
    focus_index: usize,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
}

impl PasswordFormModal {
    pub(in crate::tui) fn new() -> Self {
        Self {
            form: PasswordForm::default(),
            focus_index: 0,
            errors: Vec::new(),
            submit_error: None,
        }
    }

    pub(in crate::tui) fn set_submit_error(&mut self, message: String) {
        self.submit_error = Some(message);
    }

    pub(in crate::tui) fn validate(&mut self) -> Option<PasswordForm> {
        match self.form.validate() {
            Ok(()) => {
                self.errors.clear();
                Some(self.form.clone())
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        let field_error = |field: &str| error_for(&self.errors, field).map(str::to_string);

        Modal {
            title: String::from("Alterar senha"),
            body: None,
            focus_index: self.focus_index,
            fields: vec![
                Field::secret("Senha atual", &self.form.senha_atual, field_error("senha_atual")),
                Field::secret("Nova senha", &self.form.nova_senha, field_error("nova_senha")),
                Field::button("Alterar", ModalAction::Submit),
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
            self.form.senha_atual = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(1) {
            self.form.nova_senha = value.clone();
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_are_required() {
        let mut modal = PasswordFormModal::new();
        assert!(modal.validate().is_none());
        assert_eq!(
            error_for(&modal.errors, "senha_atual"),
            Some("Senha atual é obrigatória")
        );
        assert_eq!(
            error_for(&modal.errors, "nova_senha"),
            Some("Nova senha é obrigatória")
        );
    }
}
