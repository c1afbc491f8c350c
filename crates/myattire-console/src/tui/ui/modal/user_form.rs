/*
[INPUT]:  User registration field buffers and sector options
[OUTPUT]: User creation modal with a validated request
[POS]:    TUI UI modal for users
[UPDATE]: When registration fields or validation rules change
*/

use crossterm::event::KeyCode;

use myattire_adapter::{RegisterUserRequest, Role};

use crate::forms::{FieldError, UserForm, error_for};

use super::{Field, Modal, ModalAction, handle_modal_key};

const NO_SECTOR: &str = "(nenhum)";

pub(in crate::tui) struct UserFormModal {
    nome: String,
    email: String,
    senha: String,
    perfil_index: usize,
    setor_index: usize,
    ativo_index: usize,
    focus_index: usize,
    sector_options: Vec<String>,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
}

impl UserFormModal {
    pub(in crate::tui) fn new(sectors: Vec<String>) -> Self {
        let mut sector_options = vec![NO_SECTOR.to_string()];
        sector_options.extend(sectors);
        Self {
            nome: String::new(),
            email: String::new(),
            senha: String::new(),
            perfil_index: 0,
            setor_index: 0,
            ativo_index: 0,
            focus_index: 0,
            sector_options,
            errors: Vec::new(),
            submit_error: None,
        }
    }

    pub(in crate::tui) fn set_submit_error(&mut self, message: String) {
        self.submit_error = Some(message);
    }

    fn form(&self) -> UserForm {
        let setor = match self.setor_index {
            0 => String::new(),
            index => self
                .sector_options
                .get(index)
                .cloned()
                .unwrap_or_default(),
        };
        UserForm {
            nome: self.nome.clone(),
            email: self.email.clone(),
            senha: self.senha.clone(),
            perfil: perfil_options()[self.perfil_index],
            setor,
            ativo: self.ativo_index == 0,
        }
    }

    pub(in crate::tui) fn validate(&mut self) -> Option<RegisterUserRequest> {
        match self.form().validate() {
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
        let field_error = |field: &str| error_for(&self.errors, field).map(str::to_string);

        Modal {
            title: String::from("Novo usuário"),
            body: None,
            focus_index: self.focus_index,
            fields: vec![
                Field::text("Nome", &self.nome, field_error("nome")),
                Field::text("Email", &self.email, field_error("email")),
                Field::secret("Senha", &self.senha, field_error("senha")),
                Field::select(
                    "Perfil",
                    perfil_options().iter().map(|r| r.label().to_string()).collect(),
                    self.perfil_index,
                    None,
                ),
                Field::select("Setor", self.sector_options.clone(), self.setor_index, None),
                Field::select(
                    "Ativo",
                    vec!["Sim".to_string(), "Não".to_string()],
                    self.ativo_index,
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
            self.nome = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(1) {
            self.email = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(2) {
            self.senha = value.clone();
        }
        if let Some(Field::Select { selected, .. }) = modal.fields.get(3) {
            self.perfil_index = *selected;
        }
        if let Some(Field::Select { selected, .. }) = modal.fields.get(4) {
            self.setor_index = *selected;
        }
        if let Some(Field::Select { selected, .. }) = modal.fields.get(5) {
            self.ativo_index = *selected;
        }
    }
}

fn perfil_options() -> [Role; 2] {
    [Role::Funcionario, Role::Admin]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_is_rejected_with_message() {
        let mut modal = UserFormModal::new(vec!["Vendas".to_string()]);
        modal.nome = "Ana Lima".to_string();
        modal.email = "ana@empresa.com".to_string();
        modal.senha = "123".to_string();

        assert!(modal.validate().is_none());
        assert_eq!(
            error_for(&modal.errors, "senha"),
            Some("Senha deve ter pelo menos 6 caracteres")
        );
    }

    #[test]
    fn sector_placeholder_maps_to_no_sector() {
        let mut modal = UserFormModal::new(vec!["Vendas".to_string()]);
        modal.nome = "Ana Lima".to_string();
        modal.email = "ana@empresa.com".to_string();
        modal.senha = "segredo1".to_string();

        let request = modal.validate().expect("request");
        assert_eq!(request.setor, None);
        assert_eq!(request.perfil, Role::Funcionario);
        assert!(request.ativo);
    }
}
