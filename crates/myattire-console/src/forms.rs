/*
[INPUT]:  Raw form field values typed by the operator
[OUTPUT]: Validated API request payloads or per-field errors
[POS]:    Domain layer - form validation shared by TUI and CLI
[UPDATE]: When validation rules or form fields change
*/

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use myattire_adapter::{
    CreateSectorRequest, LoginRequest, Priority, RegisterUserRequest, Role, Task, TaskPayload,
    TaskStatus, TaskUpdate, UpdatePasswordRequest,
};

/// One validation failure, keyed to the field it belongs to so the UI can
/// render the message under the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Find the message attached to one field, if any
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|error| error.field == field)
        .map(|error| error.message.as_str())
}

pub fn non_empty(field: &'static str, value: &str, message: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::new(field, message))
    } else {
        None
    }
}

pub fn min_len(field: &'static str, value: &str, min: usize, message: &str) -> Option<FieldError> {
    if value.chars().count() < min {
        Some(FieldError::new(field, message))
    } else {
        None
    }
}

/// Shape test only: something@something.something, no whitespace in any
/// part. Real validation belongs to the service.
pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.split_once('.') else {
        return false;
    };
    let clean = |part: &str| !part.is_empty() && !part.contains(char::is_whitespace);
    clean(local) && clean(host) && clean(tld)
}

pub fn valid_email(field: &'static str, value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::new(field, "Email é obrigatório"))
    } else if !looks_like_email(value.trim()) {
        Some(FieldError::new(field, "Email inválido"))
    } else {
        None
    }
}

/// Deadline text from the form: `AAAA-MM-DD HH:MM` (a `T` separator also
/// works) or a bare date, which is read as the end of that day.
pub fn parse_prazo(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_prazo(prazo: Option<DateTime<Utc>>) -> String {
    match prazo {
        Some(prazo) => prazo.format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub senha: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, Vec<FieldError>> {
        let mut errors = Vec::new();
        errors.extend(valid_email("email", &self.email));
        errors.extend(non_empty("senha", &self.senha, "Senha é obrigatória"));

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            senha: self.senha.clone(),
        })
    }
}

/// Task create/edit form. Stricter than the service, which only insists on
/// titulo and setor; here every field must be filled before submission.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub titulo: String,
    pub descricao: String,
    pub funcionario: String,
    pub setor: String,
    pub prazo: String,
    pub prioridade: Priority,
    pub status: TaskStatus,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            titulo: String::new(),
            descricao: String::new(),
            funcionario: String::new(),
            setor: String::new(),
            prazo: String::new(),
            prioridade: Priority::default(),
            status: TaskStatus::Pendente,
        }
    }
}

impl TaskForm {
    /// Prefill for editing an existing task
    pub fn from_task(task: &Task) -> Self {
        Self {
            titulo: task.titulo.clone(),
            descricao: task.descricao.clone(),
            funcionario: task.funcionario.clone(),
            setor: task.setor.clone(),
            prazo: format_prazo(task.prazo),
            prioridade: task.prioridade,
            status: task.status,
        }
    }

    fn check(&self) -> Result<DateTime<Utc>, Vec<FieldError>> {
        let mut errors = Vec::new();
        errors.extend(non_empty("titulo", &self.titulo, "Título é obrigatório"));
        errors.extend(non_empty(
            "descricao",
            &self.descricao,
            "Descrição é obrigatória",
        ));
        errors.extend(non_empty("setor", &self.setor, "Setor é obrigatório"));
        errors.extend(non_empty(
            "funcionario",
            &self.funcionario,
            "Funcionário é obrigatório",
        ));

        let prazo = if self.prazo.trim().is_empty() {
            errors.push(FieldError::new("prazo", "Prazo é obrigatório"));
            None
        } else {
            let parsed = parse_prazo(&self.prazo);
            if parsed.is_none() {
                errors.push(FieldError::new(
                    "prazo",
                    "Prazo inválido (use AAAA-MM-DD HH:MM)",
                ));
            }
            parsed
        };

        match prazo {
            Some(prazo) if errors.is_empty() => Ok(prazo),
            _ => Err(errors),
        }
    }

    pub fn validate(&self) -> Result<TaskPayload, Vec<FieldError>> {
        let prazo = self.check()?;
        Ok(TaskPayload {
            titulo: self.titulo.trim().to_string(),
            descricao: self.descricao.trim().to_string(),
            funcionario: self.funcionario.trim().to_string(),
            setor: self.setor.trim().to_string(),
            prazo: Some(prazo),
            prioridade: self.prioridade,
            status: self.status,
        })
    }

    /// Full-replacement update for the edit flow
    pub fn validate_update(&self) -> Result<TaskUpdate, Vec<FieldError>> {
        let payload = self.validate()?;
        Ok(TaskUpdate {
            titulo: Some(payload.titulo),
            descricao: Some(payload.descricao),
            funcionario: Some(payload.funcionario),
            setor: Some(payload.setor),
            prazo: payload.prazo,
            prioridade: Some(payload.prioridade),
            status: Some(payload.status),
        })
    }
}

/// New-employee form. The service has no user-update route, so this form
/// only ever creates.
#[derive(Debug, Clone)]
pub struct UserForm {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub perfil: Role,
    /// Empty means no sector assigned
    pub setor: String,
    pub ativo: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            nome: String::new(),
            email: String::new(),
            senha: String::new(),
            perfil: Role::Funcionario,
            setor: String::new(),
            ativo: true,
        }
    }
}

impl UserForm {
    pub fn validate(&self) -> Result<RegisterUserRequest, Vec<FieldError>> {
        let mut errors = Vec::new();
        errors.extend(non_empty("nome", &self.nome, "Nome é obrigatório"));
        errors.extend(valid_email("email", &self.email));
        if self.senha.is_empty() {
            errors.push(FieldError::new(
                "senha",
                "Senha é obrigatória para novos usuários",
            ));
        } else {
            errors.extend(min_len(
                "senha",
                &self.senha,
                6,
                "Senha deve ter pelo menos 6 caracteres",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        let setor = self.setor.trim();
        Ok(RegisterUserRequest {
            nome: self.nome.trim().to_string(),
            email: self.email.trim().to_string(),
            senha: self.senha.clone(),
            perfil: self.perfil,
            setor: (!setor.is_empty()).then(|| setor.to_string()),
            ativo: self.ativo,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectorForm {
    pub nome: String,
}

impl SectorForm {
    pub fn validate(&self) -> Result<CreateSectorRequest, Vec<FieldError>> {
        match non_empty("nome", &self.nome, "Nome do setor é obrigatório") {
            Some(error) => Err(vec![error]),
            None => Ok(CreateSectorRequest::new(self.nome.trim())),
        }
    }
}

/// Own-password change. The id and email come from the session user, not
/// from the form.
#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    pub senha_atual: String,
    pub nova_senha: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.senha_atual.is_empty() {
            errors.push(FieldError::new("senha_atual", "Senha atual é obrigatória"));
        }
        if self.nova_senha.is_empty() {
            errors.push(FieldError::new("nova_senha", "Nova senha é obrigatória"));
        } else {
            errors.extend(min_len(
                "nova_senha",
                &self.nova_senha,
                6,
                "Senha deve ter pelo menos 6 caracteres",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn to_request(&self, id: i64, email: &str) -> UpdatePasswordRequest {
        UpdatePasswordRequest {
            id,
            email: email.to_string(),
            senha_atual: self.senha_atual.clone(),
            nova_senha: self.nova_senha.clone(),
        }
    }
}
