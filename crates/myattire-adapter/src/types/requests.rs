/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Priority, Role, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub perfil: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setor: Option<String>,
    pub ativo: bool,
}

impl RegisterUserRequest {
    pub fn new(nome: impl Into<String>, email: impl Into<String>, senha: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            email: email.into(),
            senha: senha.into(),
            perfil: Role::Funcionario,
            setor: None,
            ativo: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub id: i64,
    pub email: String,
    pub senha_atual: String,
    pub nova_senha: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSectorRequest {
    pub nome: String,
    pub ativo: bool,
}

impl CreateSectorRequest {
    pub fn new(nome: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            ativo: true,
        }
    }
}

/// Full task payload for creation. `funcionario` and `setor` are names,
/// matching what the service stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub titulo: String,
    pub descricao: String,
    pub funcionario: String,
    pub setor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prazo: Option<DateTime<Utc>>,
    pub prioridade: Priority,
    pub status: TaskStatus,
}

/// Partial task update; only the populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funcionario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prazo: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioridade: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
