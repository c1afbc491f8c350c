/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    // The service emits "usuario" in registration payloads and "funcionario"
    // in the web client; both decode to the same role.
    #[serde(rename = "funcionario", alias = "usuario")]
    Funcionario,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Funcionario => "funcionario",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Funcionario => "Funcionário",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Funcionario
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pendente,
    EmAndamento,
    Concluida,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pendente,
        TaskStatus::EmAndamento,
        TaskStatus::Concluida,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pendente => "Pendente",
            TaskStatus::EmAndamento => "Em andamento",
            TaskStatus::Concluida => "Concluída",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pendente => "pendente",
            TaskStatus::EmAndamento => "em_andamento",
            TaskStatus::Concluida => "concluida",
        }
    }

    /// Next status in the pendente -> em_andamento -> concluida cycle.
    pub fn next(&self) -> TaskStatus {
        match self {
            TaskStatus::Pendente => TaskStatus::EmAndamento,
            TaskStatus::EmAndamento => TaskStatus::Concluida,
            TaskStatus::Concluida => TaskStatus::Pendente,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pendente
    }
}

/// Task priority, 1 (critical) through 4 (low) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Critica = 1,
    Alta = 2,
    Media = 3,
    Baixa = 4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Critica,
        Priority::Alta,
        Priority::Media,
        Priority::Baixa,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critica => "Crítica",
            Priority::Alta => "Alta",
            Priority::Media => "Média",
            Priority::Baixa => "Baixa",
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Media
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Critica),
            2 => Ok(Priority::Alta),
            3 => Ok(Priority::Media),
            4 => Ok(Priority::Baixa),
            other => Err(format!("prioridade fora do intervalo 1-4: {other}")),
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TaskStatus::Pendente, "\"pendente\"")]
    #[case(TaskStatus::EmAndamento, "\"em_andamento\"")]
    #[case(TaskStatus::Concluida, "\"concluida\"")]
    fn task_status_wire_values(#[case] status: TaskStatus, #[case] wire: &str) {
        assert_eq!(serde_json::to_string(&status).unwrap(), wire);
        assert_eq!(serde_json::from_str::<TaskStatus>(wire).unwrap(), status);
    }

    #[rstest]
    #[case("\"admin\"", Role::Admin)]
    #[case("\"funcionario\"", Role::Funcionario)]
    #[case("\"usuario\"", Role::Funcionario)]
    fn role_accepts_legacy_spelling(#[case] wire: &str, #[case] expected: Role) {
        assert_eq!(serde_json::from_str::<Role>(wire).unwrap(), expected);
    }

    #[test]
    fn role_serializes_canonical_values() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Funcionario).unwrap(),
            "\"funcionario\""
        );
    }

    #[rstest]
    #[case(1, Priority::Critica)]
    #[case(2, Priority::Alta)]
    #[case(3, Priority::Media)]
    #[case(4, Priority::Baixa)]
    fn priority_from_wire_integer(#[case] wire: u8, #[case] expected: Priority) {
        let parsed: Priority = serde_json::from_str(&wire.to_string()).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(serde_json::to_string(&expected).unwrap(), wire.to_string());
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(255)]
    fn priority_rejects_out_of_range(#[case] wire: u8) {
        assert!(serde_json::from_str::<Priority>(&wire.to_string()).is_err());
    }

    #[test]
    fn status_cycle_wraps() {
        assert_eq!(TaskStatus::Pendente.next(), TaskStatus::EmAndamento);
        assert_eq!(TaskStatus::EmAndamento.next(), TaskStatus::Concluida);
        assert_eq!(TaskStatus::Concluida.next(), TaskStatus::Pendente);
    }
}
