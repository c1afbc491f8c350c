/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Priority, Role, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub email: String,
    // Listing rows carry "perfil", the login echo carries "role".
    #[serde(alias = "role", default)]
    pub perfil: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setor: Option<String>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::deserialize_loose_bool"
    )]
    pub ativo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::deserialize_loose_bool"
    )]
    pub ativo: bool,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_datetime_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_criacao: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub titulo: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_null_default"
    )]
    pub descricao: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_null_default"
    )]
    pub funcionario: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_null_default"
    )]
    pub setor: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_datetime_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub prazo: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_null_default"
    )]
    pub prioridade: Priority,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_null_default"
    )]
    pub status: TaskStatus,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_datetime_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_criacao: Option<DateTime<Utc>>,
}

impl Task {
    /// A task is overdue once its deadline has passed and it is not done.
    /// Tasks without a deadline are never overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.prazo {
            Some(prazo) => prazo < now && self.status != TaskStatus::Concluida,
            None => false,
        }
    }
}

pub(crate) mod serde_helpers {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn default_true() -> bool {
        true
    }

    /// Accepts `true`/`false` as well as the MySQL tinyint 0/1 the service
    /// returns for `ativo` columns.
    pub fn deserialize_loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Bool(flag) => Ok(flag),
            Value::Number(num) => Ok(num.as_i64().unwrap_or(0) != 0),
            Value::Null => Ok(true),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value: {other}"
            ))),
        }
    }

    /// Missing key or explicit null both fall back to the default.
    pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Timestamps arrive as RFC 3339, as the HTML datetime-local shape
    /// `YYYY-MM-DDTHH:MM[:SS]`, as the MySQL shape `YYYY-MM-DD HH:MM:SS`,
    /// or as a bare date. Naive values are read as UTC.
    pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(parsed.and_utc());
            }
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
        }
        None
    }

    pub fn deserialize_datetime_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => parse_datetime(&text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {text}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn user_row_tolerates_mysql_shapes() {
        let value = json!({
            "id": 7,
            "nome": "João Silva",
            "email": "joao@empresa.com",
            "perfil": "usuario",
            "senha_hash": "$2b$12$abcdef",
            "setor": "Financeiro",
            "ativo": 1
        });

        let user: User = serde_json::from_value(value).expect("user should deserialize");

        assert_eq!(user.perfil, Role::Funcionario);
        assert!(user.ativo);
        assert_eq!(user.setor.as_deref(), Some("Financeiro"));
    }

    #[test]
    fn login_echo_decodes_without_id() {
        let value = json!({
            "email": "admin@empresa.com",
            "nome": "Admin Sistema",
            "role": "admin",
            "setor": null,
            "ativo": true
        });

        let user: User = serde_json::from_value(value).expect("user should deserialize");

        assert_eq!(user.id, None);
        assert_eq!(user.perfil, Role::Admin);
        assert_eq!(user.setor, None);
    }

    #[test]
    fn task_accepts_datetime_local_deadline() {
        let value = json!({
            "id": 3,
            "titulo": "Inventário",
            "descricao": "Conferir estoque",
            "funcionario": "João Silva",
            "setor": "Logística",
            "prazo": "2026-03-01T14:30",
            "prioridade": 2,
            "status": "pendente"
        });

        let task: Task = serde_json::from_value(value).expect("task should deserialize");

        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 0).unwrap();
        assert_eq!(task.prazo, Some(expected));
        assert_eq!(task.prioridade, Priority::Alta);
    }

    #[test]
    fn task_with_null_fields_falls_back_to_defaults() {
        let value = json!({
            "titulo": "Sem detalhes",
            "descricao": null,
            "funcionario": null,
            "setor": "Vendas",
            "prazo": null,
            "prioridade": null,
            "status": null
        });

        let task: Task = serde_json::from_value(value).expect("task should deserialize");

        assert_eq!(task.descricao, "");
        assert_eq!(task.prioridade, Priority::Media);
        assert_eq!(task.status, TaskStatus::Pendente);
        assert_eq!(task.prazo, None);
    }

    #[test]
    fn task_serializes_rfc3339_deadline() {
        let task = Task {
            id: Some(1),
            titulo: "Relatório".into(),
            descricao: "Fechamento mensal".into(),
            funcionario: "Maria".into(),
            setor: "Financeiro".into(),
            prazo: Some(Utc.with_ymd_and_hms(2026, 9, 30, 18, 0, 0).unwrap()),
            prioridade: Priority::Critica,
            status: TaskStatus::EmAndamento,
            data_criacao: None,
        };

        let value = serde_json::to_value(&task).expect("task should serialize");

        assert_eq!(value["prazo"], "2026-09-30T18:00:00Z");
        assert_eq!(value["prioridade"], 1);
        assert_eq!(value["status"], "em_andamento");
    }

    #[test]
    fn overdue_requires_past_deadline_and_open_status() {
        let now = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap();
        let mut task = Task {
            id: None,
            titulo: "t".into(),
            descricao: String::new(),
            funcionario: String::new(),
            setor: "s".into(),
            prazo: Some(Utc.with_ymd_and_hms(2026, 6, 14, 12, 0, 0).unwrap()),
            prioridade: Priority::default(),
            status: TaskStatus::Pendente,
            data_criacao: None,
        };

        assert!(task.is_overdue(now));

        task.status = TaskStatus::Concluida;
        assert!(!task.is_overdue(now));

        task.status = TaskStatus::Pendente;
        task.prazo = Some(Utc.with_ymd_and_hms(2026, 6, 16, 12, 0, 0).unwrap());
        assert!(!task.is_overdue(now));

        task.prazo = None;
        assert!(!task.is_overdue(now));
    }
}
