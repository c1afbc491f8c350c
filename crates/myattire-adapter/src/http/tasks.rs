/*
[INPUT]:  Task payloads and task identifiers
[OUTPUT]: Task records and update confirmations
[POS]:    HTTP layer - task endpoints
[UPDATE]: When adding new task endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{MyAttireClient, Result};
use crate::types::{MessageResponse, Task, TaskPayload, TaskResponse, TaskStatus, TaskUpdate};

impl MyAttireClient {
    /// Create a task
    ///
    /// POST /tarefas
    pub async fn create_task(&self, payload: &TaskPayload) -> Result<TaskResponse> {
        let builder = self.request(Method::POST, "/tarefas")?.json(payload);
        self.send_json(builder).await
    }

    /// List every task
    ///
    /// GET /tarefas
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let builder = self.request(Method::GET, "/tarefas")?;
        self.send_json(builder).await
    }

    /// Fetch a single task
    ///
    /// GET /tarefas/{id}
    pub async fn get_task(&self, id: i64) -> Result<Task> {
        let endpoint = format!("/tarefas/{id}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Update a task; unset fields keep their stored values
    ///
    /// PUT /tarefas/{id}
    pub async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<TaskResponse> {
        let endpoint = format!("/tarefas/{id}");
        let builder = self.request(Method::PUT, &endpoint)?.json(update);
        self.send_json(builder).await
    }

    /// Move a task to a new status, leaving every other field untouched
    pub async fn set_task_status(&self, id: i64, status: TaskStatus) -> Result<TaskResponse> {
        self.update_task(id, &TaskUpdate::status_only(status)).await
    }

    /// Delete a task
    ///
    /// DELETE /tarefas/{id}
    pub async fn delete_task(&self, id: i64) -> Result<MessageResponse> {
        let endpoint = format!("/tarefas/{id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::MyAttireClient;
    use crate::types::{Priority, TaskPayload, TaskStatus, TaskUpdate};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_payload() -> TaskPayload {
        TaskPayload {
            titulo: "Inventário mensal".to_string(),
            descricao: "Conferir o estoque da loja".to_string(),
            funcionario: "João Silva".to_string(),
            setor: "Logística".to_string(),
            prazo: Some(Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap()),
            prioridade: Priority::Alta,
            status: TaskStatus::Pendente,
        }
    }

    #[tokio::test]
    async fn create_task_round_trips_created_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tarefas"))
            .and(body_json(json!({
                "titulo": "Inventário mensal",
                "descricao": "Conferir o estoque da loja",
                "funcionario": "João Silva",
                "setor": "Logística",
                "prazo": "2026-09-01T18:00:00Z",
                "prioridade": 2,
                "status": "pendente"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Tarefa cadastrada com sucesso",
                "tarefa": {
                    "id": 11,
                    "titulo": "Inventário mensal",
                    "descricao": "Conferir o estoque da loja",
                    "funcionario": "João Silva",
                    "setor": "Logística",
                    "prazo": "2026-09-01T18:00:00Z",
                    "prioridade": 2,
                    "status": "pendente",
                    "data_criacao": "2026-08-20 10:00:00"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let response = client
            .create_task(&sample_payload())
            .await
            .expect("create failed");

        assert_eq!(response.tarefa.id, Some(11));
        assert_eq!(response.tarefa.prioridade, Priority::Alta);
    }

    #[tokio::test]
    async fn missing_required_fields_surface_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tarefas"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Campos obrigatórios ausentes: titulo, setor"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let error = client
            .create_task(&sample_payload())
            .await
            .expect_err("create should fail");

        assert_eq!(
            error.to_string(),
            "API error (status 400): Campos obrigatórios ausentes: titulo, setor"
        );
    }

    #[tokio::test]
    async fn get_task_maps_missing_id_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tarefas/99"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"error": "Tarefa não encontrada"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let error = client.get_task(99).await.expect_err("get should fail");

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn set_task_status_puts_only_the_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/tarefas/7"))
            .and(body_json(json!({"status": "concluida"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Tarefa atualizada com sucesso",
                "tarefa": {
                    "id": 7,
                    "titulo": "Inventário mensal",
                    "descricao": "Conferir o estoque da loja",
                    "funcionario": "João Silva",
                    "setor": "Logística",
                    "prazo": "2026-09-01T18:00:00Z",
                    "prioridade": 2,
                    "status": "concluida"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let response = client
            .set_task_status(7, TaskStatus::Concluida)
            .await
            .expect("status change failed");

        assert_eq!(response.tarefa.status, TaskStatus::Concluida);
    }

    #[tokio::test]
    async fn update_task_sends_partial_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/tarefas/7"))
            .and(body_json(json!({
                "titulo": "Inventário trimestral",
                "prioridade": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Tarefa atualizada com sucesso",
                "tarefa": {
                    "id": 7,
                    "titulo": "Inventário trimestral",
                    "descricao": "Conferir o estoque da loja",
                    "funcionario": "João Silva",
                    "setor": "Logística",
                    "prazo": "2026-09-01T18:00:00Z",
                    "prioridade": 1,
                    "status": "pendente"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let update = TaskUpdate {
            titulo: Some("Inventário trimestral".to_string()),
            prioridade: Some(Priority::Critica),
            ..TaskUpdate::default()
        };
        let response = client.update_task(7, &update).await.expect("update failed");

        assert_eq!(response.tarefa.prioridade, Priority::Critica);
    }

    #[tokio::test]
    async fn delete_task_returns_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/tarefas/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Tarefa excluída com sucesso"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let response = client.delete_task(7).await.expect("delete failed");

        assert_eq!(response.message, "Tarefa excluída com sucesso");
    }
}
