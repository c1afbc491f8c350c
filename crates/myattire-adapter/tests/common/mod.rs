/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for myattire-adapter tests

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock JWT token for testing
pub fn mock_jwt_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}

/// Mount a successful admin login on the given server
pub async fn mount_admin_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/usuarios/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login bem-sucedido",
            "token": mock_jwt_token(),
            "usuario": {
                "email": "admin@empresa.com",
                "nome": "Admin Sistema",
                "role": "admin",
                "setor": null,
                "ativo": true
            }
        })))
        .mount(server)
        .await;
}

/// A task row shaped the way the service returns it
pub fn task_row(id: i64, titulo: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "titulo": titulo,
        "descricao": "Descrição de teste",
        "funcionario": "João Silva",
        "setor": "Logística",
        "prazo": "2026-09-01T18:00:00Z",
        "prioridade": 3,
        "status": status,
        "data_criacao": "2026-08-01 09:00:00"
    })
}
