/*
[INPUT]:  Credentials and user payloads
[OUTPUT]: Authenticated sessions and user records
[POS]:    HTTP layer - user and login endpoints
[UPDATE]: When adding new user endpoints or changing payloads
*/

use reqwest::Method;
use tracing::info;

use crate::http::{MyAttireClient, Result};
use crate::types::{
    LoginRequest, LoginResponse, MessageResponse, RegisterResponse, RegisterUserRequest,
    UpdatePasswordRequest, User,
};

impl MyAttireClient {
    /// Authenticate and store the returned token + user echo in the session
    ///
    /// POST /usuarios/login
    pub async fn login(&self, email: &str, senha: &str) -> Result<LoginResponse> {
        let payload = LoginRequest {
            email: email.to_string(),
            senha: senha.to_string(),
        };

        let builder = self.request(Method::POST, "/usuarios/login")?.json(&payload);
        let response: LoginResponse = self.send_json(builder).await?;

        self.session()
            .set_session(response.token.clone(), response.usuario.clone());
        info!(email = %response.usuario.email, role = %response.usuario.perfil.as_str(), "login succeeded");

        Ok(response)
    }

    /// Drop the local session; the service keeps no server-side state
    pub fn logout(&self) {
        self.session().clear();
    }

    /// Register a new user
    ///
    /// POST /usuarios/cadastrar
    pub async fn register_user(&self, request: &RegisterUserRequest) -> Result<RegisterResponse> {
        let builder = self
            .request(Method::POST, "/usuarios/cadastrar")?
            .json(request);
        self.send_json(builder).await
    }

    /// List every registered user
    ///
    /// GET /usuarios
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let builder = self.request(Method::GET, "/usuarios")?;
        self.send_json(builder).await
    }

    /// Fetch a single user by email
    ///
    /// GET /usuarios/email/{email}
    pub async fn find_user_by_email(&self, email: &str) -> Result<User> {
        let url = self.url_with_segment("/usuarios/email/", email)?;
        let builder = self.request_url(Method::GET, url);
        self.send_json(builder).await
    }

    /// Change a user's password, verifying the current one
    ///
    /// PUT /usuarios/atualizar_senha
    pub async fn update_password(&self, request: &UpdatePasswordRequest) -> Result<MessageResponse> {
        let builder = self
            .request(Method::PUT, "/usuarios/atualizar_senha")?
            .json(request);
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{MyAttireClient, MyAttireError};
    use crate::types::{RegisterUserRequest, Role, UpdatePasswordRequest, User};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn login_stores_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usuarios/login"))
            .and(body_json(json!({
                "email": "admin@empresa.com",
                "senha": "123456"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Login bem-sucedido",
                "token": "jwt-abc",
                "usuario": {
                    "email": "admin@empresa.com",
                    "nome": "Admin Sistema",
                    "role": "admin",
                    "setor": null,
                    "ativo": true
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let response = client
            .login("admin@empresa.com", "123456")
            .await
            .expect("login failed");

        assert_eq!(response.usuario.perfil, Role::Admin);
        assert_eq!(client.session().token(), Some("jwt-abc".to_string()));
        assert!(client.session().is_admin());
    }

    #[tokio::test]
    async fn login_with_wrong_password_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usuarios/login"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": "Senha incorreta"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let error = client
            .login("admin@empresa.com", "nope")
            .await
            .expect_err("login should fail");

        assert!(error.is_auth_error());
        assert!(client.session().token().is_none());
    }

    #[tokio::test]
    async fn register_user_posts_full_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usuarios/cadastrar"))
            .and(body_json(json!({
                "nome": "Maria Souza",
                "email": "maria@empresa.com",
                "senha": "segredo1",
                "perfil": "funcionario",
                "setor": "Vendas",
                "ativo": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Usuário cadastrado com sucesso",
                "token": "jwt-new"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let mut request = RegisterUserRequest::new("Maria Souza", "maria@empresa.com", "segredo1");
        request.setor = Some("Vendas".to_string());

        let response = client
            .register_user(&request)
            .await
            .expect("register failed");

        assert_eq!(response.message, "Usuário cadastrado com sucesso");
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usuarios/cadastrar"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Usuário com esse e-mail já existe"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let request = RegisterUserRequest::new("Maria", "maria@empresa.com", "segredo1");
        let error = client
            .register_user(&request)
            .await
            .expect_err("register should fail");

        match error {
            MyAttireError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Usuário com esse e-mail já existe");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_users_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/usuarios"))
            .and(header("authorization", "Bearer jwt-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1,
                    "nome": "Admin Sistema",
                    "email": "admin@empresa.com",
                    "perfil": "admin",
                    "senha_hash": "$2b$12$x",
                    "setor": null,
                    "ativo": 1
                },
                {
                    "id": 2,
                    "nome": "João Silva",
                    "email": "joao@empresa.com",
                    "perfil": "usuario",
                    "senha_hash": "$2b$12$y",
                    "setor": "Logística",
                    "ativo": 0
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        client.session().set_session(
            "jwt-abc".to_string(),
            User {
                id: Some(1),
                nome: "Admin Sistema".to_string(),
                email: "admin@empresa.com".to_string(),
                perfil: Role::Admin,
                setor: None,
                ativo: true,
            },
        );

        let users = client.list_users().await.expect("list failed");

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].perfil, Role::Admin);
        assert_eq!(users[1].perfil, Role::Funcionario);
        assert!(!users[1].ativo);
    }

    #[tokio::test]
    async fn find_user_by_email_hits_encoded_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/usuarios/email/joao@empresa.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2,
                "nome": "João Silva",
                "email": "joao@empresa.com",
                "perfil": "usuario",
                "setor": "Logística",
                "ativo": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let user = client
            .find_user_by_email("joao@empresa.com")
            .await
            .expect("find failed");

        assert_eq!(user.id, Some(2));
        assert_eq!(user.setor.as_deref(), Some("Logística"));
    }

    #[tokio::test]
    async fn update_password_rejection_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/usuarios/atualizar_senha"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": "Senha atual incorreta"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let request = UpdatePasswordRequest {
            id: 2,
            email: "joao@empresa.com".to_string(),
            senha_atual: "errada".to_string(),
            nova_senha: "novasenha".to_string(),
        };
        let error = client
            .update_password(&request)
            .await
            .expect_err("update should fail");

        assert!(error.is_auth_error());
    }
}
