/*
[INPUT]:  Crossterm key events and the current screen/modal state
[OUTPUT]: TUI event routing, modal submission, and session fallback
[POS]:    TUI event handling
[UPDATE]: When adding hotkeys or modal flows
*/

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use myattire_adapter::{
    CreateSectorRequest, MyAttireError, RegisterUserRequest, TaskPayload, TaskUpdate,
};

use crate::filters::TaskFilters;
use crate::forms::PasswordForm;

use super::app::{ActiveModal, AppState, Screen, Tab};
use super::ui::modal::ModalAction;

enum ModalSubmit {
    CreateTask(TaskPayload),
    UpdateTask { id: i64, update: TaskUpdate },
    CreateUser(RegisterUserRequest),
    CreateSector(CreateSectorRequest),
    ChangePassword(PasswordForm),
    DeleteTask { id: i64 },
}

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.screen == Screen::Login {
        return handle_login_key(app, key.code).await;
    }

    if app.active_modal.is_some() {
        handle_modal_key_event(app, key.code).await;
        return false;
    }

    if app.editing_busca {
        handle_busca_key(app, key.code);
        return false;
    }

    handle_main_key(app, key.code).await
}

async fn handle_login_key(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::Down => {
            app.login.focus = (app.login.focus + 1) % 3;
        }
        KeyCode::Up => {
            app.login.focus = (app.login.focus + 2) % 3;
        }
        KeyCode::Enter => {
            app.submit_login().await;
        }
        KeyCode::Backspace => {
            match app.login.focus {
                0 => app.login.form.email.pop(),
                1 => app.login.form.senha.pop(),
                _ => None,
            };
        }
        KeyCode::Char(ch) => match app.login.focus {
            0 => app.login.form.email.push(ch),
            1 => app.login.form.senha.push(ch),
            _ => {}
        },
        _ => {}
    }
    false
}

fn handle_busca_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.filters.busca.clear();
            app.editing_busca = false;
        }
        KeyCode::Enter => app.editing_busca = false,
        KeyCode::Backspace => {
            app.filters.busca.pop();
        }
        KeyCode::Char(ch) => app.filters.busca.push(ch),
        _ => {}
    }
    app.clamp_selection();
}

async fn handle_main_key(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('o') => app.sign_out().await,
        KeyCode::Char('r') => {
            if let Err(err) = app.refresh_all().await {
                if err.is_auth_error() {
                    app.handle_auth_failure().await;
                } else {
                    app.status_message = format!("Falha ao atualizar listagens: {err}");
                }
            }
        }
        KeyCode::Tab => app.next_tab(),
        KeyCode::Char(ch @ '1'..='9') => {
            app.set_tab_index(ch as usize - '1' as usize);
        }
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Char('p') => app.open_change_password(),
        KeyCode::Char('c') => match app.current_tab {
            Tab::Tarefas if app.is_admin() => app.begin_status_cycle(),
            Tab::MinhasTarefas => app.begin_complete_task(),
            _ => {}
        },
        KeyCode::Char('n') if admin_on(app, Tab::Tarefas) => app.open_create_task(),
        KeyCode::Char('e') if admin_on(app, Tab::Tarefas) => app.open_edit_task(),
        KeyCode::Char('d') if admin_on(app, Tab::Tarefas) => app.open_confirm_delete(),
        KeyCode::Char('u') if admin_on(app, Tab::Usuarios) => app.open_create_user(),
        KeyCode::Char('s') if admin_on(app, Tab::Setores) => app.open_create_sector(),
        KeyCode::Char('f') if admin_on(app, Tab::Tarefas) => {
            app.filters.cycle_status();
            app.clamp_selection();
        }
        KeyCode::Char('g') if admin_on(app, Tab::Tarefas) => {
            app.filters.cycle_prioridade();
            app.clamp_selection();
        }
        KeyCode::Char('t') if admin_on(app, Tab::Tarefas) => {
            cycle_setor_filter(app);
            app.clamp_selection();
        }
        KeyCode::Char('/') if admin_on(app, Tab::Tarefas) => app.editing_busca = true,
        KeyCode::Char('x') if admin_on(app, Tab::Tarefas) => {
            app.filters = TaskFilters::default();
            app.clamp_selection();
        }
        _ => {}
    }
    false
}

fn admin_on(app: &AppState, tab: Tab) -> bool {
    app.is_admin() && app.current_tab == tab
}

fn cycle_setor_filter(app: &mut AppState) {
    let names: Vec<String> = app.sectors.iter().map(|sector| sector.nome.clone()).collect();
    if names.is_empty() {
        app.status_message = "Nenhum setor cadastrado".to_string();
        return;
    }
    app.filters.setor = match app.filters.setor.take() {
        None => names.first().cloned(),
        Some(current) => match names.iter().position(|name| *name == current) {
            Some(index) if index + 1 < names.len() => Some(names[index + 1].clone()),
            _ => None,
        },
    };
}

async fn handle_modal_key_event(app: &mut AppState, key: KeyCode) {
    let (action, submit) = match app.active_modal_mut() {
        Some(ActiveModal::TaskForm(modal)) => {
            let action = modal.handle_key(key);
            let submit = if action == ModalAction::Submit {
                match modal.editing_id() {
                    Some(id) => modal
                        .validate_update()
                        .map(|update| ModalSubmit::UpdateTask { id, update }),
                    None => modal.validate_create().map(ModalSubmit::CreateTask),
                }
            } else {
                None
            };
            (action, submit)
        }
        Some(ActiveModal::UserForm(modal)) => {
            let action = modal.handle_key(key);
            let submit = if action == ModalAction::Submit {
                modal.validate().map(ModalSubmit::CreateUser)
            } else {
                None
            };
            (action, submit)
        }
        Some(ActiveModal::SectorForm(modal)) => {
            let action = modal.handle_key(key);
            let submit = if action == ModalAction::Submit {
                modal.validate().map(ModalSubmit::CreateSector)
            } else {
                None
            };
            (action, submit)
        }
        Some(ActiveModal::PasswordForm(modal)) => {
            let action = modal.handle_key(key);
            let submit = if action == ModalAction::Submit {
                modal.validate().map(ModalSubmit::ChangePassword)
            } else {
                None
            };
            (action, submit)
        }
        Some(ActiveModal::ConfirmDelete(modal)) => {
            let action = modal.handle_key(key);
            let submit = if action == ModalAction::Submit {
                Some(ModalSubmit::DeleteTask { id: modal.id() })
            } else {
                None
            };
            (action, submit)
        }
        None => (ModalAction::None, None),
    };

    if action == ModalAction::Cancel {
        app.close_modal();
        return;
    }

    // Validation failures keep the modal open; the field errors are already
    // stored on it.
    let Some(submit) = submit else {
        return;
    };

    let password_flow = matches!(submit, ModalSubmit::ChangePassword(_));
    let result = match submit {
        ModalSubmit::CreateTask(payload) => app.submit_create_task(payload).await,
        ModalSubmit::UpdateTask { id, update } => app.submit_update_task(id, update).await,
        ModalSubmit::CreateUser(request) => app.submit_create_user(request).await,
        ModalSubmit::CreateSector(request) => app.submit_create_sector(request).await,
        ModalSubmit::ChangePassword(form) => app.submit_change_password(form).await,
        ModalSubmit::DeleteTask { id } => app.submit_delete_task(id).await,
    };

    match result {
        Ok(message) => {
            app.close_modal();
            app.status_message = message;
        }
        Err(err) => handle_submit_error(app, err, password_flow).await,
    }
}

/// A rejected current password is an ordinary form error; every other
/// authentication failure means the token is gone and the session with it.
async fn handle_submit_error(app: &mut AppState, err: MyAttireError, password_flow: bool) {
    let session_lost = match &err {
        MyAttireError::SessionExpired => true,
        MyAttireError::Authentication { .. } => !password_flow,
        _ => false,
    };
    if session_lost {
        app.handle_auth_failure().await;
        return;
    }

    let message = err.to_string();
    match app.active_modal_mut() {
        Some(ActiveModal::TaskForm(modal)) => modal.set_submit_error(message),
        Some(ActiveModal::UserForm(modal)) => modal.set_submit_error(message),
        Some(ActiveModal::SectorForm(modal)) => modal.set_submit_error(message),
        Some(ActiveModal::PasswordForm(modal)) => modal.set_submit_error(message),
        Some(ActiveModal::ConfirmDelete(_)) | None => {
            app.close_modal();
            app.status_message = message;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_store::SessionStore;
    use crate::tui::{LogBuffer, LogBufferHandle};
    use myattire_adapter::{MyAttireClient, Role, User};
    use std::sync::{Arc, Mutex as StdMutex};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_for(role: Role) -> AppState {
        let client = MyAttireClient::with_base_url("http://localhost:9").expect("client");
        let usuario = User {
            id: Some(1),
            nome: "Ana Lima".to_string(),
            email: "ana@empresa.com".to_string(),
            perfil: role,
            setor: None,
            ativo: true,
        };
        client.session().set_session("jwt-test".to_string(), usuario);
        let store = SessionStore::with_path(
            std::env::temp_dir().join(format!("myattire-events-{}.json", std::process::id())),
        );
        let log_buffer: LogBufferHandle = Arc::new(StdMutex::new(LogBuffer::new(16)));
        AppState::new(client, store, log_buffer)
    }

    #[tokio::test]
    async fn funcionario_keys_never_reach_admin_modals() {
        let mut app = app_for(Role::Funcionario);
        app.current_tab = Tab::MinhasTarefas;

        handle_key_event(&mut app, key(KeyCode::Char('n'))).await;
        handle_key_event(&mut app, key(KeyCode::Char('u'))).await;
        handle_key_event(&mut app, key(KeyCode::Char('s'))).await;
        assert!(app.active_modal.is_none());

        handle_key_event(&mut app, key(KeyCode::Char('2'))).await;
        assert_eq!(app.current_tab, Tab::Logs);
        handle_key_event(&mut app, key(KeyCode::Char('3'))).await;
        assert_eq!(app.current_tab, Tab::Logs);
    }

    #[tokio::test]
    async fn admin_task_tab_opens_the_create_modal() {
        let mut app = app_for(Role::Admin);
        app.set_tab(Tab::Tarefas);

        handle_key_event(&mut app, key(KeyCode::Char('n'))).await;
        assert!(matches!(app.active_modal, Some(ActiveModal::TaskForm(_))));

        handle_key_event(&mut app, key(KeyCode::Esc)).await;
        assert!(app.active_modal.is_none());
    }

    #[tokio::test]
    async fn search_mode_collects_typed_characters() {
        let mut app = app_for(Role::Admin);
        app.set_tab(Tab::Tarefas);

        handle_key_event(&mut app, key(KeyCode::Char('/'))).await;
        assert!(app.editing_busca);
        for ch in "vitrine".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(ch))).await;
        }
        handle_key_event(&mut app, key(KeyCode::Enter)).await;
        assert!(!app.editing_busca);
        assert_eq!(app.filters.busca, "vitrine");
    }

    #[tokio::test]
    async fn ctrl_c_requests_quit_from_any_screen() {
        let mut app = app_for(Role::Admin);
        let quit = handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .await;
        assert!(quit);
    }
}
