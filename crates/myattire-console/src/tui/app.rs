/*
[INPUT]:  API client with session, persisted session store, log buffer
[OUTPUT]: AppState helpers for TUI rendering, navigation, and submits
[POS]:    TUI app state and screen/tab management
[UPDATE]: When adding screens, tabs, modals, or submit flows
*/

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use ratatui::widgets::TableState;
use tracing::{info, warn};

use myattire_adapter::{
    CreateSectorRequest, MyAttireClient, RegisterUserRequest, Result as ApiResult, Role, Sector,
    Task, TaskPayload, TaskStatus, TaskUpdate, User,
};

use crate::filters::{TaskCounts, TaskFilters};
use crate::forms::{LoginForm, PasswordForm};
use crate::session_store::SessionStore;
use crate::tui::LogBufferHandle;
use crate::tui::ui::modal::{
    ConfirmDeleteModal, PasswordFormModal, SectorFormModal, TaskFormModal, UserFormModal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Screen {
    Login,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Painel,
    Tarefas,
    Usuarios,
    Setores,
    MinhasTarefas,
    Logs,
}

impl Tab {
    pub(super) fn title(&self) -> &'static str {
        match self {
            Tab::Painel => "Painel",
            Tab::Tarefas => "Tarefas",
            Tab::Usuarios => "Usuários",
            Tab::Setores => "Setores",
            Tab::MinhasTarefas => "Minhas Tarefas",
            Tab::Logs => "Logs",
        }
    }

    /// Tabs a signed-in user is allowed to see. Management tabs only ever
    /// exist for admins; everyone gets the log view.
    pub(super) fn tabs_for(role: Role) -> &'static [Tab] {
        match role {
            Role::Admin => &[
                Tab::Painel,
                Tab::Tarefas,
                Tab::Usuarios,
                Tab::Setores,
                Tab::Logs,
            ],
            Role::Funcionario => &[Tab::MinhasTarefas, Tab::Logs],
        }
    }
}

pub(super) enum ActiveModal {
    TaskForm(TaskFormModal),
    UserForm(UserFormModal),
    SectorForm(SectorFormModal),
    PasswordForm(PasswordFormModal),
    ConfirmDelete(ConfirmDeleteModal),
}

/// A status change already painted on screen but not yet confirmed by the
/// service. Kept so a failed PUT can put the old status back.
pub(super) struct PendingStatusChange {
    pub(super) task_id: i64,
    pub(super) previous: TaskStatus,
    pub(super) applied: TaskStatus,
}

pub(super) struct LoginScreen {
    pub(super) form: LoginForm,
    pub(super) focus: usize,
    pub(super) errors: Vec<crate::forms::FieldError>,
    pub(super) notice: Option<String>,
}

impl LoginScreen {
    pub(super) fn new() -> Self {
        Self {
            form: LoginForm::default(),
            focus: 0,
            errors: Vec::new(),
            notice: None,
        }
    }
}

pub(super) struct UiSnapshot {
    pub(super) tasks: Vec<Task>,
    pub(super) counts: TaskCounts,
    pub(super) now: DateTime<Utc>,
}

pub(super) struct AppState {
    pub(super) client: MyAttireClient,
    pub(super) store: SessionStore,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) screen: Screen,
    pub(super) current_tab: Tab,
    pub(super) login: LoginScreen,
    pub(super) tasks: Vec<Task>,
    pub(super) users: Vec<User>,
    pub(super) sectors: Vec<Sector>,
    pub(super) filters: TaskFilters,
    pub(super) editing_busca: bool,
    pub(super) table_state: TableState,
    pub(super) status_message: String,
    pub(super) last_refresh: Instant,
    pub(super) active_modal: Option<ActiveModal>,
    pub(super) pending_status: Option<PendingStatusChange>,
}

impl AppState {
    pub(super) fn new(
        client: MyAttireClient,
        store: SessionStore,
        log_buffer: LogBufferHandle,
    ) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        let screen = if client.session().is_authenticated() {
            Screen::Main
        } else {
            Screen::Login
        };
        Self {
            client,
            store,
            log_buffer,
            screen,
            current_tab: Tab::Painel,
            login: LoginScreen::new(),
            tasks: Vec::new(),
            users: Vec::new(),
            sectors: Vec::new(),
            filters: TaskFilters::default(),
            editing_busca: false,
            table_state,
            status_message: "Pronto".to_string(),
            last_refresh: Instant::now() - Duration::from_secs(10),
            active_modal: None,
            pending_status: None,
        }
    }

    pub(super) fn current_role(&self) -> Role {
        self.client.session().role().unwrap_or_default()
    }

    pub(super) fn is_admin(&self) -> bool {
        self.client.session().is_admin()
    }

    pub(super) fn current_user(&self) -> Option<User> {
        self.client.session().current_user()
    }

    pub(super) fn visible_tabs(&self) -> &'static [Tab] {
        Tab::tabs_for(self.current_role())
    }

    /// Tasks the current tab shows, with the active filters applied.
    pub(super) fn visible_tasks(&self) -> Vec<Task> {
        self.filters.apply(&self.tasks)
    }

    pub(super) fn selected_task(&self) -> Option<Task> {
        let idx = self.table_state.selected().unwrap_or(0);
        self.visible_tasks().into_iter().nth(idx)
    }

    fn current_row_count(&self) -> usize {
        match self.current_tab {
            Tab::Tarefas | Tab::MinhasTarefas => self.visible_tasks().len(),
            Tab::Usuarios => self.users.len(),
            Tab::Setores => self.sectors.len(),
            Tab::Painel | Tab::Logs => 0,
        }
    }

    pub(super) fn next_tab(&mut self) {
        let tabs = self.visible_tabs();
        let current = tabs
            .iter()
            .position(|tab| *tab == self.current_tab)
            .unwrap_or(0);
        self.set_tab(tabs[(current + 1) % tabs.len()]);
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        if self.visible_tabs().contains(&tab) {
            self.current_tab = tab;
            self.table_state.select(Some(0));
        }
    }

    /// Digit hotkeys address tabs by their position in the visible set, so
    /// the same keys work for both roles.
    pub(super) fn set_tab_index(&mut self, index: usize) {
        if let Some(tab) = self.visible_tabs().get(index).copied() {
            self.set_tab(tab);
        }
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let count = self.current_row_count();
        if count == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (count - 1) as isize) as usize;
        self.table_state.select(Some(next));
    }

    pub(super) fn clamp_selection(&mut self) {
        let count = self.current_row_count();
        if count == 0 {
            self.table_state.select(None);
        } else {
            let current = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(current.min(count - 1)));
        }
    }

    pub(super) fn build_snapshot(&self) -> UiSnapshot {
        let now = Utc::now();
        UiSnapshot {
            tasks: self.visible_tasks(),
            counts: TaskCounts::tally(&self.tasks, now),
            now,
        }
    }

    // --- login and session lifecycle ---

    pub(super) async fn submit_login(&mut self) {
        let request = match self.login.form.validate() {
            Ok(request) => request,
            Err(errors) => {
                self.login.errors = errors;
                return;
            }
        };
        self.login.errors.clear();

        match self.client.login(&request.email, &request.senha).await {
            Ok(response) => {
                if let Err(err) = self.store.save_from(self.client.session()).await {
                    warn!("could not persist session: {err}");
                }
                self.login = LoginScreen::new();
                self.status_message = response.message;
                self.enter_main().await;
            }
            Err(err) => {
                self.login.notice = Some(err.to_string());
            }
        }
    }

    pub(super) async fn enter_main(&mut self) {
        if self.current_role() == Role::Funcionario {
            let nome = self
                .current_user()
                .map(|user| user.nome)
                .unwrap_or_default();
            self.filters = TaskFilters::for_funcionario(&nome);
        } else {
            self.filters = TaskFilters::default();
        }
        self.screen = Screen::Main;
        self.current_tab = self.visible_tabs()[0];
        self.table_state.select(Some(0));
        if let Err(err) = self.refresh_all().await {
            if err.is_auth_error() {
                self.handle_auth_failure().await;
            } else {
                self.status_message = format!("Falha ao carregar dados: {err}");
            }
        }
    }

    pub(super) async fn sign_out(&mut self) {
        self.client.logout();
        if let Err(err) = self.store.clear().await {
            warn!("could not remove persisted session: {err}");
        }
        self.active_modal = None;
        self.pending_status = None;
        self.editing_busca = false;
        self.login = LoginScreen::new();
        self.screen = Screen::Login;
        info!("signed out");
    }

    /// The service stopped accepting our token (or the local clock ran past
    /// its lifetime). Drop everything session-bound and fall back to login.
    pub(super) async fn handle_auth_failure(&mut self) {
        self.sign_out().await;
        self.login.notice = Some("Sessão expirada. Entre novamente.".to_string());
    }

    // --- modal lifecycle ---

    pub(super) fn close_modal(&mut self) {
        self.active_modal = None;
    }

    pub(super) fn active_modal_mut(&mut self) -> Option<&mut ActiveModal> {
        self.active_modal.as_mut()
    }

    pub(super) fn open_create_task(&mut self) {
        let sectors = self.sector_names();
        let users = self.user_names();
        self.active_modal = Some(ActiveModal::TaskForm(TaskFormModal::create(sectors, users)));
    }

    pub(super) fn open_edit_task(&mut self) {
        let Some(task) = self.selected_task() else {
            self.status_message = "Nenhuma tarefa selecionada".to_string();
            return;
        };
        let sectors = self.sector_names();
        let users = self.user_names();
        self.active_modal = Some(ActiveModal::TaskForm(TaskFormModal::edit(
            &task, sectors, users,
        )));
    }

    pub(super) fn open_confirm_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            self.status_message = "Nenhuma tarefa selecionada".to_string();
            return;
        };
        let Some(id) = task.id else {
            self.status_message = "Tarefa sem identificador".to_string();
            return;
        };
        self.active_modal = Some(ActiveModal::ConfirmDelete(ConfirmDeleteModal::new(
            id,
            task.titulo.clone(),
        )));
    }

    pub(super) fn open_create_user(&mut self) {
        let sectors = self.sector_names();
        self.active_modal = Some(ActiveModal::UserForm(UserFormModal::new(sectors)));
    }

    pub(super) fn open_create_sector(&mut self) {
        self.active_modal = Some(ActiveModal::SectorForm(SectorFormModal::new()));
    }

    pub(super) fn open_change_password(&mut self) {
        self.active_modal = Some(ActiveModal::PasswordForm(PasswordFormModal::new()));
    }

    fn sector_names(&self) -> Vec<String> {
        self.sectors.iter().map(|s| s.nome.clone()).collect()
    }

    fn user_names(&self) -> Vec<String> {
        self.users.iter().map(|u| u.nome.clone()).collect()
    }

    // --- submit flows ---

    pub(super) async fn submit_create_task(&mut self, payload: TaskPayload) -> ApiResult<String> {
        let response = self.client.create_task(&payload).await?;
        info!(titulo = %payload.titulo, "task created");
        self.refresh_tasks().await?;
        Ok(response.message)
    }

    pub(super) async fn submit_update_task(
        &mut self,
        id: i64,
        update: TaskUpdate,
    ) -> ApiResult<String> {
        let response = self.client.update_task(id, &update).await?;
        info!(id, "task updated");
        self.refresh_tasks().await?;
        Ok(response.message)
    }

    pub(super) async fn submit_delete_task(&mut self, id: i64) -> ApiResult<String> {
        let response = self.client.delete_task(id).await?;
        info!(id, "task deleted");
        self.refresh_tasks().await?;
        Ok(response.message)
    }

    pub(super) async fn submit_create_user(
        &mut self,
        request: RegisterUserRequest,
    ) -> ApiResult<String> {
        let response = self.client.register_user(&request).await?;
        info!(email = %request.email, "user registered");
        self.refresh_users().await?;
        Ok(response.message)
    }

    pub(super) async fn submit_create_sector(
        &mut self,
        request: CreateSectorRequest,
    ) -> ApiResult<String> {
        let response = self.client.create_sector(&request).await?;
        info!(nome = %request.nome, "sector created");
        self.refresh_sectors().await?;
        Ok(response.message)
    }

    /// The login echo carries no id, so the password route needs a lookup
    /// by email first.
    pub(super) async fn submit_change_password(&mut self, form: PasswordForm) -> ApiResult<String> {
        let Some(usuario) = self.current_user() else {
            return Err(myattire_adapter::MyAttireError::SessionExpired);
        };
        let record = self.client.find_user_by_email(&usuario.email).await?;
        let Some(id) = record.id else {
            return Err(myattire_adapter::MyAttireError::InvalidResponse(
                "usuário sem id no cadastro".to_string(),
            ));
        };
        let request = form.to_request(id, &usuario.email);
        let response = self.client.update_password(&request).await?;
        info!(email = %usuario.email, "password changed");
        Ok(response.message)
    }

    // --- optimistic status updates ---

    /// Paint the next status locally and remember the old one. The PUT is
    /// sent by `finish_status_change` after the frame is drawn.
    pub(super) fn begin_status_cycle(&mut self) {
        let Some(task) = self.selected_task() else {
            self.status_message = "Nenhuma tarefa selecionada".to_string();
            return;
        };
        self.stage_status_change(&task, task.status.next());
    }

    /// Employees only ever move their own task to done.
    pub(super) fn begin_complete_task(&mut self) {
        let Some(task) = self.selected_task() else {
            self.status_message = "Nenhuma tarefa selecionada".to_string();
            return;
        };
        if task.status == TaskStatus::Concluida {
            self.status_message = "Tarefa já concluída".to_string();
            return;
        }
        self.stage_status_change(&task, TaskStatus::Concluida);
    }

    fn stage_status_change(&mut self, task: &Task, next: TaskStatus) {
        if self.pending_status.is_some() {
            self.status_message = "Aguarde a atualização anterior".to_string();
            return;
        }
        let Some(id) = task.id else {
            self.status_message = "Tarefa sem identificador".to_string();
            return;
        };
        let previous = task.status;
        self.apply_local_status(id, next);
        self.pending_status = Some(PendingStatusChange {
            task_id: id,
            previous,
            applied: next,
        });
        self.status_message = format!("Atualizando \"{}\"...", task.titulo);
    }

    pub(super) fn apply_local_status(&mut self, id: i64, status: TaskStatus) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == Some(id)) {
            task.status = status;
        }
    }

    /// Confirm the staged change with the service, rolling the local row
    /// back when the PUT fails.
    pub(super) async fn finish_status_change(&mut self) {
        let Some(pending) = self.pending_status.take() else {
            return;
        };
        match self
            .client
            .set_task_status(pending.task_id, pending.applied)
            .await
        {
            Ok(response) => {
                if let Some(task) = self
                    .tasks
                    .iter_mut()
                    .find(|task| task.id == Some(pending.task_id))
                {
                    *task = response.tarefa;
                }
                self.status_message = response.message;
            }
            Err(err) => {
                self.apply_local_status(pending.task_id, pending.previous);
                warn!(id = pending.task_id, "status update rolled back: {err}");
                if err.is_auth_error() {
                    self.handle_auth_failure().await;
                } else {
                    self.status_message = format!("Falha ao atualizar status: {err}");
                }
            }
        }
    }
}
