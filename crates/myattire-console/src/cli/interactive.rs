/*
[INPUT]:  Terminal prompts and the remote task service
[OUTPUT]: Task, user, and sector management over plain stdio
[POS]:    CLI interactive flow, fallback for terminals without TUI support
[UPDATE]: When adding new menu actions
*/

use anyhow::Result;
use chrono::Utc;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use tracing::warn;

use myattire_adapter::{
    CreateSectorRequest, MyAttireClient, MyAttireError, Priority, RegisterUserRequest, Role, Task,
    TaskPayload, TaskStatus, TaskUpdate,
};

use crate::filters::{TaskCounts, TaskFilters};
use crate::forms::{self, PasswordForm};
use crate::session_store::SessionStore;

pub async fn run_interactive(client: MyAttireClient, store: SessionStore) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("My Attire Console").bold().cyan());

    loop {
        if !client.session().is_authenticated() {
            if !login_prompt(&client, &store, &theme).await? {
                return Ok(());
            }
        }

        let quit = if client.session().is_admin() {
            admin_menu(&client, &store, &theme).await?
        } else {
            employee_menu(&client, &store, &theme).await?
        };
        if quit {
            return Ok(());
        }
    }
}

/// Ask for credentials until a login succeeds or the operator gives up.
/// Returns false when they give up.
async fn login_prompt(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<bool> {
    println!("{}", style("Entre com sua conta").bold());

    loop {
        let email: String = Input::with_theme(theme)
            .with_prompt("Email")
            .validate_with(|input: &String| -> Result<(), &str> {
                if forms::looks_like_email(input.trim()) {
                    Ok(())
                } else {
                    Err("Email inválido")
                }
            })
            .interact_text()?;

        let senha = Password::with_theme(theme).with_prompt("Senha").interact()?;

        match client.login(email.trim(), &senha).await {
            Ok(response) => {
                if let Err(err) = store.save_from(client.session()).await {
                    warn!(error = %err, "failed to persist session");
                }
                println!("{}", style(response.message).green());
                println!(
                    "Olá, {} ({})",
                    style(&response.usuario.nome).bold(),
                    response.usuario.perfil.label()
                );
                return Ok(true);
            }
            Err(err) => {
                println!("{} {}", style("Falha no login:").bold().red(), err);
                let retry = Confirm::with_theme(theme)
                    .with_prompt("Tentar novamente?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Ok(false);
                }
            }
        }
    }
}

async fn admin_menu(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<bool> {
    let actions = vec![
        "Listar tarefas",
        "Criar tarefa",
        "Editar tarefa",
        "Alterar status de tarefa",
        "Excluir tarefa",
        "Listar usuários",
        "Cadastrar usuário",
        "Listar setores",
        "Criar setor",
        "Alterar senha",
        "Sair da conta",
        "Sair",
    ];
    let selection = Select::with_theme(theme)
        .with_prompt("Escolha uma ação")
        .items(&actions)
        .default(0)
        .interact()?;

    match selection {
        0 => list_tasks(client, store).await?,
        1 => create_task(client, store, theme).await?,
        2 => edit_task(client, store, theme).await?,
        3 => change_status(client, store, theme).await?,
        4 => delete_task(client, store, theme).await?,
        5 => list_users(client, store).await?,
        6 => create_user(client, store, theme).await?,
        7 => list_sectors(client, store).await?,
        8 => create_sector(client, store, theme).await?,
        9 => change_password(client, store, theme).await?,
        10 => sign_out(client, store).await,
        _ => return Ok(true),
    }
    Ok(false)
}

async fn employee_menu(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<bool> {
    let actions = vec![
        "Minhas tarefas",
        "Concluir tarefa",
        "Alterar senha",
        "Sair da conta",
        "Sair",
    ];
    let selection = Select::with_theme(theme)
        .with_prompt("Escolha uma ação")
        .items(&actions)
        .default(0)
        .interact()?;

    match selection {
        0 => my_tasks(client, store).await?,
        1 => complete_task(client, store, theme).await?,
        2 => change_password(client, store, theme).await?,
        3 => sign_out(client, store).await,
        _ => return Ok(true),
    }
    Ok(false)
}

/// Print an API failure. A rejected token also drops the local session so
/// the outer loop asks for a new login.
async fn report_api_error(client: &MyAttireClient, store: &SessionStore, err: &MyAttireError) {
    if err.is_auth_error() {
        client.logout();
        if let Err(store_err) = store.clear().await {
            warn!(error = %store_err, "failed to clear persisted session");
        }
        println!("{}", style("Sessão expirada. Entre novamente.").yellow());
    } else {
        println!("{} {}", style("Erro:").bold().red(), err);
    }
}

async fn sign_out(client: &MyAttireClient, store: &SessionStore) {
    client.logout();
    if let Err(err) = store.clear().await {
        warn!(error = %err, "failed to clear persisted session");
    }
    println!("{}", style("Sessão encerrada.").yellow());
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", style("Nenhuma tarefa encontrada").yellow());
        return;
    }

    let now = Utc::now();
    for task in tasks {
        let prazo = if task.prazo.is_some() {
            forms::format_prazo(task.prazo)
        } else {
            "-".to_string()
        };
        let atrasada = if task.is_overdue(now) {
            format!(" {}", style("ATRASADA").red().bold())
        } else {
            String::new()
        };
        println!(
            "- #{} {} | {} / {} | prazo {} | {} | {}{}",
            task.id.unwrap_or_default(),
            task.titulo,
            task.funcionario,
            task.setor,
            prazo,
            task.prioridade.label(),
            task.status.label(),
            atrasada
        );
    }

    let counts = TaskCounts::tally(tasks, now);
    println!(
        "{}",
        style(format!(
            "{} no total: {} pendentes, {} em andamento, {} concluídas, {} atrasadas",
            counts.total, counts.pendente, counts.em_andamento, counts.concluida, counts.atrasadas
        ))
        .dim()
    );
}

/// Fetch tasks and prompt for one. Rows without an id cannot be acted on
/// and are left out.
async fn select_task(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
    prompt: &str,
    only_mine: bool,
) -> Result<Option<Task>> {
    let tasks = match client.list_tasks().await {
        Ok(tasks) => tasks,
        Err(err) => {
            report_api_error(client, store, &err).await;
            return Ok(None);
        }
    };

    let tasks = if only_mine {
        match client.session().current_user() {
            Some(user) => TaskFilters::for_funcionario(user.nome).apply(&tasks),
            None => Vec::new(),
        }
    } else {
        tasks
    };

    let tasks: Vec<Task> = tasks.into_iter().filter(|task| task.id.is_some()).collect();
    if tasks.is_empty() {
        println!("{}", style("Nenhuma tarefa encontrada").yellow());
        return Ok(None);
    }

    let items: Vec<String> = tasks
        .iter()
        .map(|task| {
            format!(
                "#{} {} | {} | {}",
                task.id.unwrap_or_default(),
                task.titulo,
                task.funcionario,
                task.status.label()
            )
        })
        .collect();
    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Some(tasks[selection].clone()))
}

fn select_priority(theme: &ColorfulTheme, current: Priority) -> Result<Priority> {
    let labels: Vec<&str> = Priority::ALL.iter().map(|p| p.label()).collect();
    let default = Priority::ALL.iter().position(|p| *p == current).unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt("Prioridade")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(Priority::ALL[index])
}

fn select_status(theme: &ColorfulTheme, prompt: &str, current: TaskStatus) -> Result<TaskStatus> {
    let labels: Vec<&str> = TaskStatus::ALL.iter().map(|s| s.label()).collect();
    let default = TaskStatus::ALL
        .iter()
        .position(|s| *s == current)
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(TaskStatus::ALL[index])
}

fn required(message: &'static str) -> impl FnMut(&String) -> Result<(), &'static str> {
    move |input: &String| {
        if input.trim().is_empty() {
            Err(message)
        } else {
            Ok(())
        }
    }
}

async fn list_tasks(client: &MyAttireClient, store: &SessionStore) -> Result<()> {
    match client.list_tasks().await {
        Ok(tasks) => print_tasks(&tasks),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn my_tasks(client: &MyAttireClient, store: &SessionStore) -> Result<()> {
    let Some(user) = client.session().current_user() else {
        report_api_error(client, store, &MyAttireError::SessionExpired).await;
        return Ok(());
    };

    match client.list_tasks().await {
        Ok(tasks) => print_tasks(&TaskFilters::for_funcionario(user.nome).apply(&tasks)),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn create_task(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<()> {
    let sectors = match client.list_sectors().await {
        Ok(sectors) => sectors,
        Err(err) => {
            report_api_error(client, store, &err).await;
            return Ok(());
        }
    };
    if sectors.is_empty() {
        println!(
            "{}",
            style("Nenhum setor cadastrado. Crie um setor primeiro.").yellow()
        );
        return Ok(());
    }

    let users = match client.list_users().await {
        Ok(users) => users,
        Err(err) => {
            report_api_error(client, store, &err).await;
            return Ok(());
        }
    };
    if users.is_empty() {
        println!(
            "{}",
            style("Nenhum usuário cadastrado. Cadastre um usuário primeiro.").yellow()
        );
        return Ok(());
    }

    println!("{}", style("Nova tarefa").bold());

    let titulo: String = Input::with_theme(theme)
        .with_prompt("Título")
        .validate_with(required("Título é obrigatório"))
        .interact_text()?;

    let descricao: String = Input::with_theme(theme)
        .with_prompt("Descrição")
        .validate_with(required("Descrição é obrigatória"))
        .interact_text()?;

    let sector_names: Vec<String> = sectors.iter().map(|sector| sector.nome.clone()).collect();
    let sector_index = Select::with_theme(theme)
        .with_prompt("Setor")
        .items(&sector_names)
        .default(0)
        .interact()?;
    let setor = sector_names[sector_index].clone();

    let user_names: Vec<String> = users.iter().map(|user| user.nome.clone()).collect();
    let user_index = Select::with_theme(theme)
        .with_prompt("Funcionário responsável")
        .items(&user_names)
        .default(0)
        .interact()?;
    let funcionario = user_names[user_index].clone();

    let prazo_raw: String = Input::with_theme(theme)
        .with_prompt("Prazo (AAAA-MM-DD HH:MM)")
        .validate_with(
            |input: &String| -> Result<(), &str> {
                match forms::parse_prazo(input) {
                    Some(_) => Ok(()),
                    None => Err("Prazo inválido (use AAAA-MM-DD HH:MM)"),
                }
            },
        )
        .interact_text()?;

    let prioridade = select_priority(theme, Priority::default())?;

    let payload = TaskPayload {
        titulo: titulo.trim().to_string(),
        descricao: descricao.trim().to_string(),
        funcionario,
        setor,
        prazo: forms::parse_prazo(&prazo_raw),
        prioridade,
        status: TaskStatus::Pendente,
    };

    match client.create_task(&payload).await {
        Ok(response) => println!("{}", style(response.message).green()),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn edit_task(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(task) =
        select_task(client, store, theme, "Selecione a tarefa para editar", false).await?
    else {
        return Ok(());
    };
    let Some(id) = task.id else {
        return Ok(());
    };

    let sectors = match client.list_sectors().await {
        Ok(sectors) => sectors,
        Err(err) => {
            report_api_error(client, store, &err).await;
            return Ok(());
        }
    };
    let users = match client.list_users().await {
        Ok(users) => users,
        Err(err) => {
            report_api_error(client, store, &err).await;
            return Ok(());
        }
    };

    println!("{}", style("Editar tarefa").bold());

    let titulo: String = Input::with_theme(theme)
        .with_prompt("Título")
        .default(task.titulo.clone())
        .validate_with(required("Título é obrigatório"))
        .interact_text()?;

    let descricao: String = Input::with_theme(theme)
        .with_prompt("Descrição")
        .default(task.descricao.clone())
        .validate_with(required("Descrição é obrigatória"))
        .interact_text()?;

    // Keep the stored sector selectable even when it no longer exists
    let mut sector_names: Vec<String> = sectors.iter().map(|sector| sector.nome.clone()).collect();
    if !sector_names.iter().any(|name| name == &task.setor) {
        sector_names.push(task.setor.clone());
    }
    let sector_default = sector_names
        .iter()
        .position(|name| name == &task.setor)
        .unwrap_or(0);
    let sector_index = Select::with_theme(theme)
        .with_prompt("Setor")
        .items(&sector_names)
        .default(sector_default)
        .interact()?;
    let setor = sector_names[sector_index].clone();

    let mut user_names: Vec<String> = users.iter().map(|user| user.nome.clone()).collect();
    if !user_names.iter().any(|name| name == &task.funcionario) {
        user_names.push(task.funcionario.clone());
    }
    let user_default = user_names
        .iter()
        .position(|name| name == &task.funcionario)
        .unwrap_or(0);
    let user_index = Select::with_theme(theme)
        .with_prompt("Funcionário responsável")
        .items(&user_names)
        .default(user_default)
        .interact()?;
    let funcionario = user_names[user_index].clone();

    let prazo_raw: String = Input::with_theme(theme)
        .with_prompt("Prazo (AAAA-MM-DD HH:MM)")
        .default(forms::format_prazo(task.prazo))
        .validate_with(
            |input: &String| -> Result<(), &str> {
                match forms::parse_prazo(input) {
                    Some(_) => Ok(()),
                    None => Err("Prazo inválido (use AAAA-MM-DD HH:MM)"),
                }
            },
        )
        .interact_text()?;

    let prioridade = select_priority(theme, task.prioridade)?;
    let status = select_status(theme, "Status", task.status)?;

    let update = TaskUpdate {
        titulo: Some(titulo.trim().to_string()),
        descricao: Some(descricao.trim().to_string()),
        funcionario: Some(funcionario),
        setor: Some(setor),
        prazo: forms::parse_prazo(&prazo_raw),
        prioridade: Some(prioridade),
        status: Some(status),
    };

    match client.update_task(id, &update).await {
        Ok(response) => println!("{}", style(response.message).green()),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn change_status(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(task) = select_task(client, store, theme, "Selecione a tarefa", false).await? else {
        return Ok(());
    };
    let Some(id) = task.id else {
        return Ok(());
    };

    let status = select_status(theme, "Novo status", task.status.next())?;

    match client.set_task_status(id, status).await {
        Ok(response) => println!("{}", style(response.message).green()),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn complete_task(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(task) =
        select_task(client, store, theme, "Selecione a tarefa para concluir", true).await?
    else {
        return Ok(());
    };
    if task.status == TaskStatus::Concluida {
        println!("{}", style("Tarefa já concluída").yellow());
        return Ok(());
    }
    let Some(id) = task.id else {
        return Ok(());
    };

    match client.set_task_status(id, TaskStatus::Concluida).await {
        Ok(response) => println!("{}", style(response.message).green()),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn delete_task(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(task) =
        select_task(client, store, theme, "Selecione a tarefa para excluir", false).await?
    else {
        return Ok(());
    };
    let Some(id) = task.id else {
        return Ok(());
    };

    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Excluir a tarefa \"{}\"?", task.titulo))
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    match client.delete_task(id).await {
        Ok(response) => println!("{}", style(response.message).green()),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn list_users(client: &MyAttireClient, store: &SessionStore) -> Result<()> {
    match client.list_users().await {
        Ok(users) => {
            if users.is_empty() {
                println!("{}", style("Nenhum usuário encontrado").yellow());
                return Ok(());
            }
            for user in users {
                let ativo = if user.ativo { "ativo" } else { "inativo" };
                println!(
                    "- {} | {} | {} | {} | {}",
                    user.nome,
                    user.email,
                    user.perfil.label(),
                    user.setor.as_deref().unwrap_or("-"),
                    ativo
                );
            }
        }
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn create_user(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<()> {
    let sectors = match client.list_sectors().await {
        Ok(sectors) => sectors,
        Err(err) => {
            report_api_error(client, store, &err).await;
            return Ok(());
        }
    };

    println!("{}", style("Cadastrar usuário").bold());

    let nome: String = Input::with_theme(theme)
        .with_prompt("Nome")
        .validate_with(required("Nome é obrigatório"))
        .interact_text()?;

    let email: String = Input::with_theme(theme)
        .with_prompt("Email")
        .validate_with(|input: &String| -> Result<(), &str> {
            if forms::looks_like_email(input.trim()) {
                Ok(())
            } else {
                Err("Email inválido")
            }
        })
        .interact_text()?;

    let senha = Password::with_theme(theme)
        .with_prompt("Senha")
        .with_confirmation("Confirme a senha", "As senhas não conferem")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.chars().count() >= 6 {
                Ok(())
            } else {
                Err("Senha deve ter pelo menos 6 caracteres")
            }
        })
        .interact()?;

    let perfis = vec![Role::Funcionario.label(), Role::Admin.label()];
    let perfil_index = Select::with_theme(theme)
        .with_prompt("Perfil")
        .items(&perfis)
        .default(0)
        .interact()?;
    let perfil = if perfil_index == 1 {
        Role::Admin
    } else {
        Role::Funcionario
    };

    let mut sector_items = vec!["(nenhum)".to_string()];
    sector_items.extend(sectors.iter().map(|sector| sector.nome.clone()));
    let sector_index = Select::with_theme(theme)
        .with_prompt("Setor")
        .items(&sector_items)
        .default(0)
        .interact()?;
    let setor = (sector_index > 0).then(|| sector_items[sector_index].clone());

    let ativo = Confirm::with_theme(theme)
        .with_prompt("Usuário ativo?")
        .default(true)
        .interact()?;

    let request = RegisterUserRequest {
        nome: nome.trim().to_string(),
        email: email.trim().to_string(),
        senha,
        perfil,
        setor,
        ativo,
    };

    match client.register_user(&request).await {
        Ok(response) => println!("{}", style(response.message).green()),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn list_sectors(client: &MyAttireClient, store: &SessionStore) -> Result<()> {
    match client.list_sectors().await {
        Ok(sectors) => {
            if sectors.is_empty() {
                println!("{}", style("Nenhum setor encontrado").yellow());
                return Ok(());
            }
            for sector in sectors {
                let ativo = if sector.ativo { "ativo" } else { "inativo" };
                println!("- {} | {}", sector.nome, ativo);
            }
        }
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn create_sector(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<()> {
    println!("{}", style("Novo setor").bold());

    let nome: String = Input::with_theme(theme)
        .with_prompt("Nome do setor")
        .validate_with(required("Nome do setor é obrigatório"))
        .interact_text()?;

    match client
        .create_sector(&CreateSectorRequest::new(nome.trim()))
        .await
    {
        Ok(response) => println!("{}", style(response.message).green()),
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}

async fn change_password(
    client: &MyAttireClient,
    store: &SessionStore,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(user) = client.session().current_user() else {
        report_api_error(client, store, &MyAttireError::SessionExpired).await;
        return Ok(());
    };

    println!("{}", style("Alterar senha").bold());

    let senha_atual = Password::with_theme(theme)
        .with_prompt("Senha atual")
        .interact()?;
    let nova_senha = Password::with_theme(theme)
        .with_prompt("Nova senha")
        .with_confirmation("Confirme a nova senha", "As senhas não conferem")
        .interact()?;

    let form = PasswordForm {
        senha_atual,
        nova_senha,
    };
    if let Err(errors) = form.validate() {
        for error in errors {
            println!("{} {}", style("Erro:").bold().red(), error.message);
        }
        return Ok(());
    }

    // The session user echo has no id, so the full record is looked up first
    let record = match client.find_user_by_email(&user.email).await {
        Ok(record) => record,
        Err(err) => {
            report_api_error(client, store, &err).await;
            return Ok(());
        }
    };
    let Some(id) = record.id else {
        println!(
            "{}",
            style("Cadastro sem identificador; não é possível alterar a senha.").red()
        );
        return Ok(());
    };

    match client.update_password(&form.to_request(id, &user.email)).await {
        Ok(response) => println!("{}", style(response.message).green()),
        // A rejected current password is an ordinary mistake, not a dead session
        Err(MyAttireError::Authentication { message }) => {
            println!("{} {}", style("Erro:").bold().red(), message);
        }
        Err(err) => report_api_error(client, store, &err).await,
    }
    Ok(())
}
