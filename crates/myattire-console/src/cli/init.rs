/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When ConsoleConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::path::PathBuf;

use crate::config::{ApiConfig, ConsoleConfig, LogConfig, UiConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Bem-vindo ao My Attire Console").bold().cyan());
    println!(
        "{}",
        style("Este assistente gera um novo arquivo de configuração.").dim()
    );

    let theme = ColorfulTheme::default();

    let base_url: String = Input::with_theme(&theme)
        .with_prompt("URL do serviço")
        .default("http://localhost:5050".to_string())
        .interact_text()?;

    let timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Timeout de requisição (segundos)")
        .default(30)
        .interact_text()?;

    let connect_timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Timeout de conexão (segundos)")
        .default(10)
        .interact_text()?;

    println!("\n{}", style("--- Logs ---").bold());
    let levels = vec!["info", "debug", "warn", "error"];
    let level_selection = Select::with_theme(&theme)
        .with_prompt("Nível de log")
        .items(&levels)
        .default(0)
        .interact()?;
    let level = levels[level_selection].to_string();

    let log_file: String = Input::with_theme(&theme)
        .with_prompt("Arquivo de log (vazio para nenhum)")
        .allow_empty(true)
        .interact_text()?;
    let file = {
        let trimmed = log_file.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    println!("\n{}", style("--- Interface ---").bold());
    let tick_ms: u64 = Input::with_theme(&theme)
        .with_prompt("Intervalo de redesenho (ms)")
        .default(250)
        .interact_text()?;

    let config = ConsoleConfig {
        api: ApiConfig {
            base_url,
            timeout_secs,
            connect_timeout_secs,
        },
        log: LogConfig { level, file },
        ui: UiConfig { tick_ms },
    };

    let yaml = serde_yaml::to_string(&config).context("failed to serialize config to YAML")?;

    std::fs::write(&output, yaml)
        .context(format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("PRONTO!").bold().green());
    println!(
        "Configuração gravada em: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
