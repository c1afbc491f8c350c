/*
[INPUT]:  Parsed flags and a configured API client
[OUTPUT]: Plain-terminal flows for setup, diagnostics, and management
[POS]:    CLI module for the myattire-console binary
[UPDATE]: When adding new CLI flows
*/

pub mod init;
pub mod interactive;

use anyhow::Result;
use console::style;

use myattire_adapter::MyAttireClient;

/// Probe the configured service and report whether it answers. An auth
/// rejection still proves the service is reachable.
pub async fn run_check(client: &MyAttireClient) -> Result<()> {
    println!(
        "{} {}",
        style("Verificando serviço em").dim(),
        style(client.base_url()).cyan()
    );

    match client.list_sectors().await {
        Ok(sectors) => {
            println!(
                "{} {} setores cadastrados",
                style("OK").bold().green(),
                sectors.len()
            );
            Ok(())
        }
        Err(err) if err.is_auth_error() => {
            println!(
                "{} serviço no ar, autenticação necessária",
                style("OK").bold().green()
            );
            Ok(())
        }
        Err(err) => {
            println!("{} {}", style("FALHA").bold().red(), err);
            anyhow::bail!("service check failed: {err}")
        }
    }
}
