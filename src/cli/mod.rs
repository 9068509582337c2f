pub mod app;
pub mod commands;
pub mod output;

pub use app::{Cli, Commands};

use crate::api::ApiClient;
use crate::config::Config;
use anyhow::Result;

/// Resolve configuration, run the command, and persist the token it used.
///
/// The token cache is written even when the command fails, so a token that
/// was already paid for is reused by the next invocation.
pub async fn run(cli: Cli) -> Result<String> {
    let config = Config::resolve(&cli.global)?;
    execute(cli.command, &config).await
}

pub async fn execute(command: Commands, config: &Config) -> Result<String> {
    let client = ApiClient::new(config)?;
    let result = commands::dispatch(command, &client).await;
    client.save_credentials().await;
    result
}
