pub mod branch;
pub mod build;
pub mod logs;
pub mod metrics;
pub mod project;

pub use branch::BranchCommands;
pub use build::BuildCommands;
pub use logs::LogsCommands;
pub use metrics::MetricsCommands;
pub use project::ProjectCommands;

use super::app::Commands;
use crate::api::ApiClient;
use anyhow::Result;

/// Run one command and return what it prints on stdout
pub async fn dispatch(command: Commands, client: &ApiClient) -> Result<String> {
    match command {
        Commands::Project(cmd) => project::handle(cmd, client).await,
        Commands::Branch(cmd) => branch::handle(cmd, client).await,
        Commands::Build(cmd) => build::handle(cmd, client).await,
        Commands::Logs(cmd) => logs::handle(cmd, client).await,
        Commands::Metrics(cmd) => metrics::handle(cmd, client).await,
    }
}
