use crate::api::ApiClient;
use crate::cli::output::{OutputMode, Report};
use crate::metrics::{self, DEFAULT_CONFIG_PATH, DEFAULT_TEMPLATES_DIR};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct MetricsCommands {
    #[command(subcommand)]
    pub command: MetricsSubcommands,
}

#[derive(Subcommand)]
pub enum MetricsSubcommands {
    /// Upload the local metrics config and templates to a project
    Sync(SyncMetricsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SyncMetricsArgs {
    /// Project name or ID
    #[arg(long)]
    pub project: String,
    /// Metrics config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config_file: PathBuf,
    /// Directory of metrics templates
    #[arg(long, default_value = DEFAULT_TEMPLATES_DIR)]
    pub templates_dir: PathBuf,
    /// Print only key=value lines for GitHub Actions
    #[arg(long)]
    pub github: bool,
}

pub async fn handle(command: MetricsCommands, client: &ApiClient) -> Result<String> {
    match command.command {
        MetricsSubcommands::Sync(args) => sync(client, args).await,
    }
}

pub async fn sync(client: &ApiClient, args: SyncMetricsArgs) -> Result<String> {
    // Read local files first so a bad path fails before any request
    let input = metrics::load(&args.config_file, &args.templates_dir)?;
    let template_count = input.templates.len();

    let project_id = client.resolve_project(&args.project).await?;
    client.sync_metrics_config(project_id, &input).await?;

    Ok(Report::new("Synced metrics config successfully!")
        .field("project_id", "Project ID", project_id)
        .field("templates", "Templates", template_count)
        .render(OutputMode::from_flag(args.github)))
}
