use crate::api::models::CreateLogInput;
use crate::api::{ApiClient, JobRef};
use crate::cli::output::{OutputMode, Report, render_json};
use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use uuid::Uuid;

#[derive(Args)]
pub struct LogsCommands {
    #[command(subcommand)]
    pub command: LogsSubcommands,
}

#[derive(Subcommand)]
pub enum LogsSubcommands {
    /// Register a log file for a job
    Create(CreateLogArgs),
    /// List the logs of a job
    List(ListLogsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Project name or ID
    #[arg(long)]
    pub project: String,
    /// Batch ID
    #[arg(long)]
    pub batch_id: Uuid,
    /// Job ID
    #[arg(long)]
    pub job_id: Uuid,
}

#[derive(Args, Debug, Clone)]
pub struct CreateLogArgs {
    #[command(flatten)]
    pub job: JobArgs,
    /// File name of the log
    #[arg(long)]
    pub name: String,
    /// Size of the log file in bytes
    #[arg(long)]
    pub file_size: u64,
    /// Checksum of the log file
    #[arg(long)]
    pub checksum: String,
    /// Print only key=value lines for GitHub Actions
    #[arg(long)]
    pub github: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListLogsArgs {
    #[command(flatten)]
    pub job: JobArgs,
}

pub async fn handle(command: LogsCommands, client: &ApiClient) -> Result<String> {
    match command.command {
        LogsSubcommands::Create(args) => create(client, args).await,
        LogsSubcommands::List(args) => list(client, args).await,
    }
}

async fn job_ref(client: &ApiClient, job: &JobArgs) -> Result<JobRef> {
    Ok(JobRef {
        project_id: client.resolve_project(&job.project).await?,
        batch_id: job.batch_id,
        job_id: job.job_id,
    })
}

pub async fn create(client: &ApiClient, args: CreateLogArgs) -> Result<String> {
    if args.name.is_empty() {
        bail!("empty log file name");
    }
    if args.checksum.is_empty() {
        bail!("empty log checksum");
    }

    let job = job_ref(client, &args.job).await?;
    let log = client
        .create_log(
            job,
            &CreateLogInput {
                file_name: args.name,
                file_size: args.file_size,
                checksum: args.checksum,
            },
        )
        .await?;

    Ok(Report::new("Created log successfully!")
        .field("log_id", "Log ID", log.log_id)
        .field("log_location", "Upload location", log.location)
        .render(OutputMode::from_flag(args.github)))
}

pub async fn list(client: &ApiClient, args: ListLogsArgs) -> Result<String> {
    let job = job_ref(client, &args.job).await?;
    let logs = client.list_all_logs(job).await?;
    render_json(&logs)
}
