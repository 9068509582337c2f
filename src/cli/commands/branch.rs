use crate::api::models::{BranchType, CreateBranchInput};
use crate::api::{ApiClient, ApiError};
use crate::cli::output::{OutputMode, Report, render_json};
use anyhow::{Result, bail};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct BranchCommands {
    #[command(subcommand)]
    pub command: BranchSubcommands,
}

#[derive(Subcommand)]
pub enum BranchSubcommands {
    /// Create a new branch in a project
    Create(CreateBranchArgs),
    /// List the branches of a project
    List(ListBranchesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateBranchArgs {
    /// Project name or ID
    #[arg(long)]
    pub project: String,
    /// Name of the new branch
    #[arg(long)]
    pub name: String,
    /// Branch type: MAIN, CHANGE_REQUEST or RELEASE
    #[arg(long = "type")]
    pub branch_type: String,
    /// Print only key=value lines for GitHub Actions
    #[arg(long)]
    pub github: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListBranchesArgs {
    /// Project name or ID
    #[arg(long)]
    pub project: String,
}

pub async fn handle(command: BranchCommands, client: &ApiClient) -> Result<String> {
    match command.command {
        BranchSubcommands::Create(args) => create(client, args).await,
        BranchSubcommands::List(args) => list(client, args).await,
    }
}

pub async fn create(client: &ApiClient, args: CreateBranchArgs) -> Result<String> {
    // Validate everything local before the first request
    let branch_type: BranchType = args.branch_type.parse().map_err(ApiError::Config)?;
    if args.name.is_empty() {
        bail!("empty branch name");
    }

    let project_id = client.resolve_project(&args.project).await?;
    let branch = client
        .create_branch(
            project_id,
            &CreateBranchInput {
                name: args.name,
                branch_type,
            },
        )
        .await?;

    Ok(Report::new("Created branch successfully!")
        .field("branch_id", "Branch ID", branch.branch_id)
        .render(OutputMode::from_flag(args.github)))
}

pub async fn list(client: &ApiClient, args: ListBranchesArgs) -> Result<String> {
    let project_id = client.resolve_project(&args.project).await?;
    let branches = client.list_all_branches(project_id).await?;
    render_json(&branches)
}
