use crate::api::models::{BranchType, CreateBranchInput, CreateBuildInput};
use crate::api::{ApiClient, ApiError};
use crate::cli::output::{OutputMode, Report, render_json};
use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use log::info;
use uuid::Uuid;

#[derive(Args)]
pub struct BuildCommands {
    #[command(subcommand)]
    pub command: BuildSubcommands,
}

#[derive(Subcommand)]
pub enum BuildSubcommands {
    /// Register a new build on a branch
    Create(CreateBuildArgs),
    /// List the builds of a branch
    List(ListBuildsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateBuildArgs {
    /// Project name or ID
    #[arg(long)]
    pub project: String,
    /// Branch name or ID
    #[arg(long)]
    pub branch: String,
    /// Description of the build
    #[arg(long)]
    pub description: String,
    /// Fully qualified container image URI
    #[arg(long)]
    pub image: String,
    /// Version of the build, e.g. a commit SHA
    #[arg(long)]
    pub version: String,
    /// System name or ID the build belongs to
    #[arg(long)]
    pub system: Option<String>,
    /// Create the branch as CHANGE_REQUEST if no branch has that name
    #[arg(long)]
    pub auto_create_branch: bool,
    /// Print only key=value lines for GitHub Actions
    #[arg(long)]
    pub github: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListBuildsArgs {
    /// Project name or ID
    #[arg(long)]
    pub project: String,
    /// Branch name or ID
    #[arg(long)]
    pub branch: String,
}

pub async fn handle(command: BuildCommands, client: &ApiClient) -> Result<String> {
    match command.command {
        BuildSubcommands::Create(args) => create(client, args).await,
        BuildSubcommands::List(args) => list(client, args).await,
    }
}

pub async fn create(client: &ApiClient, args: CreateBuildArgs) -> Result<String> {
    if args.image.is_empty() {
        bail!("empty image URI");
    }
    if args.version.is_empty() {
        bail!("empty build version");
    }

    let project_id = client.resolve_project(&args.project).await?;
    let branch_id = branch_for_build(client, project_id, &args).await?;
    let system_id = match &args.system {
        Some(system) => Some(client.resolve_system(project_id, system).await?),
        None => None,
    };

    let build = client
        .create_build(
            project_id,
            branch_id,
            &CreateBuildInput {
                description: args.description,
                image_uri: args.image,
                version: args.version,
                system_id,
            },
        )
        .await?;

    Ok(Report::new("Created build successfully!")
        .field("build_id", "Build ID", build.build_id)
        .render(OutputMode::from_flag(args.github)))
}

async fn branch_for_build(
    client: &ApiClient,
    project_id: Uuid,
    args: &CreateBuildArgs,
) -> Result<Uuid> {
    match client.resolve_branch(project_id, &args.branch).await {
        Ok(id) => Ok(id),
        Err(ApiError::NotFound { .. }) if args.auto_create_branch => {
            info!("Branch '{}' not found, creating it as CHANGE_REQUEST", args.branch);
            let branch = client
                .create_branch(
                    project_id,
                    &CreateBranchInput {
                        name: args.branch.clone(),
                        branch_type: BranchType::ChangeRequest,
                    },
                )
                .await?;
            info!("Created branch {}", branch.branch_id);
            Ok(branch.branch_id)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn list(client: &ApiClient, args: ListBuildsArgs) -> Result<String> {
    let project_id = client.resolve_project(&args.project).await?;
    let branch_id = client.resolve_branch(project_id, &args.branch).await?;
    let builds = client.list_all_builds(project_id, branch_id).await?;
    render_json(&builds)
}
