use crate::api::ApiClient;
use crate::api::models::CreateProjectInput;
use crate::cli::output::{OutputMode, Report, render_json};
use anyhow::{Result, bail};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ProjectCommands {
    #[command(subcommand)]
    pub command: ProjectSubcommands,
}

#[derive(Subcommand)]
pub enum ProjectSubcommands {
    /// Create a new project
    Create(CreateProjectArgs),
    /// List all projects
    List,
    /// Show a single project
    Get(GetProjectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateProjectArgs {
    /// Name of the new project
    #[arg(long)]
    pub name: String,
    /// Description of the new project
    #[arg(long)]
    pub description: String,
    /// Print only key=value lines for GitHub Actions
    #[arg(long)]
    pub github: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GetProjectArgs {
    /// Project name or ID
    #[arg(long)]
    pub project: String,
}

pub async fn handle(command: ProjectCommands, client: &ApiClient) -> Result<String> {
    match command.command {
        ProjectSubcommands::Create(args) => create(client, args).await,
        ProjectSubcommands::List => list(client).await,
        ProjectSubcommands::Get(args) => get(client, args).await,
    }
}

pub async fn create(client: &ApiClient, args: CreateProjectArgs) -> Result<String> {
    if args.name.is_empty() {
        bail!("empty project name");
    }
    if args.description.is_empty() {
        bail!("empty project description");
    }

    let project = client
        .create_project(&CreateProjectInput {
            name: args.name,
            description: args.description,
        })
        .await?;

    Ok(Report::new("Created project successfully!")
        .field("project_id", "Project ID", project.project_id)
        .render(OutputMode::from_flag(args.github)))
}

pub async fn list(client: &ApiClient) -> Result<String> {
    let projects = client.list_all_projects().await?;
    render_json(&projects)
}

pub async fn get(client: &ApiClient, args: GetProjectArgs) -> Result<String> {
    let project_id = client.resolve_project(&args.project).await?;
    let project = client.get_project(project_id).await?;
    render_json(&project)
}
