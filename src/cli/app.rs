use super::commands::{
    BranchCommands, BuildCommands, LogsCommands, MetricsCommands, ProjectCommands,
};
use crate::config::GlobalArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "resim")]
#[command(about = "A CLI tool for interacting with the ReSim API")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create and inspect projects
    Project(ProjectCommands),
    /// Create and list branches
    Branch(BranchCommands),
    /// Create and list builds
    Build(BuildCommands),
    /// Register and list job logs
    Logs(LogsCommands),
    /// Manage metrics configuration
    Metrics(MetricsCommands),
}
