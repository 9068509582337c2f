use clap::Parser;
use colored::*;
use is_terminal::IsTerminal;
use log::{LevelFilter, debug};

use resim_cli::api::ApiError;
use resim_cli::cli::{self, Cli};

#[tokio::main]
async fn main() {
    // Pick up RESIM_* variables from a local .env before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    debug!("Starting resim");

    let result = tokio::select! {
        result = cli::run(cli) => result,
        _ = shutdown_signal() => Err(ApiError::Interrupted.into()),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
