use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod domain;
mod entities;
mod error;
mod models;
mod store;

use commands::{CommandLine, Services};
use store::StoreGateway;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CommandLine::parse_args();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(admin) = err.downcast_ref::<error::AdminError>() {
                tracing::debug!(kind = ?admin.kind(), error = ?admin, "Command failed");
            }
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: CommandLine) -> anyhow::Result<()> {
    let config = cli.admin_config();
    let store = Arc::new(StoreGateway::connect(&config.database).await?);
    let services = Services::new(store, &config);

    commands::run(cli.command, &services).await
}

/// Structured logging on stderr; RUST_LOG overrides the -v level
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("warn,iredmail_admin={}", level))),
        )
        .init();
}
