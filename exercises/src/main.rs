use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use exercises::commands::{executor::OutputFormat, Cli};
use exercises::{logging::init_logging, App, ClientError};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (log_path, _guard) = init_logging(cli.verbose)?;
    tracing::info!("exercises starting, logging to {}", log_path.display());

    let app = App::from_env(cli.server_url)?;
    let format = OutputFormat::from_flag(cli.json);

    match app.run(cli.command, format).await {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Command failed: {:#}", e);
            match e.downcast_ref::<ClientError>() {
                Some(client_error) if client_error.is_auth_failure() => {
                    eprintln!("{}", ClientError::Unauthenticated);
                    eprintln!("Run `exercises login <username>` to start a new session.");
                }
                _ => eprintln!("Error: {:#}", e),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
