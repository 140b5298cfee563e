use clap::Parser;
use governor_cli::commands::run_cmd::{self, RunArgs};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
const LOG_ENV_VAR: &str = "BB_GOVERNOR_LOG";

/// Bitbucket governor: default reviewers and branch policy for every repository of a workspace
#[derive(Parser)]
#[command(name = "bb-governor", version)]
#[command(
    about = "Apply default reviewers and branch restrictions to every repository of a Bitbucket workspace",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is not an error
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run_cmd::execute(&cli.run).await {
        Ok(summary) => {
            info!(
                members = summary.members,
                repositories = summary.repositories,
                added = summary.reviewers.added,
                removed = summary.reviewers.removed,
                skipped = summary.reviewers.skipped,
                policies_applied = summary.policies_applied,
                "Done"
            );
        }
        Err(e) => {
            error!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
