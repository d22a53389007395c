mod actions;
mod compose;
mod encode;
mod error;
mod transform;

use std::process::ExitCode;
use anyhow::Context;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::*;
use actions::*;
use error::RunError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "favicon_rounder=debug,config=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    debug!("Logging initialized...");

    let config = match Config::new().context("Failed to init config") {
        Ok(c) => c,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE
        }
    };

    debug!("Config loaded...");

    let result = run_action(&config).await;

    match &result {
        Ok(stats) => {
            for c in stats.written.iter() {
                debug!("{}: {}x{} {} image, radius {}px", c.path.display(), c.width, c.height, c.format, c.radius);
            }

            info!("Rounded corners written to all {} targets ({} bytes)", stats.written.len(), stats.bytes());
        },
        Err(e @ RunError::MissingInput(_)) => error!("{}", e),
        Err(e @ RunError::MissingCodec { .. }) => error!("Missing image codec: {}", e),
        Err(e @ RunError::Failed { .. }) => error!("Processing failed: {}", e),
    }

    ExitCode::from(exit_status(&result))
}

/// Process exit status for a finished run, every failure kind exits with 1.
fn exit_status(result: &Result<RunStats, RunError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(RunError::MissingInput(_)) |
        Err(RunError::MissingCodec { .. }) |
        Err(RunError::Failed { .. }) => 1,
    }
}
