mod app;
mod application;
mod config;
mod domain;
mod ui;
mod utils;

use tracing::error;

use crate::config::{LaunchContext, ShellConfig};
use crate::domain::AppError;

fn main() -> Result<(), AppError> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let launch = LaunchContext::detect();
    let config = ShellConfig::default();

    app::run(launch, config).inspect_err(|e| error!("Failed to start: {}", e))
}
