#![windows_subsystem = "windows"]

use anyhow::Result;
use solcard::{config::Config, gui};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Saved settings pick the cluster unless SOLCARD_CLUSTER overrides it
    let config = Config::from_env();
    gui::launch(config)?;

    Ok(())
}
