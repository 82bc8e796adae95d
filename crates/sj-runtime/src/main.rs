//! # Semi-Join Runtime
//!
//! Joins the keys of two JSON object files and prints the common rows.
//!
//! ```text
//! SJ_LEFT_SOURCE=data/left.json SJ_RIGHT_SOURCE=data/right.json sj-runtime
//! ```

use anyhow::{anyhow, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sj_runtime::{config, render_json, render_text, run, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before config parsing so its warnings are visible
    let filter = EnvFilter::try_new(config::log_level(|name| std::env::var(name).ok()))
        .map_err(|e| anyhow!("Invalid log filter: {}", e))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = RuntimeConfig::from_env()?;
    let result = run(&config).await?;

    if config.json_output {
        println!("{}", render_json(&result)?);
    } else {
        print!("{}", render_text(&result));
    }

    Ok(())
}
