//! # Semi-Join Runtime
//!
//! Wires two JSON-file sources into the semi-join service and renders the
//! result.
//!
//! ## Startup Sequence
//!
//! 1. Initialise tracing from `SJ_LOG_LEVEL` / `RUST_LOG`
//! 2. Load `RuntimeConfig` from the environment
//! 3. Load both sources concurrently
//! 4. Run the join with tracing and metrics observers attached
//! 5. Print the matched rows as text or JSON

pub mod config;

use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use sj_02_semi_join::{
    FanoutObserver, JoinMetrics, JoinObserver, JoinResult, JsonFileSource, SemiJoinApi,
    SemiJoinService, TracingObserver,
};

pub use config::RuntimeConfig;

/// Load both sources and join them
pub async fn run(config: &RuntimeConfig) -> Result<JoinResult<Value, Value>> {
    let (left, right) = tokio::try_join!(
        JsonFileSource::load("left", &config.left_source),
        JsonFileSource::load("right", &config.right_source),
    )
    .context("Failed to load sources")?;

    let metrics = Arc::new(JoinMetrics::new());
    let observer = FanoutObserver::default()
        .with(Arc::new(TracingObserver))
        .with(metrics.clone() as Arc<dyn JoinObserver>);

    let service = SemiJoinService::new(Arc::new(left), Arc::new(right), config.join.clone())
        .with_observer(Arc::new(observer));

    let result = service.run().await.context("Semi-join failed")?;

    let snapshot = metrics.snapshot();
    info!(
        run_id = %result.run_id,
        keys_scanned = snapshot.keys_scanned,
        left_candidates = snapshot.left_candidates,
        matches = snapshot.matches,
        observed_false_positive_rate = snapshot.observed_false_positive_rate,
        "Join metrics"
    );

    Ok(result)
}

/// One line per matched row, then the count
pub fn render_text(result: &JoinResult<Value, Value>) -> String {
    let mut out = String::new();
    for m in &result.matches {
        out.push_str(&format!("{}\t{}\t{}\n", m.key, m.left_value, m.right_value));
    }
    out.push_str(&format!("count: {}\n", result.count));
    out
}

/// The whole result, stats included, as pretty JSON
pub fn render_json(result: &JoinResult<Value, Value>) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize result")
}
