use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use smart_blocks::api::{self, BlockService};
use smart_blocks::{telemetry, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    telemetry::init_tracing(&config.log_filter, config.log_json);

    let store = config
        .open_store()
        .context("failed to open block store")?;
    tracing::info!(
        bind = %config.bind,
        data_file = ?config.data_file,
        blocks = store.len().unwrap_or_default(),
        "starting smart-blocks"
    );

    let service = Arc::new(BlockService::new(store));
    api::serve(service, config.bind)
        .await
        .with_context(|| format!("server on {} failed", config.bind))
}
