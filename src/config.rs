//! Server configuration, from flags or environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::store::{InMemoryBlockStore, StoreError};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// smart-blocks - curated link directory server
#[derive(Debug, Clone, Parser)]
#[command(name = "smart-blocks", version, about)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "SMART_BLOCKS_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// JSON file the blocks are persisted to. Without it, blocks live in
    /// memory only.
    #[arg(long, env = "SMART_BLOCKS_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "SMART_BLOCKS_LOG_JSON")]
    pub log_json: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "SMART_BLOCKS_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServerConfig {
    /// Open the configured store.
    pub fn open_store(&self) -> Result<InMemoryBlockStore, StoreError> {
        match &self.data_file {
            Some(path) => InMemoryBlockStore::open(path),
            None => Ok(InMemoryBlockStore::new()),
        }
    }
}
