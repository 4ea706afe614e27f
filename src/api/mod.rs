//! Block endpoints: list, create, get, update, delete and stats.
//!
//! `BlockService<S>` holds the whole request contract (validation, status
//! mapping, envelope) behind a framework-agnostic `respond()`. The axum
//! router in `http` is a thin adapter over it, and so is the client's
//! in-process `LocalBlockApi`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use smart_blocks::api::{self, BlockService};
//! use smart_blocks::InMemoryBlockStore;
//!
//! let service = Arc::new(BlockService::new(InMemoryBlockStore::new()));
//! api::serve(service, "127.0.0.1:3000".parse()?).await?;
//! ```

mod envelope;
mod error;
#[cfg(feature = "http")]
mod http;
mod service;

pub use envelope::{ApiResponse, BlockStats, BlocksPage};
pub use error::ApiError;
#[cfg(feature = "http")]
pub use http::{router, serve};
pub use service::{BlockRequest, BlockResponse, BlockService};
