//! smart_blocks - a curated link directory.
//!
//! - `block`: the `Block` entity, its fixed color palette and categories.
//! - `validation`: raw wire input to typed requests.
//! - `store`: `BlockStore` gateway and the in-memory implementation.
//! - `api`: the block endpoints (`BlockService`) and their axum router.
//! - `client`: `BlockCollection`, the client-side mirror of the collection.
//! - `search`: `SearchFilter` and category statistics over a block slice.

pub mod api;
pub mod block;
pub mod client;
pub mod config;
pub mod search;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use api::{ApiError, ApiResponse, BlockService, BlocksPage};
pub use block::{Block, BlockId, Category, CategoryFilter, Color, CreateBlock, UpdateBlock};
pub use client::{BlockApi, BlockCollection, ClientError};
pub use config::ServerConfig;
pub use search::SearchFilter;
pub use store::{BlockStore, InMemoryBlockStore, Page, StoreError};
