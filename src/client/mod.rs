//! Client side of the block endpoints.
//!
//! `BlockCollection` keeps a local copy of the blocks plus loading/error
//! state and talks to the endpoints through a `BlockApi`:
//!
//! - `HttpBlockApi` (feature `client`) over reqwest,
//! - `LocalBlockApi` straight into an in-process `BlockService`.
//!
//! ## Example
//!
//! ```ignore
//! use smart_blocks::client::{BlockCollection, HttpBlockApi};
//!
//! let blocks = BlockCollection::loaded(HttpBlockApi::new("http://127.0.0.1:3000")).await;
//! if let Some(block) = blocks.create_block(&request).await {
//!     assert_eq!(blocks.blocks()[0].id, block.id);
//! }
//! ```

mod api;
mod collection;
mod error;
#[cfg(feature = "client")]
mod http;
mod local;

pub use api::{BlockApi, ListParams};
pub use collection::{BlockCollection, CollectionState};
pub use error::ClientError;
#[cfg(feature = "client")]
pub use http::HttpBlockApi;
pub use local::LocalBlockApi;
