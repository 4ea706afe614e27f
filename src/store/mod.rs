//! Block store: the persistence gateway the endpoints call into.
//!
//! `BlockStore` is the abstract CRUD surface keyed by integer id.
//! `InMemoryBlockStore` is the shipped implementation; it can optionally
//! mirror its contents to a JSON data file so the collection survives
//! restarts.
//!
//! ## Example
//!
//! ```ignore
//! use smart_blocks::{BlockStore, InMemoryBlockStore, Page};
//!
//! let store = InMemoryBlockStore::new();
//! let created = store.create_block(&request)?;
//! let page = store.get_blocks(None, Page::new(50, 0))?;
//! ```

mod in_memory;
mod snapshot;

use thiserror::Error;

use crate::block::{Block, BlockId, Category, CreateBlock, UpdateBlock};

pub use in_memory::InMemoryBlockStore;

/// Errors raised by a store. All of them surface to callers as internal
/// errors; the detail is only logged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("block store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("data file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("data file {path} is not a valid snapshot: {message}")]
    Corrupt { path: String, message: String },
}

/// A window into the newest-first block listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Every block, no window.
    pub fn unbounded() -> Self {
        Self {
            limit: usize::MAX,
            offset: 0,
        }
    }
}

/// Abstract CRUD storage for blocks.
///
/// Listing order is newest first (descending id).
pub trait BlockStore: Send + Sync {
    /// Blocks in one page, optionally restricted to a category.
    fn get_blocks(&self, category: Option<Category>, page: Page) -> Result<Vec<Block>, StoreError>;

    /// Number of blocks, optionally restricted to a category.
    fn get_blocks_count(&self, category: Option<Category>) -> Result<usize, StoreError>;

    /// One page plus the total it was cut from, read from the same state.
    fn get_blocks_with_count(
        &self,
        category: Option<Category>,
        page: Page,
    ) -> Result<(Vec<Block>, usize), StoreError>;

    fn get_block_by_id(&self, id: BlockId) -> Result<Option<Block>, StoreError>;

    /// Blocks whose title, description or url contain `term` (case-insensitive).
    fn search_blocks(&self, term: &str) -> Result<Vec<Block>, StoreError>;

    /// The block currently holding `url`, if any.
    fn find_by_url(&self, url: &str) -> Result<Option<Block>, StoreError>;

    /// Insert a new block, assigning its id and timestamps.
    fn create_block(&self, block: &CreateBlock) -> Result<Block, StoreError>;

    /// Apply a partial update. Returns `None` if the id does not exist.
    fn update_block(&self, id: BlockId, changes: &UpdateBlock) -> Result<Option<Block>, StoreError>;

    /// Delete a block. Returns true if it existed.
    fn delete_block(&self, id: BlockId) -> Result<bool, StoreError>;
}
