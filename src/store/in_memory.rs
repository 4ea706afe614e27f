//! InMemoryBlockStore - BTreeMap-backed block store with optional data file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use super::{snapshot, BlockStore, Page, StoreError};
use crate::block::{Block, BlockId, Category, CreateBlock, UpdateBlock};

/// In-memory block store.
///
/// Ids come from a monotonic sequence and are never reused, even after a
/// delete. Clone-friendly via Arc: clones share the same collection.
///
/// When opened with a data file, every successful mutation rewrites the file
/// before the change becomes visible; a failed write leaves the collection
/// as it was.
#[derive(Clone)]
pub struct InMemoryBlockStore {
    blocks: Arc<RwLock<BTreeMap<BlockId, Block>>>,
    next_id: Arc<AtomicU64>,
    data_file: Option<Arc<PathBuf>>,
}

impl Default for InMemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBlockStore {
    /// Create an empty, purely in-memory store.
    pub fn new() -> Self {
        Self {
            blocks: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            data_file: None,
        }
    }

    /// Open a store backed by `path`, loading it if it already exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut blocks = BTreeMap::new();
        let mut next_id = 1;

        if let Some(loaded) = snapshot::read(&path)? {
            let highest = loaded.blocks.iter().map(|b| b.id).max().unwrap_or(0);
            next_id = loaded.next_id.max(highest + 1);
            for block in loaded.blocks {
                blocks.insert(block.id, block);
            }
            tracing::info!(
                path = %path.display(),
                blocks = blocks.len(),
                next_id,
                "loaded block data file"
            );
        }

        Ok(Self {
            blocks: Arc::new(RwLock::new(blocks)),
            next_id: Arc::new(AtomicU64::new(next_id)),
            data_file: Some(Arc::new(path)),
        })
    }

    /// Path of the backing data file, if any.
    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref().map(PathBuf::as_path)
    }

    /// Total number of blocks.
    pub fn len(&self) -> Result<usize, StoreError> {
        self.get_blocks_count(None)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }

    fn read<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&BTreeMap<BlockId, Block>) -> T,
    ) -> Result<T, StoreError> {
        let blocks = self
            .blocks
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))?;
        Ok(f(&blocks))
    }

    /// Run a mutation under the write lock. With a data file the mutation is
    /// staged on a copy and only swapped in once the file has been written.
    fn mutate<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut BTreeMap<BlockId, Block>) -> T,
    ) -> Result<T, StoreError> {
        let mut blocks = self
            .blocks
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))?;

        let Some(path) = self.data_file.as_deref() else {
            return Ok(f(&mut blocks));
        };

        let mut staged = blocks.clone();
        let out = f(&mut staged);
        snapshot::write(path, self.next_id.load(Ordering::SeqCst), &staged)?;
        *blocks = staged;
        Ok(out)
    }
}

impl BlockStore for InMemoryBlockStore {
    fn get_blocks(&self, category: Option<Category>, page: Page) -> Result<Vec<Block>, StoreError> {
        self.read("get_blocks", |blocks| window(blocks, category, page))
    }

    fn get_blocks_count(&self, category: Option<Category>) -> Result<usize, StoreError> {
        self.read("get_blocks_count", |blocks| count(blocks, category))
    }

    fn get_blocks_with_count(
        &self,
        category: Option<Category>,
        page: Page,
    ) -> Result<(Vec<Block>, usize), StoreError> {
        self.read("get_blocks_with_count", |blocks| {
            (window(blocks, category, page), count(blocks, category))
        })
    }

    fn get_block_by_id(&self, id: BlockId) -> Result<Option<Block>, StoreError> {
        self.read("get_block_by_id", |blocks| blocks.get(&id).cloned())
    }

    fn search_blocks(&self, term: &str) -> Result<Vec<Block>, StoreError> {
        self.read("search_blocks", |blocks| {
            blocks
                .values()
                .rev()
                .filter(|b| b.matches_term(term))
                .cloned()
                .collect()
        })
    }

    fn find_by_url(&self, url: &str) -> Result<Option<Block>, StoreError> {
        self.read("find_by_url", |blocks| {
            blocks.values().find(|b| b.url == url).cloned()
        })
    }

    fn create_block(&self, request: &CreateBlock) -> Result<Block, StoreError> {
        let block = self.mutate("create_block", |blocks| {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let now = Utc::now();
            let block = Block {
                id,
                title: request.title.clone(),
                description: request.description.clone(),
                url: request.url.clone(),
                color: request.color,
                category: request.category,
                created_at: now,
                updated_at: now,
            };
            blocks.insert(id, block.clone());
            block
        })?;
        tracing::debug!(id = block.id, "block stored");
        Ok(block)
    }

    fn update_block(&self, id: BlockId, changes: &UpdateBlock) -> Result<Option<Block>, StoreError> {
        self.mutate("update_block", |blocks| {
            let block = blocks.get_mut(&id)?;
            apply_changes(block, changes);
            block.updated_at = next_timestamp(block.updated_at);
            Some(block.clone())
        })
    }

    fn delete_block(&self, id: BlockId) -> Result<bool, StoreError> {
        self.mutate("delete_block", |blocks| blocks.remove(&id).is_some())
    }
}

fn window(blocks: &BTreeMap<BlockId, Block>, category: Option<Category>, page: Page) -> Vec<Block> {
    blocks
        .values()
        .rev()
        .filter(|b| category.map_or(true, |c| b.category == c))
        .skip(page.offset)
        .take(page.limit)
        .cloned()
        .collect()
}

fn count(blocks: &BTreeMap<BlockId, Block>, category: Option<Category>) -> usize {
    match category {
        Some(c) => blocks.values().filter(|b| b.category == c).count(),
        None => blocks.len(),
    }
}

fn apply_changes(block: &mut Block, changes: &UpdateBlock) {
    if let Some(title) = &changes.title {
        block.title = title.clone();
    }
    if let Some(description) = &changes.description {
        block.description = description.clone();
    }
    if let Some(url) = &changes.url {
        block.url = url.clone();
    }
    if let Some(color) = changes.color {
        block.color = color;
    }
    if let Some(category) = changes.category {
        block.category = category;
    }
}

/// `updated_at` must move forward on every mutation, even when the clock
/// has not ticked since the previous one.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}
