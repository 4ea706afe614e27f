use parking_lot::RwLock;

use super::api::{BlockApi, ListParams};
use crate::block::{Block, BlockId, Category, CreateBlock, UpdateBlock};

/// Observable state of a `BlockCollection`.
///
/// `total_blocks` is the server-reported total and is tracked independently
/// from `blocks.len()` (a listing may be one page of a larger collection).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionState {
    pub blocks: Vec<Block>,
    pub loading: bool,
    pub error: Option<String>,
    pub total_blocks: usize,
}

/// Client-side mirror of the block collection.
///
/// Operations take `&self` and may run concurrently; each one issues
/// exactly one request and the last state-mutating response wins. The
/// state lock is never held across an await.
pub struct BlockCollection<A> {
    api: A,
    state: RwLock<CollectionState>,
}

impl<A: BlockApi> BlockCollection<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(CollectionState::default()),
        }
    }

    /// Create a collection and run the initial unfiltered fetch.
    pub async fn loaded(api: A) -> Self {
        let collection = Self::new(api);
        collection.refresh_blocks().await;
        collection
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn snapshot(&self) -> CollectionState {
        self.state.read().clone()
    }

    pub fn blocks(&self) -> Vec<Block> {
        self.state.read().blocks.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn total_blocks(&self) -> usize {
        self.state.read().total_blocks
    }

    /// Replace the collection with the server listing, optionally filtered.
    pub async fn fetch_blocks(&self, category: Option<Category>) {
        self.load(ListParams::category(category)).await
    }

    /// Replace the collection with the server's search results. A blank term
    /// is sent as no constraint.
    pub async fn search_blocks(&self, term: &str) {
        self.load(ListParams::search(term)).await
    }

    pub async fn refresh_blocks(&self) {
        self.fetch_blocks(None).await
    }

    async fn load(&self, params: ListParams) {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.api.list_blocks(&params).await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(
                    blocks = page.blocks.len(),
                    total = page.total,
                    category = ?params.category,
                    search = ?params.search,
                    "blocks loaded"
                );
                state.total_blocks = page.total;
                state.blocks = page.blocks;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load blocks");
                state.error = Some(e.to_string());
            }
        }
    }

    /// Create a block; on success it is prepended and returned.
    pub async fn create_block(&self, request: &CreateBlock) -> Option<Block> {
        self.clear_error();
        match self.api.create_block(request).await {
            Ok(block) => {
                let mut state = self.state.write();
                state.blocks.insert(0, block.clone());
                state.total_blocks += 1;
                tracing::debug!(id = block.id, total = state.total_blocks, "block added");
                Some(block)
            }
            Err(e) => {
                self.fail("create", e.to_string());
                None
            }
        }
    }

    /// Update a block; on success the entry with that id is replaced in place.
    pub async fn update_block(&self, id: BlockId, changes: &UpdateBlock) -> Option<Block> {
        self.clear_error();
        match self.api.update_block(id, changes).await {
            Ok(block) => {
                let mut state = self.state.write();
                if let Some(slot) = state.blocks.iter_mut().find(|b| b.id == id) {
                    *slot = block.clone();
                }
                tracing::debug!(id, "block replaced");
                Some(block)
            }
            Err(e) => {
                self.fail("update", e.to_string());
                None
            }
        }
    }

    /// Delete a block; on success it is removed and `true` returned.
    pub async fn delete_block(&self, id: BlockId) -> bool {
        self.clear_error();
        match self.api.delete_block(id).await {
            Ok(()) => {
                let mut state = self.state.write();
                state.blocks.retain(|b| b.id != id);
                state.total_blocks = state.total_blocks.saturating_sub(1);
                tracing::debug!(id, total = state.total_blocks, "block removed");
                true
            }
            Err(e) => {
                self.fail("delete", e.to_string());
                false
            }
        }
    }

    /// Move the block at `from` to position `to`, locally only. Nothing is
    /// sent to the server and the next fetch restores server order.
    ///
    /// Returns false, leaving the collection untouched, when either index
    /// is out of range.
    pub fn move_block(&self, from: usize, to: usize) -> bool {
        let mut state = self.state.write();
        let len = state.blocks.len();
        if from >= len || to >= len {
            return false;
        }
        let block = state.blocks.remove(from);
        state.blocks.insert(to, block);
        true
    }

    fn clear_error(&self) {
        self.state.write().error = None;
    }

    fn fail(&self, operation: &'static str, message: String) {
        tracing::warn!(operation, error = %message, "block operation failed");
        self.state.write().error = Some(message);
    }
}
