//! A scripted in-memory `BlockApi`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use smart_blocks::client::{BlockApi, ClientError, ListParams};
use smart_blocks::{Block, BlockId, BlocksPage, Category, Color, CreateBlock, UpdateBlock};

/// Keeps its own block list (newest first) and can be told to fail the
/// next call.
#[derive(Default)]
pub struct FakeApi {
    blocks: Mutex<Vec<Block>>,
    next_id: AtomicU64,
    fail_next: Mutex<Option<ClientError>>,
    pub list_calls: Mutex<Vec<ListParams>>,
}

impl FakeApi {
    pub fn with_titles(titles: &[&str]) -> Self {
        let api = Self::default();
        for title in titles {
            let block = api.make(&request(title, Category::Technology));
            api.blocks.lock().unwrap().insert(0, block);
        }
        api
    }

    pub fn fail_next(&self, error: ClientError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn server_blocks(&self) -> Vec<Block> {
        self.blocks.lock().unwrap().clone()
    }

    fn take_failure(&self) -> Result<(), ClientError> {
        match self.fail_next.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn make(&self, request: &CreateBlock) -> Block {
        let now = Utc::now();
        Block {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            title: request.title.clone(),
            description: request.description.clone(),
            url: request.url.clone(),
            color: request.color,
            category: request.category,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn request(title: &str, category: Category) -> CreateBlock {
    CreateBlock::new(
        title,
        format!("https://{}.example.com", title.to_lowercase()),
        Color::Indigo,
        category,
    )
}

pub fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: message.to_string(),
    }
}

pub fn titles(blocks: &[Block]) -> Vec<&str> {
    blocks.iter().map(|b| b.title.as_str()).collect()
}

#[async_trait]
impl BlockApi for FakeApi {
    async fn list_blocks(&self, params: &ListParams) -> Result<BlocksPage, ClientError> {
        self.list_calls.lock().unwrap().push(params.clone());
        self.take_failure()?;
        let blocks: Vec<Block> = self
            .server_blocks()
            .into_iter()
            .filter(|b| params.category.map_or(true, |c| b.category == c))
            .filter(|b| params.search.as_deref().map_or(true, |t| b.matches_term(t)))
            .collect();
        Ok(BlocksPage {
            total: blocks.len(),
            blocks,
            limit: None,
            offset: None,
            has_more: None,
        })
    }

    async fn create_block(&self, request: &CreateBlock) -> Result<Block, ClientError> {
        self.take_failure()?;
        let block = self.make(request);
        self.blocks.lock().unwrap().insert(0, block.clone());
        Ok(block)
    }

    async fn update_block(&self, id: BlockId, changes: &UpdateBlock) -> Result<Block, ClientError> {
        self.take_failure()?;
        let mut blocks = self.blocks.lock().unwrap();
        let block = blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| api_error(404, "Block not found"))?;
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
        block.updated_at = Utc::now();
        Ok(block.clone())
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), ClientError> {
        self.take_failure()?;
        let mut blocks = self.blocks.lock().unwrap();
        let before = blocks.len();
        blocks.retain(|b| b.id != id);
        if blocks.len() == before {
            return Err(api_error(404, "Block not found"));
        }
        Ok(())
    }
}
