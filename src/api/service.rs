use serde::Serialize;
use serde_json::{json, Value};

use super::envelope::{ApiResponse, BlockStats, BlocksPage};
use super::error::ApiError;
use crate::block::{Block, BlockId};
use crate::search::{category_stats, top_category};
use crate::store::{BlockStore, Page};
use crate::validation::{self, CreateBlockPayload, ListQueryParams, UpdateBlockPayload};

/// A block endpoint call, independent of any HTTP framework.
#[derive(Debug, Clone)]
pub enum BlockRequest {
    List(ListQueryParams),
    Create { body: Vec<u8> },
    Get { id: String },
    Update { id: String, body: Vec<u8> },
    Delete { id: String },
    Stats,
}

impl BlockRequest {
    pub fn name(&self) -> &'static str {
        match self {
            BlockRequest::List(_) => "list",
            BlockRequest::Create { .. } => "create",
            BlockRequest::Get { .. } => "get",
            BlockRequest::Update { .. } => "update",
            BlockRequest::Delete { .. } => "delete",
            BlockRequest::Stats => "stats",
        }
    }
}

/// The response returned after dispatching a `BlockRequest`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockResponse {
    /// HTTP status code.
    pub status: u16,
    /// The JSON envelope.
    pub body: Value,
}

impl BlockResponse {
    fn envelope<T: Serialize>(status: u16, response: ApiResponse<T>) -> Self {
        match serde_json::to_value(&response) {
            Ok(body) => Self { status, body },
            Err(e) => {
                tracing::error!(error = %e, "failed to encode response");
                Self {
                    status: 500,
                    body: json!({
                        "success": false,
                        "error": "Internal server error",
                        "message": "Failed to encode response"
                    }),
                }
            }
        }
    }

    /// Build an error response from an `ApiError`.
    pub fn from_error(err: &ApiError) -> Self {
        Self::envelope(err.status_code(), err.to_response::<()>())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<ApiError> for BlockResponse {
    fn from(err: ApiError) -> Self {
        Self::from_error(&err)
    }
}

/// The block endpoints, backed by a `BlockStore`.
///
/// Every input arrives raw (path segment, query strings, body bytes) and is
/// validated here, so each transport gets identical behavior.
pub struct BlockService<S> {
    store: S,
}

impl<S: BlockStore> BlockService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `GET /api/blocks`.
    ///
    /// A non-blank search bypasses category and pagination; `total` is then
    /// the number of matches and the pagination fields are omitted.
    pub fn list(&self, params: ListQueryParams) -> Result<BlocksPage, ApiError> {
        let query = validation::validate_query(params).map_err(ApiError::InvalidQuery)?;
        let failed = ApiError::internal("fetch blocks");

        if let Some(term) = query.search.as_deref() {
            let blocks = self.store.search_blocks(term).map_err(failed)?;
            return Ok(BlocksPage {
                total: blocks.len(),
                blocks,
                limit: None,
                offset: None,
                has_more: None,
            });
        }

        let page = Page::new(query.limit, query.offset);
        let (blocks, total) = self
            .store
            .get_blocks_with_count(query.category, page)
            .map_err(failed)?;

        Ok(BlocksPage {
            has_more: Some(query.offset + blocks.len() < total),
            blocks,
            total,
            limit: Some(query.limit),
            offset: Some(query.offset),
        })
    }

    /// `POST /api/blocks`.
    pub fn create(&self, body: &[u8]) -> Result<Block, ApiError> {
        let payload: CreateBlockPayload = decode(body)?;
        let request = validation::validate_create(payload).map_err(ApiError::Validation)?;

        if let Some(existing) = self
            .store
            .find_by_url(&request.url)
            .map_err(ApiError::internal("create block"))?
        {
            return Err(ApiError::Conflict {
                url: request.url,
                id: existing.id,
            });
        }

        let block = self
            .store
            .create_block(&request)
            .map_err(ApiError::internal("create block"))?;
        tracing::info!(id = block.id, url = %block.url, "block created");
        Ok(block)
    }

    /// `GET /api/blocks/{id}`.
    pub fn get(&self, raw_id: &str) -> Result<Block, ApiError> {
        let id = parse_id(raw_id)?;
        self.store
            .get_block_by_id(id)
            .map_err(ApiError::internal("fetch block"))?
            .ok_or(ApiError::NotFound(id))
    }

    /// `PUT /api/blocks/{id}`. The id must exist before the body is looked at.
    pub fn update(&self, raw_id: &str, body: &[u8]) -> Result<Block, ApiError> {
        let id = parse_id(raw_id)?;
        let failed = ApiError::internal("update block");

        if self.store.get_block_by_id(id).map_err(failed)?.is_none() {
            return Err(ApiError::NotFound(id));
        }

        let payload: UpdateBlockPayload = decode(body)?;
        let changes = validation::validate_update(payload).map_err(ApiError::Validation)?;

        if let Some(url) = changes.url.as_deref() {
            let owner = self
                .store
                .find_by_url(url)
                .map_err(ApiError::internal("update block"))?;
            if let Some(owner) = owner.filter(|b| b.id != id) {
                return Err(ApiError::Conflict {
                    url: url.to_string(),
                    id: owner.id,
                });
            }
        }

        let block = self
            .store
            .update_block(id, &changes)
            .map_err(ApiError::internal("update block"))?
            .ok_or(ApiError::NotFound(id))?;
        tracing::info!(id, "block updated");
        Ok(block)
    }

    /// `DELETE /api/blocks/{id}`.
    pub fn delete(&self, raw_id: &str) -> Result<BlockId, ApiError> {
        let id = parse_id(raw_id)?;
        let removed = self
            .store
            .delete_block(id)
            .map_err(ApiError::internal("delete block"))?;
        if !removed {
            return Err(ApiError::NotFound(id));
        }
        tracing::info!(id, "block deleted");
        Ok(id)
    }

    /// `GET /api/blocks/stats`.
    pub fn stats(&self) -> Result<BlockStats, ApiError> {
        let blocks = self
            .store
            .get_blocks(None, Page::unbounded())
            .map_err(ApiError::internal("fetch block stats"))?;
        let categories = category_stats(&blocks);
        Ok(BlockStats {
            total: blocks.len(),
            top_category: top_category(&categories),
            categories,
        })
    }

    /// Number of stored blocks.
    pub fn count(&self) -> Result<usize, ApiError> {
        self.store
            .get_blocks_count(None)
            .map_err(ApiError::internal("count blocks"))
    }

    /// Dispatch a request and wrap the outcome in the response envelope.
    pub fn respond(&self, request: BlockRequest) -> BlockResponse {
        let name = request.name();
        let result = match request {
            BlockRequest::List(params) => self
                .list(params)
                .map(|page| BlockResponse::envelope(200, ApiResponse::ok(page))),
            BlockRequest::Create { body } => self.create(&body).map(|block| {
                BlockResponse::envelope(
                    201,
                    ApiResponse::ok(block).with_message("Block created successfully"),
                )
            }),
            BlockRequest::Get { id } => self
                .get(&id)
                .map(|block| BlockResponse::envelope(200, ApiResponse::ok(block))),
            BlockRequest::Update { id, body } => self.update(&id, &body).map(|block| {
                BlockResponse::envelope(
                    200,
                    ApiResponse::ok(block).with_message("Block updated successfully"),
                )
            }),
            BlockRequest::Delete { id } => self
                .delete(&id)
                .map(|_| BlockResponse::envelope(200, ApiResponse::done("Block deleted successfully"))),
            BlockRequest::Stats => self
                .stats()
                .map(|stats| BlockResponse::envelope(200, ApiResponse::ok(stats))),
        };

        result.unwrap_or_else(|err| {
            match &err {
                ApiError::Internal { .. } => {
                    tracing::error!(request = name, error = %err, "block request failed")
                }
                _ => tracing::warn!(
                    request = name,
                    status = err.status_code(),
                    error = %err,
                    "block request rejected"
                ),
            }
            BlockResponse::from_error(&err)
        })
    }
}

fn parse_id(raw: &str) -> Result<BlockId, ApiError> {
    validation::parse_block_id(raw).map_err(ApiError::InvalidId)
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}
