use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ClientError;
use crate::api::{ApiResponse, BlocksPage};
use crate::block::{Block, BlockId, Category, CreateBlock, UpdateBlock};
use crate::validation::ListQueryParams;

pub(crate) const FETCH_FAILED: &str = "Failed to fetch blocks";
pub(crate) const SEARCH_FAILED: &str = "Failed to search blocks";
pub(crate) const CREATE_FAILED: &str = "Failed to create block";
pub(crate) const UPDATE_FAILED: &str = "Failed to update block";
pub(crate) const DELETE_FAILED: &str = "Failed to delete block";

/// Constraints of one list call. `search`, when set, is sent trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn category(category: Option<Category>) -> Self {
        Self {
            category,
            search: None,
        }
    }

    /// A blank term is sent as no constraint.
    pub fn search(term: &str) -> Self {
        let term = term.trim();
        Self {
            category: None,
            search: (!term.is_empty()).then(|| term.to_string()),
        }
    }

    /// Query-string pairs, omitting absent values.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }

    pub(crate) fn fallback_message(&self) -> &'static str {
        if self.search.is_some() {
            SEARCH_FAILED
        } else {
            FETCH_FAILED
        }
    }
}

impl From<&ListParams> for ListQueryParams {
    fn from(params: &ListParams) -> Self {
        ListQueryParams {
            category: params.category.map(|c| c.to_string()),
            search: params.search.clone(),
            limit: None,
            offset: None,
        }
    }
}

/// The block endpoints, as consumed by `BlockCollection`.
///
/// Every failure, whether a rejected request or a broken transport, comes
/// back as a `ClientError`.
#[async_trait]
pub trait BlockApi: Send + Sync {
    async fn list_blocks(&self, params: &ListParams) -> Result<BlocksPage, ClientError>;

    async fn create_block(&self, request: &CreateBlock) -> Result<Block, ClientError>;

    async fn update_block(&self, id: BlockId, changes: &UpdateBlock) -> Result<Block, ClientError>;

    async fn delete_block(&self, id: BlockId) -> Result<(), ClientError>;
}

#[async_trait]
impl<A: BlockApi + ?Sized> BlockApi for Arc<A> {
    async fn list_blocks(&self, params: &ListParams) -> Result<BlocksPage, ClientError> {
        (**self).list_blocks(params).await
    }

    async fn create_block(&self, request: &CreateBlock) -> Result<Block, ClientError> {
        (**self).create_block(request).await
    }

    async fn update_block(&self, id: BlockId, changes: &UpdateBlock) -> Result<Block, ClientError> {
        (**self).update_block(id, changes).await
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), ClientError> {
        (**self).delete_block(id).await
    }
}

/// Interpret an envelope. Anything other than a 2xx status with
/// `success: true` is a failure carrying the server's `error` label, or
/// `fallback` when there is none.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: Value,
    fallback: &str,
) -> Result<Option<T>, ClientError> {
    let ok_status = (200..300).contains(&status);
    let envelope: ApiResponse<T> = match serde_json::from_value(body) {
        Ok(envelope) => envelope,
        Err(_) if !ok_status => {
            return Err(ClientError::Api {
                status,
                message: fallback.to_string(),
            })
        }
        Err(e) => return Err(ClientError::Decode(e.to_string())),
    };

    if ok_status && envelope.success {
        Ok(envelope.data)
    } else {
        Err(ClientError::Api {
            status,
            message: envelope.error.unwrap_or_else(|| fallback.to_string()),
        })
    }
}

/// Like `decode_envelope`, but the envelope must carry `data`.
pub(crate) fn decode_data<T: DeserializeOwned>(
    status: u16,
    body: Value,
    fallback: &str,
) -> Result<T, ClientError> {
    decode_envelope(status, body, fallback)?
        .ok_or_else(|| ClientError::Decode("response envelope has no data".to_string()))
}
