use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::api::{
    decode_data, decode_envelope, BlockApi, ListParams, CREATE_FAILED, DELETE_FAILED,
    UPDATE_FAILED,
};
use super::error::ClientError;
use crate::api::{BlockRequest, BlockService, BlocksPage};
use crate::block::{Block, BlockId, CreateBlock, UpdateBlock};
use crate::store::BlockStore;

/// `BlockApi` that dispatches straight into an in-process `BlockService`,
/// going through the same envelope a remote client would see.
pub struct LocalBlockApi<S> {
    service: Arc<BlockService<S>>,
}

impl<S> Clone for LocalBlockApi<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: BlockStore> LocalBlockApi<S> {
    pub fn new(service: Arc<BlockService<S>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<BlockService<S>> {
        &self.service
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl<S: BlockStore + 'static> BlockApi for LocalBlockApi<S> {
    async fn list_blocks(&self, params: &ListParams) -> Result<BlocksPage, ClientError> {
        let response = self.service.respond(BlockRequest::List(params.into()));
        decode_data(response.status, response.body, params.fallback_message())
    }

    async fn create_block(&self, request: &CreateBlock) -> Result<Block, ClientError> {
        let body = encode(request)?;
        let response = self.service.respond(BlockRequest::Create { body });
        decode_data(response.status, response.body, CREATE_FAILED)
    }

    async fn update_block(&self, id: BlockId, changes: &UpdateBlock) -> Result<Block, ClientError> {
        let body = encode(changes)?;
        let response = self.service.respond(BlockRequest::Update {
            id: id.to_string(),
            body,
        });
        decode_data(response.status, response.body, UPDATE_FAILED)
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), ClientError> {
        let response = self.service.respond(BlockRequest::Delete { id: id.to_string() });
        decode_envelope::<Value>(response.status, response.body, DELETE_FAILED).map(|_| ())
    }
}
