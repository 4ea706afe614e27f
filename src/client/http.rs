//! `BlockApi` over HTTP. Requires the `client` feature.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{
    decode_data, decode_envelope, BlockApi, ListParams, CREATE_FAILED, DELETE_FAILED,
    UPDATE_FAILED,
};
use super::error::ClientError;
use crate::api::BlocksPage;
use crate::block::{Block, BlockId, CreateBlock, UpdateBlock};

/// Talks to a running server, e.g. `HttpBlockApi::new("http://127.0.0.1:3000")`.
#[derive(Debug, Clone)]
pub struct HttpBlockApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBlockApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn blocks_url(&self) -> String {
        format!("{}/api/blocks", self.base_url)
    }

    fn block_url(&self, id: BlockId) -> String {
        format!("{}/api/blocks/{id}", self.base_url)
    }

    /// Send a request and read back `(status, body)`. A body that is not
    /// JSON is kept as `Null` so the status still decides the outcome.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, Value), ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok((status, body))
    }

    async fn data<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<T, ClientError> {
        let (status, body) = self.send(request).await?;
        decode_data(status, body, fallback)
    }
}

#[async_trait]
impl BlockApi for HttpBlockApi {
    async fn list_blocks(&self, params: &ListParams) -> Result<BlocksPage, ClientError> {
        let request = self.client.get(self.blocks_url()).query(&params.query_pairs());
        self.data(request, params.fallback_message()).await
    }

    async fn create_block(&self, request: &CreateBlock) -> Result<Block, ClientError> {
        let request = self.client.post(self.blocks_url()).json(request);
        self.data(request, CREATE_FAILED).await
    }

    async fn update_block(&self, id: BlockId, changes: &UpdateBlock) -> Result<Block, ClientError> {
        let request = self.client.put(self.block_url(id)).json(changes);
        self.data(request, UPDATE_FAILED).await
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), ClientError> {
        let (status, body) = self.send(self.client.delete(self.block_url(id))).await?;
        decode_envelope::<Value>(status, body, DELETE_FAILED).map(|_| ())
    }
}
