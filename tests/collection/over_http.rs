//! BlockCollection against the axum router over real HTTP.

use std::sync::Arc;

use smart_blocks::api::{self, BlockService};
use smart_blocks::client::HttpBlockApi;
use smart_blocks::{BlockCollection, Category, InMemoryBlockStore, UpdateBlock};

use crate::support::{request, titles};

async fn start_server() -> String {
    let app = api::router(Arc::new(BlockService::new(InMemoryBlockStore::new())));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn lifecycle_over_http() {
    let base = start_server().await;
    let collection = BlockCollection::loaded(HttpBlockApi::new(base)).await;
    assert_eq!(collection.total_blocks(), 0);

    let figma = collection
        .create_block(&request("Figma", Category::Technology))
        .await
        .unwrap();
    collection
        .create_block(&request("Fitbit", Category::HealthFitness))
        .await
        .unwrap();

    collection.fetch_blocks(Some(Category::HealthFitness)).await;
    assert_eq!(titles(&collection.blocks()), vec!["Fitbit"]);

    collection.refresh_blocks().await;
    let updated = collection
        .update_block(figma.id, &UpdateBlock::new().title("Figma Design"))
        .await
        .unwrap();
    assert_eq!(collection.blocks()[1], updated);

    // duplicate url is rejected by the server
    assert!(collection
        .create_block(&request("Figma", Category::Technology))
        .await
        .is_none());
    assert_eq!(collection.error().as_deref(), Some("Duplicate URL"));
    assert_eq!(collection.total_blocks(), 2);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let collection = BlockCollection::new(HttpBlockApi::new(format!("http://{addr}")));
    collection.fetch_blocks(None).await;

    let error = collection.error().unwrap();
    assert!(error.starts_with("network error"), "{error}");
    assert!(!collection.loading());
}
