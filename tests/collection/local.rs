//! BlockCollection against a real service, in process.

use std::sync::Arc;

use smart_blocks::client::LocalBlockApi;
use smart_blocks::{BlockCollection, BlockService, Category, Color, CreateBlock, InMemoryBlockStore, UpdateBlock};

use crate::support::{request, titles};

fn collection() -> BlockCollection<LocalBlockApi<InMemoryBlockStore>> {
    let service = Arc::new(BlockService::new(InMemoryBlockStore::new()));
    BlockCollection::new(LocalBlockApi::new(service))
}

#[tokio::test]
async fn full_lifecycle() {
    let collection = collection();

    let figma = collection
        .create_block(&request("Figma", Category::Technology))
        .await
        .unwrap();
    let stripe = collection
        .create_block(&request("Stripe", Category::Finance).with_description("Payments"))
        .await
        .unwrap();
    assert_eq!(titles(&collection.blocks()), vec!["Stripe", "Figma"]);
    assert_eq!(collection.total_blocks(), 2);

    let updated = collection
        .update_block(stripe.id, &UpdateBlock::new().clear_description())
        .await
        .unwrap();
    assert_eq!(updated.description, None);

    assert!(collection.delete_block(figma.id).await);
    collection.refresh_blocks().await;
    assert_eq!(titles(&collection.blocks()), vec!["Stripe"]);
    assert_eq!(collection.total_blocks(), 1);
}

#[tokio::test]
async fn server_rejection_surfaces_the_error_label() {
    let collection = collection();
    let bad = CreateBlock::new("Bad", "not-a-url", Color::Red, Category::Education);

    assert!(collection.create_block(&bad).await.is_none());
    assert_eq!(collection.error().as_deref(), Some("Validation failed"));
    assert_eq!(collection.total_blocks(), 0);
    assert!(collection.blocks().is_empty());
}

#[tokio::test]
async fn missing_block_on_delete() {
    let collection = collection();
    assert!(!collection.delete_block(7).await);
    assert_eq!(collection.error().as_deref(), Some("Block not found"));
}

#[tokio::test]
async fn category_fetch_reports_server_total() {
    let collection = collection();
    for (name, category) in [
        ("Figma", Category::Technology),
        ("Notion", Category::Technology),
        ("Stripe", Category::Finance),
    ] {
        collection.create_block(&request(name, category)).await.unwrap();
    }

    collection.fetch_blocks(Some(Category::Technology)).await;
    assert_eq!(titles(&collection.blocks()), vec!["Notion", "Figma"]);
    assert_eq!(collection.total_blocks(), 2);

    collection.search_blocks("stripe").await;
    assert_eq!(titles(&collection.blocks()), vec!["Stripe"]);
}
