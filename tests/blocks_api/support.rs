//! Shared fixtures: a fresh service and request bodies.

use serde_json::{json, Value};
use smart_blocks::api::{BlockRequest, BlockResponse, BlockService};
use smart_blocks::InMemoryBlockStore;

pub type Service = BlockService<InMemoryBlockStore>;

pub fn service() -> Service {
    BlockService::new(InMemoryBlockStore::new())
}

pub fn block_json(title: &str, url: &str, category: &str) -> Value {
    json!({
        "title": title,
        "url": url,
        "color": "bg-purple-500",
        "category": category
    })
}

pub fn create(service: &Service, body: Value) -> BlockResponse {
    service.respond(BlockRequest::Create {
        body: serde_json::to_vec(&body).unwrap(),
    })
}

/// Figma and Notion (Technology), then Stripe (Finance); ids 1, 2, 3.
pub fn seeded() -> Service {
    let service = service();
    for (title, url, category) in [
        ("Figma", "https://figma.com", "Technology"),
        ("Notion", "https://notion.so", "Technology"),
        ("Stripe", "https://stripe.com", "Finance"),
    ] {
        let response = create(&service, block_json(title, url, category));
        assert_eq!(response.status, 201);
    }
    service
}
