//! Block: the single domain entity of the link directory.
//!
//! A block is a curated card pointing at an external site. It carries a
//! title, an optional description, the target URL, a color tag from a fixed
//! palette and a category from a fixed set.
//!
//! ## Example
//!
//! ```ignore
//! use smart_blocks::{Category, Color, CreateBlock};
//!
//! let request = CreateBlock::new("Figma", "https://figma.com", Color::Purple, Category::Technology)
//!     .with_description("Collaborative design tool");
//! ```

mod category;
mod color;
mod request;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use category::{Category, CategoryFilter};
pub use color::Color;
pub use request::{CreateBlock, UpdateBlock};
pub(crate) use request::nullable;

/// Identifier assigned by the store on creation. Always positive.
pub type BlockId = u64;

/// A stored block as returned by the endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub color: Color,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Block {
    /// Case-insensitive substring match against title, description and url.
    ///
    /// A blank term matches every block.
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
            || self.url.to_lowercase().contains(&needle)
    }
}
