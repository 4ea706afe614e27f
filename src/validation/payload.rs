//! Raw wire shapes, before validation.
//!
//! Enumerated fields stay strings here so an out-of-range value produces a
//! field message rather than a decode failure.

use serde::Deserialize;

use crate::block::{nullable, Category};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBlockPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlockPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl UpdateBlockPayload {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.color.is_none()
            && self.category.is_none()
    }
}

/// Query string of `GET /api/blocks`, every value still a string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQueryParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
}

/// Validated list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<Category>,
    /// Trimmed, never blank.
    pub search: Option<String>,
    pub limit: usize,
    pub offset: usize,
}
