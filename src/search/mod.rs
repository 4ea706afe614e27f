//! Search/filter engine over a block slice.
//!
//! `SearchFilter` holds the current search term, the selected category and
//! a bounded history of recent terms. It never owns blocks: every derived
//! value is recomputed from the slice handed in, so it can sit next to a
//! `BlockCollection` or any other source without I/O.
//!
//! ## Example
//!
//! ```ignore
//! use smart_blocks::{Category, SearchFilter};
//!
//! let mut filter = SearchFilter::new();
//! filter.set_search_term("no");
//! filter.set_selected_category(Category::Technology);
//! let visible = filter.filtered_blocks(&blocks);
//! ```

mod stats;

use std::collections::VecDeque;

use crate::block::{Block, Category, CategoryFilter};

pub use stats::{category_stats, top_category, CategoryCount};

/// Default number of remembered search terms.
pub const DEFAULT_HISTORY_CAP: usize = 10;

#[derive(Debug, Clone)]
pub struct SearchFilter {
    search_term: String,
    selected_category: CategoryFilter,
    history: VecDeque<String>,
    history_cap: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::with_history_cap(DEFAULT_HISTORY_CAP)
    }

    pub fn with_history_cap(history_cap: usize) -> Self {
        Self {
            search_term: String::new(),
            selected_category: CategoryFilter::All,
            history: VecDeque::new(),
            history_cap,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_category(&self) -> CategoryFilter {
        self.selected_category
    }

    /// Set the term. A non-blank term is also pushed to the front of the
    /// history unless it is already there.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();

        let trimmed = self.search_term.trim();
        if trimmed.is_empty() || self.history.front().map(String::as_str) == Some(trimmed) {
            return;
        }
        self.history.push_front(trimmed.to_string());
        self.history.truncate(self.history_cap);
    }

    pub fn set_selected_category(&mut self, category: impl Into<CategoryFilter>) {
        self.selected_category = category.into();
    }

    /// Reset term and category. History is kept.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.selected_category = CategoryFilter::All;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Recent terms, most recent first.
    pub fn search_history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True when `block` passes both the term and the category.
    pub fn matches(&self, block: &Block) -> bool {
        self.selected_category.matches(block.category) && block.matches_term(&self.search_term)
    }

    /// The matching blocks, in the order given.
    pub fn filtered_blocks<'a>(&self, blocks: &'a [Block]) -> Vec<&'a Block> {
        blocks.iter().filter(|b| self.matches(b)).collect()
    }

    pub fn total_results(&self, blocks: &[Block]) -> usize {
        blocks.iter().filter(|b| self.matches(b)).count()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_term.trim().is_empty() || self.selected_category != CategoryFilter::All
    }

    /// Evaluate the filter against `blocks` in one pass.
    pub fn apply<'a>(&self, blocks: &'a [Block]) -> FilteredView<'a> {
        let blocks = self.filtered_blocks(blocks);
        FilteredView {
            total_results: blocks.len(),
            blocks,
            has_active_filters: self.has_active_filters(),
        }
    }

    /// Category axis only, for callers that want to pre-filter.
    pub fn category(&self) -> Option<Category> {
        self.selected_category.category()
    }
}

/// Result of `SearchFilter::apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<'a> {
    pub blocks: Vec<&'a Block>,
    pub total_results: usize,
    pub has_active_filters: bool,
}
