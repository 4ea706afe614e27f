use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::{Block, Category};

/// Number of blocks in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Per-category counts, largest first. Ties keep category order and
/// categories with no blocks are left out.
pub fn category_stats(blocks: &[Block]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for block in blocks {
        *counts.entry(block.category).or_default() += 1;
    }

    let mut stats: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));
    stats
}

/// The category holding the most blocks, if any.
pub fn top_category(stats: &[CategoryCount]) -> Option<Category> {
    stats.first().map(|s| s.category)
}
