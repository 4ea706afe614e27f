use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The fixed set of block categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Category {
    #[strum(to_string = "Technology")]
    Technology,
    #[serde(rename = "E-Commerce")]
    #[strum(to_string = "E-Commerce")]
    ECommerce,
    #[strum(to_string = "Education")]
    Education,
    #[serde(rename = "Health & Fitness")]
    #[strum(to_string = "Health & Fitness")]
    HealthFitness,
    #[strum(to_string = "Finance")]
    Finance,
    #[strum(to_string = "Entertainment")]
    Entertainment,
}

impl Category {
    /// All categories in display order.
    pub fn all() -> Vec<Category> {
        Category::iter().collect()
    }
}

/// Category axis of the search filter: either every category or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    /// The concrete category, if one is selected.
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(*category),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_LABEL),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_LABEL {
            return Ok(CategoryFilter::All);
        }
        Category::from_str(s).map(CategoryFilter::Only)
    }
}
