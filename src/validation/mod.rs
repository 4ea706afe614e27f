//! Validation: turns raw wire input into typed requests.
//!
//! Every validator collects field-level messages instead of stopping at the
//! first problem; the endpoint layer reports the first message and logs the
//! rest.

mod error;
mod payload;

use std::str::FromStr;

use url::Url;

use crate::block::{BlockId, Category, Color, CreateBlock, UpdateBlock};

pub use error::{FieldError, ValidationErrors};
pub use payload::{CreateBlockPayload, ListQuery, ListQueryParams, UpdateBlockPayload};

pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 100;

const TITLE_REQUIRED: &str = "Title is required";
const TITLE_TOO_LONG: &str = "Title must be less than 255 characters";
const DESCRIPTION_TOO_LONG: &str = "Description must be less than 1000 characters";
const URL_REQUIRED: &str = "URL is required";
const URL_INVALID: &str = "Please enter a valid URL";
const COLOR_INVALID: &str = "Please select a valid color";
const CATEGORY_INVALID: &str = "Please select a valid category";

/// Validate a create payload.
pub fn validate_create(payload: CreateBlockPayload) -> Result<CreateBlock, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = match payload.title {
        Some(title) => check_title(&title, &mut errors),
        None => {
            errors.push("title", TITLE_REQUIRED);
            None
        }
    };
    let description = payload
        .description
        .filter(|description| check_description(description, &mut errors));
    let url = match payload.url {
        Some(url) => check_url(&url, &mut errors),
        None => {
            errors.push("url", URL_REQUIRED);
            None
        }
    };
    let color = check_color(payload.color.as_deref(), &mut errors);
    let category = check_category(payload.category.as_deref(), &mut errors);

    match (title, url, color, category) {
        (Some(title), Some(url), Some(color), Some(category)) if errors.is_empty() => {
            Ok(CreateBlock {
                title,
                description,
                url,
                color,
                category,
            })
        }
        _ => Err(errors),
    }
}

/// Validate a partial update. At least one field must be present.
pub fn validate_update(payload: UpdateBlockPayload) -> Result<UpdateBlock, ValidationErrors> {
    if payload.is_empty() {
        return Err(ValidationErrors::single(
            "body",
            "At least one field must be provided",
        ));
    }

    let mut errors = ValidationErrors::new();
    let mut update = UpdateBlock::new();

    if let Some(title) = payload.title {
        update.title = check_title(&title, &mut errors);
    }
    if let Some(description) = payload.description {
        update.description = match description {
            Some(text) if check_description(&text, &mut errors) => Some(Some(text)),
            Some(_) => None,
            None => Some(None),
        };
    }
    if let Some(url) = payload.url {
        update.url = check_url(&url, &mut errors);
    }
    if payload.color.is_some() {
        update.color = check_color(payload.color.as_deref(), &mut errors);
    }
    if payload.category.is_some() {
        update.category = check_category(payload.category.as_deref(), &mut errors);
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}

/// Validate list query parameters, applying defaults.
///
/// Empty strings are treated as absent. A blank `search` is dropped.
pub fn validate_query(params: ListQueryParams) -> Result<ListQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let category = match non_empty(params.category) {
        Some(raw) => match Category::from_str(&raw) {
            Ok(category) => Some(category),
            Err(_) => {
                errors.push("category", CATEGORY_INVALID);
                None
            }
        },
        None => None,
    };

    let limit = match non_empty(params.limit) {
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => limit,
            _ => {
                errors.push("limit", "Limit must be a number between 1 and 100");
                DEFAULT_LIMIT
            }
        },
        None => DEFAULT_LIMIT,
    };

    let offset = match non_empty(params.offset) {
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(offset) => offset,
            Err(_) => {
                errors.push("offset", "Offset must be a non-negative number");
                0
            }
        },
        None => 0,
    };

    let search = params
        .search
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty());

    if errors.is_empty() {
        Ok(ListQuery {
            category,
            search,
            limit,
            offset,
        })
    } else {
        Err(errors)
    }
}

/// Parse a path id. Only positive integers are accepted.
pub fn parse_block_id(raw: &str) -> Result<BlockId, ValidationErrors> {
    match raw.trim().parse::<BlockId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationErrors::single(
            "id",
            "Block ID must be a positive integer",
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_title(title: &str, errors: &mut ValidationErrors) -> Option<String> {
    let title = title.trim();
    if title.is_empty() {
        errors.push("title", TITLE_REQUIRED);
        None
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push("title", TITLE_TOO_LONG);
        None
    } else {
        Some(title.to_string())
    }
}

fn check_description(description: &str, errors: &mut ValidationErrors) -> bool {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.push("description", DESCRIPTION_TOO_LONG);
        false
    } else {
        true
    }
}

fn check_url(url: &str, errors: &mut ValidationErrors) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        errors.push("url", URL_REQUIRED);
        return None;
    }
    match Url::parse(url) {
        Ok(_) => Some(url.to_string()),
        Err(_) => {
            errors.push("url", URL_INVALID);
            None
        }
    }
}

fn check_color(raw: Option<&str>, errors: &mut ValidationErrors) -> Option<Color> {
    match raw.map(Color::from_str) {
        Some(Ok(color)) => Some(color),
        _ => {
            errors.push("color", COLOR_INVALID);
            None
        }
    }
}

fn check_category(raw: Option<&str>, errors: &mut ValidationErrors) -> Option<Category> {
    match raw.map(Category::from_str) {
        Some(Ok(category)) => Some(category),
        _ => {
            errors.push("category", CATEGORY_INVALID);
            None
        }
    }
}
