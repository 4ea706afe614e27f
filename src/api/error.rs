//! Error taxonomy of the block endpoints.

use thiserror::Error;

use super::envelope::ApiResponse;
use crate::block::BlockId;
use crate::store::StoreError;
use crate::validation::ValidationErrors;

/// Every way an endpoint can refuse a request.
///
/// The endpoint layer is the only place that classifies failures; each
/// variant maps to exactly one status and one envelope `error` label.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid block id: {0}")]
    InvalidId(ValidationErrors),
    #[error("invalid query parameters: {0}")]
    InvalidQuery(ValidationErrors),
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("request body too large: {0}")]
    BodyTooLarge(String),
    #[error("block {0} not found")]
    NotFound(BlockId),
    #[error("url {url} already used by block {id}")]
    Conflict { url: String, id: BlockId },
    #[error("failed to {operation}: {source}")]
    Internal {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub(crate) fn internal(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Internal { operation, source }
    }

    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidId(_)
            | ApiError::InvalidQuery(_)
            | ApiError::Validation(_)
            | ApiError::MalformedBody(_) => 400,
            ApiError::BodyTooLarge(_) => 413,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict { .. } => 409,
            ApiError::Internal { .. } => 500,
        }
    }

    /// Short label carried in the envelope's `error` field.
    pub fn label(&self) -> &'static str {
        match self {
            ApiError::InvalidId(_) => "Invalid block ID",
            ApiError::InvalidQuery(_) => "Invalid query parameters",
            ApiError::Validation(_) => "Validation failed",
            ApiError::MalformedBody(_) => "Invalid JSON",
            ApiError::BodyTooLarge(_) => "Payload too large",
            ApiError::NotFound(_) => "Block not found",
            ApiError::Conflict { .. } => "Duplicate URL",
            ApiError::Internal { .. } => "Internal server error",
        }
    }

    /// Human-readable detail carried in the envelope's `message` field.
    /// Internal failures only name the operation.
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidId(errors)
            | ApiError::InvalidQuery(errors)
            | ApiError::Validation(errors) => errors
                .first_message()
                .unwrap_or("Invalid request")
                .to_string(),
            ApiError::MalformedBody(_) => "Request body must be a valid JSON object".to_string(),
            ApiError::BodyTooLarge(_) => "Request body exceeds the size limit".to_string(),
            ApiError::NotFound(id) => format!("Block with ID {id} does not exist"),
            ApiError::Conflict { .. } => "A block with this URL already exists".to_string(),
            ApiError::Internal { operation, .. } => format!("Failed to {operation}"),
        }
    }

    pub fn to_response<T>(&self) -> ApiResponse<T> {
        ApiResponse::failure(self.label(), self.message())
    }
}
