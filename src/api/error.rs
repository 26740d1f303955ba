use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::StoreError;

/// `{ "message": ... }` body used by error responses and the delete confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// API error, rendered as `{ "message": ... }`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Store failure on a write path (create, update).
    pub fn client_fault(err: StoreError) -> Self {
        error!("Write rejected by store: {}", err);
        ApiError::BadRequest(err.to_string())
    }

    /// Store failure on a read or delete path.
    pub fn server_fault(err: StoreError) -> Self {
        error!("Store failure: {}", err);
        ApiError::Internal(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(MessageResponse::new(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotFound("Trade not found".to_string()).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Trade not found" }));
    }

    #[test]
    fn test_store_errors_follow_operation_class() {
        let write = ApiError::client_fault(StoreError::Validation("itemId: required".to_string()));
        assert_eq!(write.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(write.to_string(), "Trade validation failed: itemId: required");

        let read = ApiError::server_fault(StoreError::InvalidId("abc".to_string()));
        assert_eq!(read.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
