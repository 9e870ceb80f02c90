// src/common/response.rs

use serde::Serialize;

/// `{"data": ...}` envelope used by every read endpoint.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{"success": true, "message": ..., "data": ...}` envelope for mutations.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> MutationResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
