use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("One or more fields are invalid")]
    ValidationError(#[from] ValidationErrors),

    // Body could not be parsed into the endpoint's schema
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid status value")]
    InvalidStatus,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("No active strategy found for this company")]
    NoActiveStrategy,

    #[error("Email is already in use")]
    EmailAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Completion API failures and anything else unexpected
    #[error("{0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::ValidationError(errors) = &self {
            let mut details = BTreeMap::new();
            collect_messages("", errors, &mut details);
            let body = Json(json!({
                "error": self.to_string(),
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let status = match &self {
            AppError::ValidationError(_) | AppError::BadRequest(_) | AppError::InvalidStatus => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) | AppError::NoActiveStrategy => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,

            // Store and upstream failures surface their message as a 500.
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Flattens nested validator output into `"company.name" -> [messages]`.
fn collect_messages(
    prefix: &str,
    errors: &ValidationErrors,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let key = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                out.insert(key, messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&key, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{key}[{index}]"), inner, out);
                }
            }
        }
    }
}
