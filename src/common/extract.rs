// src/common/extract.rs

use axum::{
    extract::{FromRequest, OptionalFromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::common::error::AppError;

/// JSON body that has been parsed into `T` and passed `T::validate`.
///
/// Malformed bodies and missing typed fields become `400` instead of
/// axum's default `422`, so every handler rejects bad input the same way
/// and before touching the store.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// A missing body (no `Content-Type`) is `None`; a present one must still
/// parse and validate.
impl<T, S> OptionalFromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let parsed = <Json<T> as OptionalFromRequest<S>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let Some(Json(value)) = parsed else {
            return Ok(None);
        };
        value.validate()?;

        Ok(Some(ValidatedJson(value)))
    }
}
