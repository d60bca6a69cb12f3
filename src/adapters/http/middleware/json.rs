//! JSON body extractor that reports bad bodies as validation errors.
//!
//! `axum::Json` answers a body it cannot deserialize with its own 400/415/422
//! and a plain-text message. `ApiJson` routes those through `ApiError`, so a
//! missing field or a mistyped value is a 400 with the usual error body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::adapters::http::error::ApiError;

/// Field name reported for body-level failures.
pub const BODY_FIELD: &str = "body";

#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        ApiError::bad_request(BODY_FIELD, rejection.body_text())
    }
}

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    fn from_request<'life0, 'async_trait>(
        request: Request,
        state: &'life0 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let Json(value) = Json::<T>::from_request(request, state).await?;
            Ok(ApiJson(value))
        })
    }
}
