//! Resolves the caller's identity for each request.
//!
//! Authentication happens upstream; the gateway forwards the resolved
//! account id in the `x-user-id` header. A missing or blank header means
//! the caller is anonymous.
use std::convert::Infallible;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use likes_shared::types::Identity;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor yielding the [`Identity`] of the current request.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        Ok(CallerIdentity(Identity::from_raw(raw)))
    }
}
