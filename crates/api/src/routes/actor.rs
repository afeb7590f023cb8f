//! Caller identity for audit entries

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub const ACTOR_HEADER: &str = "x-ordertrack-user";
pub const DEFAULT_ACTOR: &str = "system";

/// Username taken from the `x-ordertrack-user` header, `system` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_ACTOR);

        Ok(Self(name.to_string()))
    }
}
