use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Header carrying the id of the signed-in user, set by the auth gateway.
pub const ACTOR_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of.
#[derive(Debug, Clone)]
pub struct Actor(pub String);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(ACTOR_HEADER)
            .ok_or_else(|| AppError::Unauthorized(format!("missing {} header", ACTOR_HEADER)))?;
        let id = value
            .to_str()
            .map_err(|_| AppError::Unauthorized(format!("malformed {} header", ACTOR_HEADER)))?
            .trim();
        if id.is_empty() {
            return Err(AppError::Unauthorized(format!("empty {} header", ACTOR_HEADER)));
        }
        Ok(Actor(id.to_string()))
    }
}
