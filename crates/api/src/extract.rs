//! Caller identity extraction.
//!
//! Authentication itself happens upstream; by the time a request
//! reaches this service the gateway has already verified the token and
//! forwarded the caller's subject in the `x-user-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::OwnerId;

use crate::error::ApiError;

/// Header carrying the authenticated caller's UUID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, resolved from the `x-user-id` header.
///
/// Rejects with 401 when the header is absent or not a valid UUID.
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity(pub OwnerId);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Missing x-user-id header".to_string()))?;

        let value = header
            .to_str()
            .map_err(|_| ApiError::Unauthorized("Invalid x-user-id header".to_string()))?;

        let uuid = uuid::Uuid::parse_str(value)
            .map_err(|_| ApiError::Unauthorized("Invalid x-user-id header".to_string()))?;

        Ok(CallerIdentity(OwnerId::from_uuid(uuid)))
    }
}
