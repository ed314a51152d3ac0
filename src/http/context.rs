//! Request context extraction and role enforcement.

use super::ApiError;
use crate::todo::{
    domain::{Role, UserId},
    services::RequestContext,
};
use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the authenticated user's UUID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user's role; `user` when absent.
pub const USER_ROLE_HEADER: &str = "x-user-role";

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        context_from_headers(&parts.headers)
    }
}

fn context_from_headers(headers: &HeaderMap) -> Result<RequestContext, ApiError> {
    let actor = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .map(UserId::from_uuid)
        .ok_or_else(ApiError::unauthenticated)?;

    let role = headers.get(USER_ROLE_HEADER).map_or(Ok(Role::User), |value| {
        value
            .to_str()
            .ok()
            .and_then(|raw| Role::try_from(raw).ok())
            .ok_or_else(ApiError::unauthenticated)
    })?;

    Ok(RequestContext::new(actor, role))
}

/// Rejects callers without the admin role before the handler runs.
///
/// # Errors
///
/// Returns 401 when the caller is unauthenticated and 403 when the caller
/// is not an admin.
pub async fn require_admin(
    context: RequestContext,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !context.is_admin() {
        tracing::warn!(
            actor = %context.actor(),
            path = %request.uri().path(),
            "admin route refused"
        );
        return Err(ApiError::forbidden());
    }
    Ok(next.run(request).await)
}
