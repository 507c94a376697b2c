//! User identity extractor for Axum handlers.
//!
//! Authentication itself is handled upstream of this service; requests
//! arrive with the authenticated user's id in the `X-User-Id` header.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::AppState;

/// Identified user extracted from the `X-User-Id` request header.
///
/// Use as an Axum extractor in handlers that operate on user-owned data:
/// ```ignore
/// async fn handler(user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Validation("Missing X-User-Id header".to_string()))?;

        let id: Uuid = header
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid X-User-Id header: {header}")))?;

        Ok(CurrentUser { id })
    }
}
