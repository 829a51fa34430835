//! Bearer-token authentication for the rates endpoint.

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// The single recognized resource path.
pub const RESOURCE_PATH: &str = "/api";

/// Authentication failures, in the order they are checked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header.
    #[error("Missing Authorization header")]
    Missing,

    /// The presented token does not match the configured secret.
    #[error("Invalid API key")]
    Invalid,

    /// The request targets an unrecognized resource.
    #[error("Not Found")]
    NotFound,
}

/// Validates the bearer token and the request path.
///
/// Route validation is bundled in so it happens once per request, before
/// any cache work. A malformed `Authorization` header counts as missing.
pub fn authenticate(
    path: &str,
    headers: &HeaderMap,
    expected_token: &str,
) -> Result<(), AuthError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::Missing)?;

    if token != expected_token {
        return Err(AuthError::Invalid);
    }

    if path != RESOURCE_PATH {
        return Err(AuthError::NotFound);
    }

    Ok(())
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Missing => StatusCode::UNAUTHORIZED,
            AuthError::Invalid => StatusCode::FORBIDDEN,
            AuthError::NotFound => StatusCode::NOT_FOUND,
        };

        if status == StatusCode::UNAUTHORIZED {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                self.to_string(),
            )
                .into_response();
        }

        (status, self.to_string()).into_response()
    }
}
