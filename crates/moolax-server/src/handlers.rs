//! Request handlers for the gateway's HTTP surface.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::auth;
use crate::resolver;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn readyz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ready" }))
}

/// `GET /api`: authenticate, then resolve through the cache tiers.
///
/// On success the snapshot is returned verbatim as the response body;
/// clients see exactly the bytes the provider produced.
pub async fn rates(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    if let Err(err) = auth::authenticate(uri.path(), &headers, &state.client_api_key) {
        return err.into_response();
    }

    match resolver::resolve(&state).await {
        Ok(snapshot) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            snapshot.as_str().to_owned(),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Catch-all for everything the router did not match.
///
/// `GET`s go through the authenticator, which rejects the unrecognized
/// path with 404 only after the caller has presented a valid token
/// (header check comes first, same order as on the real resource).
/// Every other method is 405. `OPTIONS` never reaches here; the CORS
/// middleware answers it before routing.
pub async fn fallback(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    match method {
        Method::GET => {
            match auth::authenticate(uri.path(), &headers, &state.client_api_key) {
                Err(err) => err.into_response(),
                // Unreachable: the recognized path is routed, not fallback.
                Ok(()) => StatusCode::NOT_FOUND.into_response(),
            }
        }
        _ => (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response(),
    }
}
