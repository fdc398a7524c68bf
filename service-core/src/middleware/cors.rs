//! Cross-origin access control.
//!
//! Browsers attach an `Origin` header to cross-origin requests. Requests
//! without one (same-origin pages, curl, server-to-server calls) always pass.
//! A present origin must match the configured allowlist exactly; anything
//! else, including a value that is not visible ASCII, is rejected with a 403
//! before the request body is read.
//!
//! Response headers and preflight answers come from [`CorsLayer`], driven by
//! the same [`OriginValidator`] as the guard.

use crate::error::AppError;
use crate::middleware::tracing::REQUEST_ID_HEADER;
use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Which origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPolicy {
    /// Any origin is accepted. Only selected by an explicit `*` in config.
    AllowAny,
    /// Exact, case-sensitive match against this set.
    AllowList(HashSet<String>),
}

#[derive(Debug, Clone)]
pub struct OriginValidator {
    policy: OriginPolicy,
}

impl OriginValidator {
    pub fn allow_list<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            policy: OriginPolicy::AllowList(origins.into_iter().map(Into::into).collect()),
        }
    }

    pub fn allow_any() -> Self {
        Self {
            policy: OriginPolicy::AllowAny,
        }
    }

    /// Builds the validator from configured origins. A lone `*` entry opts into
    /// [`OriginPolicy::AllowAny`]; mixing `*` with concrete origins keeps the
    /// allowlist and ignores the wildcard.
    pub fn from_origins(origins: &[String]) -> Self {
        match origins {
            [only] if only == "*" => Self::allow_any(),
            _ => Self::allow_list(origins.iter().filter(|o| o.as_str() != "*").cloned()),
        }
    }

    pub fn policy(&self) -> &OriginPolicy {
        &self.policy
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match (origin, &self.policy) {
            (None, _) => true,
            (Some(_), OriginPolicy::AllowAny) => true,
            (Some(origin), OriginPolicy::AllowList(allowed)) => allowed.contains(origin),
        }
    }

    /// Checks a raw `Origin` header. Unreadable values never match.
    pub fn allows_header(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.is_allowed(Some(origin)))
            .unwrap_or(false)
    }
}

/// CORS response headers for origins the validator accepts.
pub fn cors_layer(validator: Arc<OriginValidator>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _: &Parts| validator.allows_header(origin),
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .max_age(Duration::from_secs(600))
}

/// Rejects requests whose `Origin` header is present but not allowed.
///
/// Must wrap [`cors_layer`]. Preflights answered by the inner layer are
/// reported as `204 No Content`.
pub async fn origin_guard_middleware(
    State(validator): State<Arc<OriginValidator>>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        if !validator.allows_header(origin) {
            let shown = String::from_utf8_lossy(origin.as_bytes()).into_owned();
            tracing::warn!(origin = %shown, path = %req.uri().path(), "Rejected cross-origin request");
            return AppError::Forbidden(anyhow::anyhow!("origin {} is not allowed", shown))
                .into_response();
        }
    }

    let is_preflight = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
