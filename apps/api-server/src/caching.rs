//! Conditional responses: weak ETags, `If-None-Match` and cache directives.

use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::middleware::error::AppError;

/// CDN-specific cache directive header.
pub const CDN_CACHE_CONTROL: HeaderName = HeaderName::from_static("cdn-cache-control");

const ONE_HOUR: u32 = 3600;
const ONE_DAY: u32 = 86_400;
const ONE_YEAR: u32 = 31_536_000;

/// Weak validator over the exact bytes sent to the client.
pub fn weak_etag(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("W/\"{}\"", hex::encode(&digest[..16]))
}

fn opaque(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix("W/").unwrap_or(tag)
}

/// Weak comparison of an `If-None-Match` value against `tag`.
pub fn etag_matches(if_none_match: Option<&str>, tag: &str) -> bool {
    let Some(value) = if_none_match.map(str::trim).filter(|v| !v.is_empty()) else {
        return false;
    };

    if value == "*" {
        return true;
    }

    let wanted = opaque(tag);
    value
        .split(',')
        .map(opaque)
        .any(|candidate| !candidate.is_empty() && candidate == wanted)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheScope {
    /// Shared caches may store the response.
    Public,
    /// Only the browser may store it, and must revalidate each time.
    PrivateRevalidate,
    /// Nobody stores it.
    NoStore,
}

/// Cache directives for a read response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub scope: CacheScope,
    pub browser_ttl: u32,
    pub edge_ttl: Option<u32>,
    pub stale_while_revalidate: Option<u32>,
    pub immutable: bool,
}

impl CachePolicy {
    /// Published content: an hour in browsers, a day at the edge.
    pub const fn public_content() -> Self {
        Self {
            scope: CacheScope::Public,
            browser_ttl: ONE_HOUR,
            edge_ttl: Some(ONE_DAY),
            stale_while_revalidate: Some(ONE_DAY),
            immutable: false,
        }
    }

    /// Uploaded media: keys are never reused.
    pub const fn immutable_media() -> Self {
        Self {
            scope: CacheScope::Public,
            browser_ttl: ONE_YEAR,
            edge_ttl: Some(ONE_YEAR),
            stale_while_revalidate: None,
            immutable: true,
        }
    }

    pub const fn revalidate() -> Self {
        Self {
            scope: CacheScope::PrivateRevalidate,
            browser_ttl: 0,
            edge_ttl: None,
            stale_while_revalidate: None,
            immutable: false,
        }
    }

    pub const fn no_store() -> Self {
        Self {
            scope: CacheScope::NoStore,
            browser_ttl: 0,
            edge_ttl: None,
            stale_while_revalidate: None,
            immutable: false,
        }
    }

    pub fn cache_control(&self) -> String {
        match self.scope {
            CacheScope::NoStore => "private, no-store, max-age=0".to_string(),
            CacheScope::PrivateRevalidate => "private, no-cache".to_string(),
            CacheScope::Public => {
                let mut value = format!("public, max-age={}", self.browser_ttl);
                if let Some(swr) = self.stale_while_revalidate {
                    value.push_str(&format!(", stale-while-revalidate={swr}"));
                }
                if self.immutable {
                    value.push_str(", immutable");
                }
                value
            }
        }
    }

    /// Directive for the CDN, if the policy sets one.
    pub fn cdn_cache_control(&self) -> Option<String> {
        match self.scope {
            CacheScope::NoStore => Some("no-store".to_string()),
            CacheScope::PrivateRevalidate => None,
            CacheScope::Public => self.edge_ttl.map(|ttl| {
                let mut value = format!("public, max-age={ttl}");
                if let Some(swr) = self.stale_while_revalidate {
                    value.push_str(&format!(", stale-while-revalidate={swr}"));
                }
                value
            }),
        }
    }

    /// Write the directives onto a response under construction.
    pub fn apply(&self, builder: &mut HttpResponseBuilder) {
        builder.insert_header((header::CACHE_CONTROL, self.cache_control()));
        if let Some(cdn) = self.cdn_cache_control() {
            builder.insert_header((CDN_CACHE_CONTROL, cdn));
        }
    }
}

fn if_none_match(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
}

/// Respond with `bytes` unless the client already holds `etag`.
pub fn conditional_bytes(
    req: &HttpRequest,
    bytes: Vec<u8>,
    content_type: &str,
    etag: &str,
    policy: CachePolicy,
) -> HttpResponse {
    let not_modified = etag_matches(if_none_match(req), etag);

    let mut builder = if not_modified {
        HttpResponse::NotModified()
    } else {
        HttpResponse::Ok()
    };
    if let Ok(value) = HeaderValue::from_str(etag) {
        builder.insert_header((header::ETAG, value));
    }
    policy.apply(&mut builder);

    if not_modified {
        builder.finish()
    } else {
        builder.content_type(content_type).body(bytes)
    }
}

/// Serialize `body` and answer 200 or 304 against its weak ETag.
pub fn conditional_json<T: Serialize>(
    req: &HttpRequest,
    body: &T,
    policy: CachePolicy,
) -> Result<HttpResponse, AppError> {
    let bytes = serde_json::to_vec(body).map_err(|e| AppError::Internal(e.to_string()))?;
    let etag = weak_etag(&bytes);
    Ok(conditional_bytes(
        req,
        bytes,
        "application/json",
        &etag,
        policy,
    ))
}
