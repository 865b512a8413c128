use hyper::{HeaderMap, header::{HeaderName, HeaderValue}};

use crate::config::CACHE_CONTROL_VALUE;

#[cfg(test)]
mod tests;

pub fn add_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("Content-Type"),
    );
}

/// CORS headers stamped on every response, preflight and errors included.
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    add_cors_headers(&mut headers);
    headers
}

/// `Cache-Control` for relayed upstream responses.
pub fn cache_control() -> HeaderValue {
    HeaderValue::from_static(CACHE_CONTROL_VALUE)
}
