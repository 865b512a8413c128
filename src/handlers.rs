use std::convert::Infallible;

use hyper::{Body, Response, StatusCode, header::{CACHE_CONTROL, CONTENT_TYPE}};
use warp::{Rejection, Reply};

use crate::errors::ProxyError;
use crate::middleware::cache_control;
use crate::models::{ErrorBody, FileQuery, Health, ListQuery, ProxyResponse};
use crate::services::DriveProxy;

#[cfg(test)]
mod tests;

pub async fn drive(query: FileQuery, proxy: DriveProxy) -> Result<Response<Body>, Rejection> {
    let relayed = proxy.fetch_file(&query).await.map_err(warp::reject::custom)?;
    relay_reply(relayed).map_err(warp::reject::custom)
}

pub async fn drive_list(query: ListQuery, proxy: DriveProxy) -> Result<Response<Body>, Rejection> {
    let relayed = proxy.list_files(&query).await.map_err(warp::reject::custom)?;
    relay_reply(relayed).map_err(warp::reject::custom)
}

pub fn health(path: warp::path::FullPath) -> impl Reply {
    warp::reply::json(&Health {
        ok: true,
        path: path.as_str().to_string(),
    })
}

pub fn preflight() -> impl Reply {
    warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT)
}

/// Upstream status and body as received, with the content type and cache directive.
pub fn relay_reply(relayed: ProxyResponse) -> Result<Response<Body>, ProxyError> {
    Response::builder()
        .status(relayed.status)
        .header(CONTENT_TYPE, relayed.content_type)
        .header(CACHE_CONTROL, cache_control())
        .body(Body::from(relayed.body))
        .map_err(|e| ProxyError::Upstream(format!("invalid upstream response: {}", e)))
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, body) = if let Some(e) = err.find::<ProxyError>() {
        (e.status_code(), e.body())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, ErrorBody::new("not found"))
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, ErrorBody::with_detail("invalid query string", e.to_string()))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, ErrorBody::new("method not allowed"))
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new("internal server error"))
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), code))
}
