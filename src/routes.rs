use std::convert::Infallible;

use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::config::MOUNT_PREFIX;
use crate::handlers::{self, handle_rejection};
use crate::middleware::cors_headers;
use crate::models::{FileQuery, ListQuery, QueryPairs};
use crate::services::DriveProxy;

/// Full route table: the API at `/` and again under `/api`, errors recovered
/// into JSON, CORS on everything.
pub fn routes(
    proxy: DriveProxy,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let root = api(proxy.clone());
    let prefixed = warp::path(MOUNT_PREFIX).and(api(proxy));

    root.or(prefixed)
        .unify()
        .recover(handle_rejection)
        .with(warp::reply::with::headers(cors_headers()))
        .with(warp::trace::request())
}

/// The endpoints relative to whatever prefix they are mounted under.
pub fn api(proxy: DriveProxy) -> BoxedFilter<(Response,)> {
    let with_proxy = warp::any().map(move || proxy.clone());

    let endpoint = |name: &'static str| warp::path(name).and(warp::path::end());

    let preflight = endpoint("health")
        .or(endpoint("drive"))
        .unify()
        .or(endpoint("driveList"))
        .unify()
        .and(warp::options())
        .map(handlers::preflight);

    let health = endpoint("health")
        .and(warp::get())
        .and(warp::path::full())
        .map(handlers::health);

    let drive = endpoint("drive")
        .and(warp::get())
        .and(warp::query::<QueryPairs>().map(FileQuery::from_pairs))
        .and(with_proxy.clone())
        .and_then(handlers::drive);

    let drive_list = endpoint("driveList")
        .and(warp::get())
        .and(warp::query::<QueryPairs>().map(ListQuery::from_pairs))
        .and(with_proxy)
        .and_then(handlers::drive_list);

    preflight
        .or(health)
        .or(drive)
        .or(drive_list)
        .map(Reply::into_response)
        .boxed()
}
