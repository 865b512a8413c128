pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::ProxyConfig;
pub use errors::ProxyError;
pub use models::{Endpoint, ErrorBody, FileQuery, ListQuery, ProxyResponse};
pub use services::DriveProxy;
