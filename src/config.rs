use std::env;
use std::time::Duration;

use crate::errors::ProxyError;


pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=60";
pub const MOUNT_PREFIX: &str = "api"; // routes are served at root and under /api
pub const DEFAULT_USER_AGENT: &str = concat!("drive-proxy/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_FILE_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const DEFAULT_LIST_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const DEFAULT_LIST_FIELDS: &str =
    "files(id,name,description,mimeType,createdTime,modifiedTime),nextPageToken";

/// Query keys copied from `/driveList` into `files.list`. Everything else is dropped.
pub const LIST_PASSTHROUGH_KEYS: [&str; 6] =
    ["q", "orderBy", "fields", "pageSize", "pageToken", "spaces"];

pub const API_KEY_VAR: &str = "DRIVE_API_KEY";

/// Process configuration, read once at start and handed to the proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub upstream_base: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            api_key: None,
            upstream_base: DRIVE_API_BASE.into(),
            request_timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ProxyError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the config from any variable lookup; `from_env` passes the process environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ProxyError> {
        let host = var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = var("SERVER_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .map_err(|err| ProxyError::Configuration(format!("invalid SERVER_PORT: {err}")))?;

        let api_key = var(API_KEY_VAR).filter(|key| !key.trim().is_empty());

        let upstream_base = var("DRIVE_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DRIVE_API_BASE.into());

        let timeout_ms: u64 = var("DRIVE_PROXY_TIMEOUT_MS")
            .unwrap_or_else(|| REQUEST_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|err| {
                ProxyError::Configuration(format!("invalid DRIVE_PROXY_TIMEOUT_MS: {err}"))
            })?;

        let user_agent =
            var("DRIVE_PROXY_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.into());

        Ok(Self {
            host,
            port,
            api_key,
            upstream_base,
            request_timeout: Duration::from_millis(timeout_ms),
            user_agent,
        })
    }

    /// The configured key, or the per-request configuration error when it is absent.
    pub fn require_api_key(&self) -> Result<&str, ProxyError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProxyError::Configuration(format!("{API_KEY_VAR} is not set")))
    }
}
