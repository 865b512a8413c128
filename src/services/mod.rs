use std::sync::Arc;
use std::time::Instant;

use http::header::{CONTENT_TYPE, USER_AGENT};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use tokio::time::timeout;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::{
    ProxyConfig, DEFAULT_FILE_CONTENT_TYPE, DEFAULT_LIST_CONTENT_TYPE, DEFAULT_LIST_FIELDS,
};
use crate::errors::ProxyError;
use crate::models::{Endpoint, FileQuery, ListQuery, ProxyResponse};


/// Characters `encodeURIComponent` leaves alone: alphanumerics and `-_.!~*'()`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Forwards read-only Drive calls with the server-held key.
///
/// Cheap to clone; every inbound request gets its own handle and nothing
/// mutable is shared between them.
#[derive(Clone)]
pub struct DriveProxy {
    client: Client,
    config: Arc<ProxyConfig>,
}

impl DriveProxy {
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let client = Client::builder().build().map_err(|err| {
            ProxyError::Configuration(format!("failed to build http client: {err}"))
        })?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: ProxyConfig, client: Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub async fn fetch_file(&self, query: &FileQuery) -> Result<ProxyResponse, ProxyError> {
        let result = self.try_fetch_file(query).await;
        log_outcome(Endpoint::Drive, &result);
        result
    }

    pub async fn list_files(&self, query: &ListQuery) -> Result<ProxyResponse, ProxyError> {
        let result = self.try_list_files(query).await;
        log_outcome(Endpoint::DriveList, &result);
        result
    }

    async fn try_fetch_file(&self, query: &FileQuery) -> Result<ProxyResponse, ProxyError> {
        let file_id = query
            .file_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProxyError::Validation("fileId is required".into()))?;
        let api_key = self.config.require_api_key()?;
        let export_mime = query.export_mime.as_deref().filter(|mime| !mime.is_empty());

        let url = file_url(&self.config.upstream_base, file_id, export_mime, api_key)?;
        self.relay(url, DEFAULT_FILE_CONTENT_TYPE).await
    }

    async fn try_list_files(&self, query: &ListQuery) -> Result<ProxyResponse, ProxyError> {
        let api_key = self.config.require_api_key()?;
        let url = list_url(&self.config.upstream_base, query, api_key)?;
        self.relay(url, DEFAULT_LIST_CONTENT_TYPE).await
    }

    /// One GET against Drive, bounded by the configured timeout.
    ///
    /// The deadline covers the whole exchange, body included. When it fires
    /// the in-flight request is dropped along with its timer.
    async fn relay(
        &self,
        url: Url,
        default_content_type: &str,
    ) -> Result<ProxyResponse, ProxyError> {
        let budget = self.config.request_timeout;
        let request = self
            .client
            .get(url)
            .header(USER_AGENT, self.config.user_agent.as_str());

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .unwrap_or(default_content_type)
                .to_string();
            let body = response.bytes().await?;

            Ok::<_, ProxyError>(ProxyResponse {
                status,
                content_type,
                body,
            })
        };

        let started = Instant::now();
        match timeout(budget, exchange).await {
            Ok(result) => {
                if let Ok(response) = &result {
                    debug!(
                        status = response.status.as_u16(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "upstream responded"
                    );
                }
                result
            }
            Err(_) => Err(ProxyError::Upstream(format!(
                "upstream request timed out after {}ms",
                budget.as_millis()
            ))),
        }
    }
}

/// `files.get` with `alt=media`, or `files.export` when an export type is given.
pub fn file_url(
    base: &str,
    file_id: &str,
    export_mime: Option<&str>,
    api_key: &str,
) -> Result<Url, ProxyError> {
    let encoded = utf8_percent_encode(file_id, PATH_SEGMENT);
    let mut url = match export_mime {
        Some(_) => Url::parse(&format!("{base}/files/{encoded}/export"))?,
        None => Url::parse(&format!("{base}/files/{encoded}"))?,
    };

    {
        let mut pairs = url.query_pairs_mut();
        match export_mime {
            Some(mime) => pairs.append_pair("mimeType", mime),
            None => pairs.append_pair("alt", "media"),
        };
        pairs.append_pair("key", api_key);
    }

    Ok(url)
}

/// `files.list` across all drives, with only allow-listed caller keys.
pub fn list_url(base: &str, query: &ListQuery, api_key: &str) -> Result<Url, ProxyError> {
    let mut url = Url::parse(&format!("{base}/files"))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("supportsAllDrives", "true")
            .append_pair("includeItemsFromAllDrives", "true");

        let mut has_fields = false;
        for (key, value) in query.passthrough() {
            has_fields |= key == "fields";
            pairs.append_pair(key, value);
        }
        if !has_fields {
            pairs.append_pair("fields", DEFAULT_LIST_FIELDS);
        }

        pairs.append_pair("key", api_key);
    }

    Ok(url)
}

fn log_outcome(endpoint: Endpoint, result: &Result<ProxyResponse, ProxyError>) {
    match result {
        Ok(_) => {}
        Err(err @ ProxyError::Validation(_)) => {
            warn!(endpoint = %endpoint, error = %err, "rejected proxy request")
        }
        Err(err) => error!(endpoint = %endpoint, error = %err, "PROXY_ERROR"),
    }
}
