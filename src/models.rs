use std::fmt;

use bytes::Bytes;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};

/// Query string as sent, in arrival order, repeated keys included.
pub type QueryPairs = Vec<(String, String)>;

/// First non-empty value of `key`; later repeats are ignored.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, value)| name == key && !value.is_empty())
        .map(|(_, value)| value.clone())
}

/// Query of `/drive`: one file's content, or an export of a Google-native file.
#[derive(Debug, Default, Clone)]
pub struct FileQuery {
    pub file_id: Option<String>,
    pub export_mime: Option<String>,
}

impl FileQuery {
    pub fn from_pairs(pairs: QueryPairs) -> Self {
        Self {
            file_id: first_value(&pairs, "fileId"),
            export_mime: first_value(&pairs, "exportMime"),
        }
    }
}

/// Query of `/driveList`. Keys not named here never reach the upstream call.
#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    pub q: Option<String>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
    pub page_size: Option<String>,
    pub page_token: Option<String>,
    pub spaces: Option<String>,
}

impl ListQuery {
    pub fn from_pairs(pairs: QueryPairs) -> Self {
        Self {
            q: first_value(&pairs, "q"),
            order_by: first_value(&pairs, "orderBy"),
            fields: first_value(&pairs, "fields"),
            page_size: first_value(&pairs, "pageSize"),
            page_token: first_value(&pairs, "pageToken"),
            spaces: first_value(&pairs, "spaces"),
        }
    }

    /// Allow-listed keys with their non-empty values, in upstream parameter naming.
    pub fn passthrough(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("q", &self.q),
            ("orderBy", &self.order_by),
            ("fields", &self.fields),
            ("pageSize", &self.page_size),
            ("pageToken", &self.page_token),
            ("spaces", &self.spaces),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
    }
}

/// What comes back from Drive, relayed without looking inside.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }

    pub fn with_detail(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: Some(detail.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub ok: bool,
    pub path: String,
}

/// Tag attached to log events of a proxied endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Drive,
    DriveList,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Drive => write!(f, "drive"),
            Self::DriveList => write!(f, "driveList"),
        }
    }
}
