use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/items/";

const USER_AGENT: &str = concat!("itemdesk/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server replied with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True when the request never produced a usable reply from the server.
    ///
    /// Everything else (bad status, garbage body) means the server answered
    /// and we didn't like what it said.
    pub fn is_transport(&self) -> bool {
        match self {
            ApiError::Network(e) => !e.is_decode() && !e.is_status(),
            ApiError::InvalidUrl(_) => true,
            ApiError::Status { .. } | ApiError::Decode(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Server-assigned identifier. The backend is free to use integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ApiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiId::Number(n) => write!(f, "{}", n),
            ApiId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Item as the backend returns it. Extra fields (description, created_at)
/// are dropped on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiItem {
    pub id: ApiId,
    pub name: String,
    pub category: String,
}

/// Request body for create and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPayload {
    pub name: String,
    pub category: String,
}

pub struct ItemsClient {
    client: reqwest::Client,
    base_url: String,
}

impl ItemsClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, None)
    }

    /// Same as `new`, but every request gives up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}` - the whole collection, in server order
    pub async fn list_items(&self) -> Result<Vec<ApiItem>> {
        debug!("GET {}", self.base_url);
        let response = self.client.get(&self.base_url).send().await?;
        decode(response).await
    }

    /// `GET {base}?search=...` - the backend matches the query against name and category
    pub async fn search_items(&self, query: &str) -> Result<Vec<ApiItem>> {
        debug!("GET {}?search={}", self.base_url, query);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("search", query)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_item(&self, payload: &ItemPayload) -> Result<ApiItem> {
        debug!("POST {}", self.base_url);
        let response = self
            .client
            .post(&self.base_url)
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_item(&self, id: &str, payload: &ItemPayload) -> Result<ApiItem> {
        let url = self.item_url(id);
        debug!("PUT {}", url);
        let response = self.client.put(&url).json(payload).send().await?;
        decode(response).await
    }

    /// The response body is ignored; any 2xx counts as deleted.
    pub async fn delete_item(&self, id: &str) -> Result<()> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}{}/", self.base_url, urlencoding::encode(id))
    }
}

/// Collapse trailing slashes to exactly one so `{base}{id}/` always joins cleanly
fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ApiError::InvalidUrl(base_url.to_string()));
    }

    let normalized = format!("{}/", trimmed);
    let parsed = reqwest::Url::parse(&normalized)
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if parsed.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(base_url.to_string()));
    }

    Ok(normalized)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
