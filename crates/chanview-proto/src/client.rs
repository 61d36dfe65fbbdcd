//! HTTP client for the channel backend.
//!
//! Two read-only endpoints, both answering with a JSON array of [`Channel`]:
//! `GET /channels?page=N` and `GET /search?query=Q`.

use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::config::BackendConfig;
use crate::protocol::{Channel, ChannelQuery};

pub use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid backend url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(StatusCode),
    #[error("malformed channel list: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ChannelClient {
    http: reqwest::Client,
    channels_url: Url,
    search_url: Url,
    sort_by: Option<String>,
    group_by: Option<String>,
}

impl ChannelClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            channels_url: endpoint(&config.base_url, "channels")?,
            search_url: endpoint(&config.base_url, "search")?,
            sort_by: config.sort_by.clone(),
            group_by: config.group_by.clone(),
        })
    }

    pub async fn fetch(&self, query: &ChannelQuery) -> Result<Vec<Channel>, ApiError> {
        match query {
            ChannelQuery::Page(page) => self.fetch_page(*page).await,
            ChannelQuery::Search(q) => self.search(q).await,
        }
    }

    /// One page of the browse view.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Channel>, ApiError> {
        let mut params: Vec<(&str, String)> = vec![("page", page.to_string())];
        if let Some(sort_by) = &self.sort_by {
            params.push(("sort_by", sort_by.clone()));
        }
        if let Some(group_by) = &self.group_by {
            params.push(("group_by", group_by.clone()));
        }
        let request = self.http.get(self.channels_url.clone()).query(&params);
        self.send(request).await
    }

    /// Name search. The query string is percent-encoded by the request builder.
    pub async fn search(&self, query: &str) -> Result<Vec<Channel>, ApiError> {
        let request = self
            .http
            .get(self.search_url.clone())
            .query(&[("query", query)]);
        self.send(request).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<Channel>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} -> {}", response.url(), status);
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, ApiError> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| ApiError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}
