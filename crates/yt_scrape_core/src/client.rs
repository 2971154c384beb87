use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::errors::ScrapeError;
use crate::models::{
    ApiErrorEnvelope, ChannelItem, CommentThreadItem, ListResponse, SearchItem, VideoItem,
};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
pub const DEFAULT_SERVICE_NAME: &str = "youtube";
pub const DEFAULT_API_VERSION: &str = "v3";
pub const COMMENT_PAGE_SIZE: u32 = 100;

const USER_AGENT: &str = concat!("yt_scrape_core/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub service_name: String,
    pub api_version: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// `channels.list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelsList {
    pub part: String,
    pub id: String,
}

/// `search.list`, restricted to videos of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchList {
    pub part: String,
    pub channel_id: String,
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
}

/// `videos.list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideosList {
    pub part: String,
    pub id: String,
}

/// `commentThreads.list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThreadsList {
    pub part: String,
    pub video_id: String,
    pub max_results: u32,
    pub page_token: Option<String>,
}

impl ChannelsList {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("part", self.part.clone()), ("id", self.id.clone())]
    }
}

impl SearchList {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("part", self.part.clone()),
            ("channelId", self.channel_id.clone()),
            ("type", "video".to_string()),
        ];
        if let Some(max_results) = self.max_results {
            params.push(("maxResults", max_results.to_string()));
        }
        if let Some(token) = &self.page_token {
            params.push(("pageToken", token.clone()));
        }
        params
    }
}

impl VideosList {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("part", self.part.clone()), ("id", self.id.clone())]
    }
}

impl CommentThreadsList {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("part", self.part.clone()),
            ("videoId", self.video_id.clone()),
            ("maxResults", self.max_results.to_string()),
        ];
        if let Some(token) = &self.page_token {
            params.push(("pageToken", token.clone()));
        }
        params
    }
}

/// The resource collections the fetchers read from.
///
/// Each call returns one decoded page; following `next_page_token` is up to the caller.
#[allow(async_fn_in_trait)]
pub trait YouTubeApi {
    async fn list_channels(
        &self,
        request: &ChannelsList,
    ) -> Result<ListResponse<ChannelItem>, ScrapeError>;

    async fn search(&self, request: &SearchList) -> Result<ListResponse<SearchItem>, ScrapeError>;

    async fn list_videos(&self, request: &VideosList)
        -> Result<ListResponse<VideoItem>, ScrapeError>;

    async fn list_comment_threads(
        &self,
        request: &CommentThreadsList,
    ) -> Result<ListResponse<CommentThreadItem>, ScrapeError>;
}

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_root: Url,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(options: ClientOptions) -> Result<Self, ScrapeError> {
        if options.api_key.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("API key is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(ScrapeError::Request)?;

        let api_root = api_root(&options)?;
        Ok(Self {
            client,
            api_root,
            api_key: options.api_key,
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ScrapeError> {
        let url = self
            .api_root
            .join(resource)
            .map_err(|err| ScrapeError::InvalidConfig(format!("bad endpoint {resource}: {err}")))?;
        debug!(%url, ?params, "GET");

        let mut req = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())]);
        for (k, v) in params {
            req = req.query(&[(k, v.as_str())]);
        }
        let response = req.send().await.map_err(ScrapeError::Request)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ScrapeError::Request)?;
        if !status.is_success() {
            let message = match serde_json::from_slice::<ApiErrorEnvelope>(&bytes) {
                Ok(envelope) => envelope.error.message,
                Err(_) => String::from_utf8_lossy(&bytes).trim().to_string(),
            };
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_slice(&bytes).map_err(|err| ScrapeError::Decode {
            endpoint: resource.to_string(),
            message: err.to_string(),
        })
    }
}

impl YouTubeApi for YouTubeClient {
    async fn list_channels(
        &self,
        request: &ChannelsList,
    ) -> Result<ListResponse<ChannelItem>, ScrapeError> {
        self.request("channels", &request.query()).await
    }

    async fn search(&self, request: &SearchList) -> Result<ListResponse<SearchItem>, ScrapeError> {
        self.request("search", &request.query()).await
    }

    async fn list_videos(
        &self,
        request: &VideosList,
    ) -> Result<ListResponse<VideoItem>, ScrapeError> {
        self.request("videos", &request.query()).await
    }

    async fn list_comment_threads(
        &self,
        request: &CommentThreadsList,
    ) -> Result<ListResponse<CommentThreadItem>, ScrapeError> {
        self.request("commentThreads", &request.query()).await
    }
}

// `{base_url}/{service_name}/{api_version}/`, with the trailing slash so that
// resource names join underneath instead of replacing the version segment.
fn api_root(options: &ClientOptions) -> Result<Url, ScrapeError> {
    let base = format!("{}/", options.base_url.trim_end_matches('/'));
    let base = Url::parse(&base)
        .map_err(|err| ScrapeError::InvalidConfig(format!("invalid base URL {base}: {err}")))?;
    base.join(&format!(
        "{}/{}/",
        options.service_name.trim_matches('/'),
        options.api_version.trim_matches('/')
    ))
    .map_err(|err| ScrapeError::InvalidConfig(format!("invalid API path: {err}")))
}
