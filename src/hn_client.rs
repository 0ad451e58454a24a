use reqwest::blocking::Client;
use std::time::Duration;

use crate::error::FetchError;
use crate::models::{Page, SearchResponse, SearchTerm, StoryItem};

pub const DEFAULT_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search";
pub const DEFAULT_USER_AGENT: &str = concat!("hacker_stories/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the Hacker News search API.
///
/// Cheap to clone: the underlying connection pool is shared, so every
/// background request gets its own handle.
#[derive(Clone)]
pub struct HackerNewsClient {
    client: Client,
    endpoint: String,
}

impl HackerNewsClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(
            DEFAULT_ENDPOINT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_USER_AGENT,
        )
    }

    pub fn with_options(
        endpoint: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches one page of stories matching `term`.
    pub fn search(&self, term: &SearchTerm, page: Page) -> Result<Vec<StoryItem>, FetchError> {
        let page_param = page.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", term.as_str()), ("page", page_param.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let stories: Vec<StoryItem> = parsed.hits.into_iter().map(StoryItem::from).collect();
        tracing::debug!(term = %term, page, count = stories.len(), "search API answered");
        Ok(stories)
    }
}
