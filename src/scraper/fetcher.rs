use crate::model::FetchError;
use crate::scraper::traits::PageFetcher;

use reqwest::Client;
use std::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0";

pub struct HttpFetcher {
    pub client: Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::InvalidResponse(response.status().as_u16()));
        }

        Ok(response)
    }
}

/// Shared client setup: browser-like user agent and a fixed per-request timeout.
pub fn build_client(timeout_secs: u64) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| FetchError::HttpError(e.to_string()))
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
