// SerpApi Google Maps search and reviews
use crate::model::{FetchError, RawPlace, RawReview, ReviewsResponse, SearchError, SearchResponse};
use crate::scraper::fetcher::build_client;
use crate::scraper::traits::SearchApi;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub const SEARCH_ENDPOINT: &str = "https://serpapi.com/search.json";

pub struct SerpApiClient {
    pub client: Client,
    api_key: String,
    language: String,
    endpoint: String,
}

impl SerpApiClient {
    pub fn new(api_key: String, language: String, timeout_secs: u64) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            api_key,
            language,
            endpoint: SEARCH_ENDPOINT.to_string(),
        })
    }

    fn places_params<'a>(&'a self, query: &'a str) -> Vec<(&'static str, &'a str)> {
        vec![
            ("engine", "google_maps"),
            ("q", query),
            ("type", "search"),
            ("hl", self.language.as_str()),
            ("api_key", self.api_key.as_str()),
        ]
    }

    fn reviews_params<'a>(&'a self, detail_id: &'a str) -> Vec<(&'static str, &'a str)> {
        vec![
            ("engine", "google_maps_reviews"),
            ("data_id", detail_id),
            ("hl", self.language.as_str()),
            ("api_key", self.api_key.as_str()),
        ]
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<Value, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(params)
            .send()
            .await
            .map_err(FetchError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::from)?;
        debug!("search api responded [{}] with {} bytes", status, body.len());

        // API failures arrive as JSON `{"error": ...}` bodies and are passed on for the diagnostic.
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => {
                Err(FetchError::InvalidResponse(status.as_u16()).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Pulls `local_results` out of a search response body.
pub fn parse_places(body: Value) -> Result<Vec<RawPlace>, SearchError> {
    let diagnostic = serde_json::to_string_pretty(&body).unwrap_or_default();
    let response: SearchResponse = serde_json::from_value(body)?;
    response
        .local_results
        .ok_or(SearchError::MissingResults(diagnostic))
}

pub fn parse_reviews(body: Value) -> Result<Vec<RawReview>, SearchError> {
    let response: ReviewsResponse = serde_json::from_value(body)?;
    Ok(response.reviews)
}

#[async_trait::async_trait]
impl SearchApi for SerpApiClient {
    async fn search_places(&self, query: &str) -> Result<Vec<RawPlace>, SearchError> {
        let body = self.get_json(&self.places_params(query)).await?;
        parse_places(body)
    }

    async fn fetch_reviews(&self, detail_id: &str) -> Result<Vec<RawReview>, SearchError> {
        let body = self.get_json(&self.reviews_params(detail_id)).await?;
        parse_reviews(body)
    }
}
