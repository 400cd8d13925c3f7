use crate::model::{FetchError, RawPlace, RawReview, SearchError};

#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[async_trait::async_trait]
pub trait SearchApi: Send + Sync {
    /// Runs the business search. A response without results is `SearchError::MissingResults`.
    async fn search_places(&self, query: &str) -> Result<Vec<RawPlace>, SearchError>;
    async fn fetch_reviews(&self, detail_id: &str) -> Result<Vec<RawReview>, SearchError>;
}
