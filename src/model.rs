// Core structs: raw search results, business records, reviews, outcomes and errors
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// One entry of the search API's `local_results` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlace {
    pub title: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub website: Option<String>,
    /// Opaque detail identifier used to request reviews.
    pub data_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReviewUser {
    pub name: Option<String>,
}

/// One entry of the reviews API's `reviews` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReview {
    pub snippet: Option<String>,
    pub user: Option<RawReviewUser>,
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub local_results: Option<Vec<RawPlace>>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
    pub website: String,
    /// Logo asset name, or the record's own id when no logo was saved.
    pub image_key: String,
}

/// A review as collected; escaping happens at serialization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSnippet {
    pub snippet: String,
    pub author: String,
    pub link: String,
}

/// Review lists keyed by business id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewBook {
    entries: Vec<(String, Vec<ReviewSnippet>)>,
}

impl ReviewBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts unless the id is already present; returns whether it was inserted.
    pub fn insert(&mut self, id: &str, reviews: Vec<ReviewSnippet>) -> bool {
        if self.get(id).is_some() {
            return false;
        }
        self.entries.push((id.to_string(), reviews));
        true
    }

    pub fn get(&self, id: &str) -> Option<&[ReviewSnippet]> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, reviews)| reviews.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReviewSnippet])> {
        self.entries
            .iter()
            .map(|(key, reviews)| (key.as_str(), reviews.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Attributes of one `<img>` element, as they appear in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Logo,
    Fallback,
}

/// An absolute image URL picked while scanning a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoCandidate {
    pub url: reqwest::Url,
    pub kind: CandidateKind,
}

#[derive(Debug)]
pub enum LogoOutcome {
    Saved { image_key: String, path: PathBuf },
    NotFound,
    Failed(LogoError),
}

impl LogoOutcome {
    pub fn image_key(&self) -> Option<&str> {
        match self {
            LogoOutcome::Saved { image_key, .. } => Some(image_key),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum BusinessOutcome {
    Accepted {
        record: BusinessRecord,
        reviews: Vec<ReviewSnippet>,
    },
    DuplicateBrand {
        name: String,
        brand_key: String,
    },
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    InvalidResponse(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::HttpError(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no local_results in search response:\n{0}")]
    MissingResults(String),
    #[error("result has no detail identifier")]
    MissingDetailId,
}

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("invalid url {0}")]
    InvalidUrl(String),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no API key in config or SERPAPI_KEY")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(text: &str) -> ReviewSnippet {
        ReviewSnippet {
            snippet: text.into(),
            author: "Anonymous".into(),
            link: "https://google.com".into(),
        }
    }

    #[test]
    fn review_book_first_writer_wins() {
        let mut book = ReviewBook::new();
        assert!(book.insert("acme", vec![review("first")]));
        assert!(!book.insert("acme", vec![review("second")]));
        assert_eq!(book.len(), 1);
        assert_eq!(book.get("acme").unwrap()[0].snippet, "first");
    }

    #[test]
    fn review_book_keeps_insertion_order() {
        let mut book = ReviewBook::new();
        book.insert("zeta", vec![]);
        book.insert("alpha", vec![]);
        let keys: Vec<&str> = book.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn search_response_tolerates_missing_fields() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"local_results":[{"title":"Acme"}]}"#).unwrap();
        let places = resp.local_results.unwrap();
        assert_eq!(places[0].title.as_deref(), Some("Acme"));
        assert!(places[0].website.is_none());

        let empty: SearchResponse = serde_json::from_str(r#"{"error":"quota"}"#).unwrap();
        assert!(empty.local_results.is_none());
    }

    #[test]
    fn reviews_response_defaults_to_empty() {
        let resp: ReviewsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.reviews.is_empty());
    }
}
