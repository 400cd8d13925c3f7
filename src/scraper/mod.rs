// Network collaborators: page/image fetching and the search API.

pub mod fetcher;
pub mod serpapi;
pub mod traits;

pub use fetcher::HttpFetcher;
pub use serpapi::SerpApiClient;
pub use traits::{PageFetcher, SearchApi};
