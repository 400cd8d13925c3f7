// Per-business loop: dedup by brand, build records, resolve logos, collect reviews
use crate::logo::LogoResolver;
use crate::model::{
    BusinessOutcome, BusinessRecord, RawPlace, RawReview, ReviewBook, ReviewSnippet, SearchError,
};
use crate::normalizer::{extract_brand_key, format_hours, generate_id, IdStyle};
use crate::scraper::{PageFetcher, SearchApi};
use std::collections::HashSet;
use tracing::{info, warn};

const MISSING: &str = "N/A";
const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    pub num_results: usize,
    pub id_style: IdStyle,
    pub scrape_logos: bool,
    pub review_limit: usize,
    pub fallback_review_link: String,
}

/// Everything one run produces.
#[derive(Debug, Default)]
pub struct RunOutput {
    pub places: Vec<BusinessRecord>,
    pub reviews: ReviewBook,
    pub duplicates: usize,
    pub rejected: usize,
}

pub struct ResultAggregator<'a, S: SearchApi, F: PageFetcher> {
    search: &'a S,
    resolver: &'a LogoResolver<F>,
    settings: AggregatorSettings,
    seen_brands: HashSet<String>,
}

impl<'a, S: SearchApi, F: PageFetcher> ResultAggregator<'a, S, F> {
    pub fn new(search: &'a S, resolver: &'a LogoResolver<F>, settings: AggregatorSettings) -> Self {
        Self {
            search,
            resolver,
            settings,
            seen_brands: HashSet::new(),
        }
    }

    /// Queries the search API and processes the results. Only a failed search is an error.
    pub async fn run(mut self, query: &str) -> Result<RunOutput, SearchError> {
        info!("🔍 Querying Google Maps for: '{}'", query);
        let results = self.search.search_places(query).await?;
        info!(
            "Found {} local results. Processing up to {}...",
            results.len(),
            self.settings.num_results
        );
        Ok(self.process_all(results).await)
    }

    pub async fn process_all(&mut self, results: Vec<RawPlace>) -> RunOutput {
        let mut output = RunOutput::default();
        let limit = self.settings.num_results;

        for (idx, raw) in results.into_iter().take(limit).enumerate() {
            match self.process_one(idx + 1, raw).await {
                BusinessOutcome::Accepted { record, reviews } => {
                    if !output.reviews.insert(&record.id, reviews) {
                        warn!("⚠️ Id '{}' already has reviews, keeping the first set", record.id);
                    }
                    output.places.push(record);
                }
                BusinessOutcome::DuplicateBrand { name, brand_key } => {
                    info!("⚠️ Skipping duplicate brand: {} ({})", name, brand_key);
                    output.duplicates += 1;
                }
                BusinessOutcome::Rejected(reason) => {
                    warn!("❌ Error on result {}: {}", idx + 1, reason);
                    output.rejected += 1;
                }
            }
        }

        output
    }

    /// Processes one raw result; `position` is 1-based and only used for logging.
    pub async fn process_one(&mut self, position: usize, raw: RawPlace) -> BusinessOutcome {
        let Some(name) = raw.title.clone() else {
            return BusinessOutcome::Rejected("result has no title".into());
        };
        info!("➡️ {}. {}", position, name);

        let id = generate_id(&name, self.settings.id_style);
        let brand_key = extract_brand_key(&name);
        if !self.seen_brands.insert(brand_key.clone()) {
            return BusinessOutcome::DuplicateBrand { name, brand_key };
        }

        let website = raw.website.clone().unwrap_or_else(|| MISSING.to_string());
        let image_key = self.logo_key(&website, &id).await;

        let record = BusinessRecord {
            id,
            address: raw.address.clone().unwrap_or_else(|| MISSING.to_string()),
            phone: raw.phone.clone().unwrap_or_else(|| MISSING.to_string()),
            hours: format_hours(raw.hours.as_deref()),
            website,
            image_key,
            name,
        };

        info!("📝 Getting reviews for {}", record.name);
        let reviews = match self.reviews_for(&raw).await {
            Ok(reviews) => {
                info!("Got {} reviews", reviews.len());
                reviews
            }
            Err(e) => {
                warn!("❌ Reviews unavailable for {}: {}", record.name, e);
                Vec::new()
            }
        };

        BusinessOutcome::Accepted { record, reviews }
    }

    async fn logo_key(&self, website: &str, id: &str) -> String {
        if !self.settings.scrape_logos || !website.starts_with("http") {
            return id.to_string();
        }
        self.resolver
            .resolve(website, id)
            .await
            .image_key()
            .unwrap_or(id)
            .to_string()
    }

    async fn reviews_for(&self, raw: &RawPlace) -> Result<Vec<ReviewSnippet>, SearchError> {
        let detail_id = raw.data_id.as_deref().ok_or(SearchError::MissingDetailId)?;
        let raw_reviews = self.search.fetch_reviews(detail_id).await?;
        Ok(raw_reviews
            .into_iter()
            .take(self.settings.review_limit)
            .map(|r| self.to_snippet(r))
            .collect())
    }

    fn to_snippet(&self, review: RawReview) -> ReviewSnippet {
        ReviewSnippet {
            snippet: review.snippet.unwrap_or_default(),
            author: review
                .user
                .and_then(|u| u.name)
                .unwrap_or_else(|| ANONYMOUS.to_string()),
            link: review
                .link
                .unwrap_or_else(|| self.settings.fallback_review_link.clone()),
        }
    }
}
