// Logo resolution: fetch a business page, pick an image, save it to disk
use crate::model::{LogoCandidate, LogoError, LogoOutcome};
use crate::parser::{extract_images, select_candidate};
use crate::scraper::PageFetcher;
use crate::utils::file_extension;
use reqwest::Url;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DEFAULT_EXTENSION: &str = ".png";

pub struct LogoResolver<F: PageFetcher> {
    fetcher: F,
    output_dir: PathBuf,
}

impl<F: PageFetcher> LogoResolver<F> {
    pub fn new(fetcher: F, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Never returns an error: every failure becomes `LogoOutcome::Failed`.
    pub async fn resolve(&self, page_url: &str, name_base: &str) -> LogoOutcome {
        info!("🌐 Scraping logo from {}", page_url);
        match self.try_resolve(page_url, name_base).await {
            Ok(Some(path)) => {
                info!("🖼️ Logo saved: {}", path.display());
                LogoOutcome::Saved {
                    image_key: name_base.to_string(),
                    path,
                }
            }
            Ok(None) => {
                warn!("⚠️ No suitable image found on {}", page_url);
                LogoOutcome::NotFound
            }
            Err(e) => {
                warn!("❌ Error scraping logo from {}: {}", page_url, e);
                LogoOutcome::Failed(e)
            }
        }
    }

    async fn try_resolve(&self, page_url: &str, name_base: &str) -> Result<Option<PathBuf>, LogoError> {
        let base = Url::parse(page_url).map_err(|_| LogoError::InvalidUrl(page_url.to_string()))?;
        let html = self.fetcher.fetch_text(page_url).await?;

        let Some(candidate) = select_candidate(&base, &extract_images(&html)) else {
            return Ok(None);
        };
        debug!("Selected {:?} candidate {}", candidate.kind, candidate.url);

        let path = self.download(&candidate, name_base).await?;
        Ok(Some(path))
    }

    async fn download(&self, candidate: &LogoCandidate, name_base: &str) -> Result<PathBuf, LogoError> {
        let bytes = self.fetcher.fetch_bytes(candidate.url.as_str()).await?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self
            .output_dir
            .join(format!("{}{}", name_base, output_extension(&candidate.url)));
        tokio::fs::write(&path, &bytes).await?;

        Ok(path)
    }
}

/// Extension for the saved file; anything odd-looking becomes `.png`.
pub fn output_extension(url: &Url) -> String {
    match file_extension(url) {
        Some(ext) if ext.chars().count() <= 5 && ext != ".gif" => ext,
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::FetchError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory web: url -> body. Unknown urls fail like an unreachable host.
    #[derive(Default)]
    pub(crate) struct FakeWeb {
        pub pages: HashMap<String, Vec<u8>>,
        pub requested: Mutex<Vec<String>>,
    }

    impl FakeWeb {
        pub fn with(mut self, url: &str, body: &[u8]) -> Self {
            self.pages.insert(url.to_string(), body.to_vec());
            self
        }

        fn lookup(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::HttpError(format!("unreachable: {url}")))
        }
    }

    impl LogoResolver<FakeWeb> {
        pub fn fetcher_requests(&self) -> Vec<String> {
            self.fetcher.requested.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PageFetcher for FakeWeb {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            Ok(String::from_utf8_lossy(&self.lookup(url)?).into_owned())
        }

        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.lookup(url)
        }
    }

    #[test]
    fn extension_defaults() {
        let ext = |s: &str| output_extension(&Url::parse(s).unwrap());
        assert_eq!(ext("https://a.test/logo.svg?v=2"), ".svg");
        assert_eq!(ext("https://a.test/logo.webp"), ".webp");
        assert_eq!(ext("https://a.test/logo"), ".png");
        assert_eq!(ext("https://a.test/logo.php5image"), ".png");
        assert_eq!(ext("https://a.test/logo.GIF"), ".png");
    }

    #[tokio::test]
    async fn saves_logo_under_name_base() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("logos");
        let web = FakeWeb::default()
            .with("https://acme.test/", br#"<img src="/hero.jpg"><img src="/img/logo.svg?v=1">"#)
            .with("https://acme.test/img/logo.svg?v=1", b"<svg/>");
        let resolver = LogoResolver::new(web, &out);

        let outcome = resolver.resolve("https://acme.test/", "acme-screen").await;

        assert_eq!(outcome.image_key(), Some("acme-screen"));
        let saved = std::fs::read(out.join("acme-screen.svg")).unwrap();
        assert_eq!(saved, b"<svg/>");
    }

    #[tokio::test]
    async fn falls_back_to_first_image() {
        let dir = tempfile::tempdir().unwrap();
        let web = FakeWeb::default()
            .with("https://ink.test/", br#"<img src="/anim.gif"><img src="/team"><img src="/b.jpg">"#)
            .with("https://ink.test/team", b"JPEG");
        let resolver = LogoResolver::new(web, dir.path());

        let outcome = resolver.resolve("https://ink.test/", "ink").await;

        assert!(matches!(outcome, LogoOutcome::Saved { .. }));
        assert!(dir.path().join("ink.png").exists());
    }

    #[tokio::test]
    async fn gif_only_page_has_no_logo() {
        let dir = tempfile::tempdir().unwrap();
        let web = FakeWeb::default().with("https://gif.test/", br#"<img src="/logo.gif" alt="Logo">"#);
        let resolver = LogoResolver::new(web, dir.path());

        let outcome = resolver.resolve("https://gif.test/", "gif").await;

        assert!(matches!(outcome, LogoOutcome::NotFound));
        assert_eq!(resolver.fetcher_requests(), ["https://gif.test/"]);
    }

    #[tokio::test]
    async fn unreachable_page_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = LogoResolver::new(FakeWeb::default(), dir.path());

        let outcome = resolver.resolve("https://down.test/", "down").await;

        assert!(matches!(outcome, LogoOutcome::Failed(LogoError::Fetch(_))));
        assert!(outcome.image_key().is_none());
    }

    #[tokio::test]
    async fn image_download_failure_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let web = FakeWeb::default().with("https://acme.test/", br#"<img src="/logo.png">"#);
        let resolver = LogoResolver::new(web, dir.path());

        let outcome = resolver.resolve("https://acme.test/", "acme").await;

        assert!(matches!(outcome, LogoOutcome::Failed(_)));
        assert!(!dir.path().join("acme.png").exists());
    }

    #[tokio::test]
    async fn invalid_page_url() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = LogoResolver::new(FakeWeb::default(), dir.path());

        let outcome = resolver.resolve("not a url", "x").await;

        assert!(matches!(outcome, LogoOutcome::Failed(LogoError::InvalidUrl(_))));
    }
}
