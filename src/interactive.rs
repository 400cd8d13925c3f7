// Interactive variant: read company URLs from the user, save one logo per domain
use crate::logo::LogoResolver;
use crate::model::LogoOutcome;
use crate::scraper::PageFetcher;
use crate::utils::domain_name;
use directories::UserDirs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

const DONE: &str = "done";
pub const INVALID_URL_HINT: &str = "Please enter a valid URL starting with http or https.";

/// `<Documents>/ScrapedLogos`, or `./ScrapedLogos` when there is no documents dir.
pub fn default_output_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|d| d.to_path_buf()))
        .unwrap_or_default()
        .join("ScrapedLogos")
}

/// Prompts until `done` or end of input; lines not starting with `http` are re-prompted.
pub fn collect_urls<R: BufRead, W: Write>(input: R, mut prompt: W) -> io::Result<Vec<String>> {
    writeln!(prompt, "Enter company URLs one by one. Type '{}' when finished:\n", DONE)?;
    let mut urls = Vec::new();
    let mut lines = input.lines();

    loop {
        write!(prompt, "Enter URL: ")?;
        prompt.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let entry = line.trim();

        if entry.eq_ignore_ascii_case(DONE) {
            break;
        } else if entry.starts_with("http") {
            urls.push(entry.to_string());
        } else {
            writeln!(prompt, "{}", INVALID_URL_HINT)?;
        }
    }

    Ok(urls)
}

/// Resolves a logo for each URL, named after its domain. Returns how many were saved.
pub async fn scrape_logos<F: PageFetcher>(resolver: &LogoResolver<F>, urls: &[String]) -> usize {
    info!("Starting logo scraping...");
    let mut saved = 0;

    for url in urls {
        let Some(company) = domain_name(url) else {
            warn!("[!] Cannot derive a company name from {}", url);
            continue;
        };

        match resolver.resolve(url, &company).await {
            LogoOutcome::Saved { path, .. } => {
                info!("[✓] Downloaded logo for {}: {}", company, path.display());
                saved += 1;
            }
            LogoOutcome::NotFound => warn!("[x] No logo found for {}", company),
            LogoOutcome::Failed(e) => warn!("[!] Error scraping {}: {}", url, e),
        }
    }

    info!("All done! Logos saved to: {}", resolver.output_dir().display());
    saved
}
