mod aggregator;
mod config;
mod interactive;
mod logo;
mod model;
mod normalizer;
mod output;
mod parser;
mod scraper;
mod utils;

use aggregator::{AggregatorSettings, ResultAggregator};
use clap::{Parser, Subcommand};
use config::{load_config, AppConfig};
use crate::scraper::{HttpFetcher, SerpApiClient};
use logo::LogoResolver;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

/// Local business scraper: places, reviews and logos for a front end
#[derive(Parser)]
#[command(name = "places-scraper")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON config
    #[arg(long, default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, dedup and write places.js / reviews.js (default)
    Search,

    /// Read company URLs from stdin and save their logos
    Logos {
        /// Directory for the saved logos
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let cli = Cli::parse();
    match cli.command {
        None | Some(Commands::Search) => run_search(&cli.config).await,
        Some(Commands::Logos { out_dir, timeout }) => {
            run_logos(out_dir.unwrap_or_else(interactive::default_output_dir), timeout).await
        }
    }
}

async fn run_search(config_path: &str) {
    info!("Starting scraping run...");
    let config: AppConfig = match load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let (search, fetcher) = match (
        SerpApiClient::new(config.api_key.clone(), config.language.clone(), config.request_timeout_secs),
        HttpFetcher::new(config.request_timeout_secs),
    ) {
        (Ok(search), Ok(fetcher)) => (search, fetcher),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let resolver = LogoResolver::new(fetcher, &config.logo_dir);

    let settings = AggregatorSettings {
        num_results: config.num_results,
        id_style: config.id_style,
        scrape_logos: config.scrape_logos,
        review_limit: config.review_limit,
        fallback_review_link: config.fallback_review_link.clone(),
    };

    let run = match ResultAggregator::new(&search, &resolver, settings)
        .run(&config.search_query)
        .await
    {
        Ok(run) => run,
        Err(e) => {
            // Nothing is written when the search itself fails.
            error!("{}", e);
            return;
        }
    };

    if let Err(e) = output::write_outputs(
        &config.places_path,
        &config.reviews_path,
        &run.places,
        &run.reviews,
        &config.search_query,
    ) {
        error!("Output error: {}", e);
        return;
    }

    info!(
        "🎉 Done! {} unique brands, {} review sets, {} duplicates skipped, {} failed. Logos in: {}",
        run.places.len(),
        run.reviews.len(),
        run.duplicates,
        run.rejected,
        config.logo_dir.display()
    );
}

async fn run_logos(out_dir: PathBuf, timeout: u64) {
    let urls = match interactive::collect_urls(io::stdin().lock(), io::stdout()) {
        Ok(urls) => urls,
        Err(e) => {
            error!("Failed to read input: {}", e);
            return;
        }
    };

    let fetcher = match HttpFetcher::new(timeout) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let resolver = LogoResolver::new(fetcher, out_dir);
    interactive::scrape_logos(&resolver, &urls).await;
}
