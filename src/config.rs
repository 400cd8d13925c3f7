use crate::model::ConfigError;
use crate::normalizer::IdStyle;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    pub search_query: String,
    pub num_results: usize,
    pub language: String,
    pub id_style: IdStyle,
    pub scrape_logos: bool,
    pub logo_dir: PathBuf,
    pub places_path: PathBuf,
    pub reviews_path: PathBuf,
    pub review_limit: usize,
    pub fallback_review_link: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_query: "screen printing Vancouver".into(),
            num_results: 20,
            language: "en".into(),
            id_style: IdStyle::default(),
            scrape_logos: true,
            logo_dir: PathBuf::from("scraped_logos"),
            places_path: PathBuf::from("places.js"),
            reviews_path: PathBuf::from("reviews.js"),
            review_limit: 3,
            fallback_review_link: "https://google.com".into(),
            request_timeout_secs: 20,
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, std::env::var("SERPAPI_KEY").ok())?;
    Ok(config)
}

/// Parses the JSON config; `env_key` fills in an empty `api_key`.
pub fn parse_config(content: &str, env_key: Option<String>) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = serde_json::from_str(content)?;
    if config.api_key.trim().is_empty() {
        config.api_key = env_key.unwrap_or_default();
    }
    if config.api_key.trim().is_empty() {
        return Err(ConfigError::MissingApiKey);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg = parse_config(r#"{"api_key":"k"}"#, None).unwrap();
        assert_eq!(cfg.search_query, "screen printing Vancouver");
        assert_eq!(cfg.num_results, 20);
        assert_eq!(cfg.review_limit, 3);
        assert_eq!(cfg.id_style, IdStyle::Hyphen);
        assert!(cfg.scrape_logos);
        assert_eq!(cfg.request_timeout_secs, 20);
    }

    #[test]
    fn underscore_style_and_overrides() {
        let cfg = parse_config(
            r#"{"api_key":"k","id_style":"underscore","num_results":22,"scrape_logos":false}"#,
            None,
        )
        .unwrap();
        assert_eq!(cfg.id_style, IdStyle::Underscore);
        assert_eq!(cfg.num_results, 22);
        assert!(!cfg.scrape_logos);
    }

    #[test]
    fn api_key_falls_back_to_env() {
        let cfg = parse_config("{}", Some("from-env".into())).unwrap();
        assert_eq!(cfg.api_key, "from-env");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = parse_config("{}", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }
}
