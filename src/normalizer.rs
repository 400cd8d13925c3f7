use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

const HOURS_UNAVAILABLE: &str = "Hours not available";

/// How a business name is turned into its id / logo file base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStyle {
    /// `Acme Screen Co.` -> `acme-screen-co`
    #[default]
    Hyphen,
    /// `Acme Screen Co.` -> `acme_screen_co_`
    Underscore,
}

pub fn format_hours(raw: Option<&str>) -> String {
    match raw {
        None | Some("N/A") => HOURS_UNAVAILABLE.to_string(),
        Some(hours) if hours.is_empty() => HOURS_UNAVAILABLE.to_string(),
        Some(hours) => hours
            .replace('\u{22c5}', "|")
            .replace('\u{202f}', " ")
            .trim()
            .to_string(),
    }
}

/// First two normalized words of the name, concatenated. Used only for dedup.
pub fn extract_brand_key(name: &str) -> String {
    let cleaned = NON_WORD.replace_all(name, " ").to_lowercase();
    cleaned.split_whitespace().take(2).collect()
}

pub fn generate_id(name: &str, style: IdStyle) -> String {
    let lowered = name.to_lowercase();
    let lowered = lowered.trim();
    match style {
        IdStyle::Hyphen => NON_WORD
            .replace_all(lowered, "-")
            .trim_matches('-')
            .to_string(),
        IdStyle::Underscore => NON_WORD.replace_all(lowered, "_").into_owned(),
    }
}
