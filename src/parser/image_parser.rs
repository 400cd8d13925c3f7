// Image reference extraction and logo candidate selection
use crate::model::{CandidateKind, ImageRef, LogoCandidate};
use crate::parser::logo_heuristic::is_likely_logo;
use crate::utils::file_extension;
use ::scraper::{Html, Selector};
use reqwest::Url;
use tracing::debug;

/// Every `<img>` in document order.
pub fn extract_images(html: &str) -> Vec<ImageRef> {
    let document = Html::parse_document(html);
    let img_selector = Selector::parse("img").unwrap();

    document
        .select(&img_selector)
        .map(|element| {
            let node = element.value();
            ImageRef {
                src: node.attr("src").map(String::from),
                alt: node.attr("alt").map(String::from),
                classes: node.classes().map(String::from).collect(),
            }
        })
        .collect()
}

/// First heuristic match wins; otherwise the first usable image. GIFs are never picked.
pub fn select_candidate(page_url: &Url, images: &[ImageRef]) -> Option<LogoCandidate> {
    let mut fallback: Option<Url> = None;

    for img in images {
        let Some(src) = img.src.as_deref().filter(|s| !s.is_empty()) else {
            continue;
        };

        let url = match page_url.join(src) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping unresolvable image src {:?}: {}", src, e);
                continue;
            }
        };

        if file_extension(&url).as_deref() == Some(".gif") {
            continue;
        }

        if is_likely_logo(img) {
            return Some(LogoCandidate {
                url,
                kind: CandidateKind::Logo,
            });
        }

        if fallback.is_none() {
            fallback = Some(url);
        }
    }

    fallback.map(|url| LogoCandidate {
        url,
        kind: CandidateKind::Fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://acme.test/shop/index.html").unwrap()
    }

    fn pick(html: &str) -> Option<LogoCandidate> {
        select_candidate(&page(), &extract_images(html))
    }

    #[test]
    fn extracts_attributes_in_order() {
        let images = extract_images(
            r#"<html><body>
                <img src="/a.png" alt="First" class="hero wide">
                <img alt="no source">
                <IMG SRC="b.jpg">
            </body></html>"#,
        );
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].src.as_deref(), Some("/a.png"));
        assert_eq!(images[0].classes, ["hero", "wide"]);
        assert!(images[1].src.is_none());
        assert_eq!(images[2].src.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn resolves_relative_sources() {
        let c = pick(r#"<img src="img/logo.png">"#).unwrap();
        assert_eq!(c.url.as_str(), "https://acme.test/shop/img/logo.png");
        assert_eq!(c.kind, CandidateKind::Logo);
    }

    #[test]
    fn logo_beats_earlier_fallback() {
        let c = pick(r#"<img src="/hero.jpg" alt="hero banner"><img src="/mark.svg" alt="Acme Logo">"#).unwrap();
        assert_eq!(c.url.path(), "/mark.svg");
        assert_eq!(c.kind, CandidateKind::Logo);
    }

    #[test]
    fn first_logo_wins() {
        let c = pick(r#"<img src="/one.png" class="brand"><img src="/logo-two.png">"#).unwrap();
        assert_eq!(c.url.path(), "/one.png");
    }

    #[test]
    fn fallback_is_first_non_gif_image() {
        let c = pick(r#"<img src="/spacer.gif"><img src=""><img src="/team.jpg"><img src="/shop.jpg">"#).unwrap();
        assert_eq!(c.url.path(), "/team.jpg");
        assert_eq!(c.kind, CandidateKind::Fallback);
    }

    #[test]
    fn gif_logo_is_never_selected() {
        assert!(pick(r#"<img src="/logo.gif" alt="Logo"><img src="/LOADER.GIF?x=1">"#).is_none());
    }

    #[test]
    fn no_images_no_candidate() {
        assert!(pick("<p>nothing here</p>").is_none());
    }
}
