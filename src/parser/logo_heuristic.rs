use crate::model::ImageRef;

/// Case-insensitive substring test on alt text, class list and raw `src`.
pub fn is_likely_logo(img: &ImageRef) -> bool {
    let alt = img.alt.as_deref().unwrap_or("").to_lowercase();
    let classes = img.classes.join(" ").to_lowercase();
    let src = img.src.as_deref().unwrap_or("").to_lowercase();

    alt.contains("logo") || classes.contains("logo") || src.contains("logo") || classes.contains("brand")
}
