// HTML parsing: image references on a business page and logo classification.

pub mod image_parser;
pub mod logo_heuristic;

pub use image_parser::{extract_images, select_candidate};
pub use logo_heuristic::is_likely_logo;
