// Module-source output consumed by the front end.

pub mod js_module;

pub use js_module::{render_places, render_reviews, write_outputs};
