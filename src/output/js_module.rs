use crate::model::{BusinessRecord, OutputError, ReviewBook};
use crate::utils::{escape_template, js_identifier, js_string};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn header(query: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "// Generated for {} at {}\n",
        js_string(query),
        generated_at.to_rfc3339()
    )
}

fn quoted(value: &str) -> String {
    js_string(value)
}

/// `export const places = [...]`. `image` is written as a bare identifier (see `js_identifier`).
pub fn render_places(places: &[BusinessRecord], query: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = header(query, generated_at);
    out.push_str("export const places = [\n");

    for (i, p) in places.iter().enumerate() {
        out.push_str("  {\n");
        let _ = writeln!(out, "    id: {},", quoted(&p.id));
        let _ = writeln!(out, "    name: {},", quoted(&p.name));
        let _ = writeln!(out, "    address: {},", quoted(&p.address));
        let _ = writeln!(out, "    phone: {},", quoted(&p.phone));
        let _ = writeln!(out, "    hours: {},", quoted(&p.hours));
        let _ = writeln!(out, "    image: {},", js_identifier(&p.image_key));
        let _ = writeln!(out, "    website: {}", quoted(&p.website));
        out.push_str(if i + 1 < places.len() { "  },\n" } else { "  }\n" });
    }

    out.push_str("];\n");
    out
}

/// `export const reviews = {...}` keyed by business id.
pub fn render_reviews(reviews: &ReviewBook, query: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = header(query, generated_at);
    out.push_str("export const reviews = {\n");

    let total = reviews.len();
    for (i, (place_id, list)) in reviews.iter().enumerate() {
        let _ = writeln!(out, "  {}: [", quoted(place_id));
        for (j, r) in list.iter().enumerate() {
            out.push_str("    {\n");
            let _ = writeln!(out, "      snippet: `{}`,", escape_template(r.snippet.trim()));
            let _ = writeln!(out, "      author: {},", quoted(&r.author));
            let _ = writeln!(out, "      link: {}", quoted(&r.link));
            out.push_str(if j + 1 < list.len() { "    },\n" } else { "    }\n" });
        }
        out.push_str(if i + 1 < total { "  ],\n" } else { "  ]\n" });
    }

    out.push_str("};\n");
    out
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn stage(path: &Path, content: &str) -> Result<PathBuf, OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let staged = staging_path(path);
    fs::write(&staged, content).map_err(|source| OutputError::Write {
        path: staged.clone(),
        source,
    })?;
    Ok(staged)
}

fn commit(staged: &Path, path: &Path) -> Result<(), OutputError> {
    fs::rename(staged, path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders and stages both files before replacing either one.
pub fn write_outputs(
    places_path: &Path,
    reviews_path: &Path,
    places: &[BusinessRecord],
    reviews: &ReviewBook,
    query: &str,
) -> Result<(), OutputError> {
    let now = Utc::now();
    let places_js = render_places(places, query, now);
    let reviews_js = render_reviews(reviews, query, now);

    let staged_places = stage(places_path, &places_js)?;
    let staged_reviews = match stage(reviews_path, &reviews_js) {
        Ok(staged) => staged,
        Err(e) => {
            let _ = fs::remove_file(&staged_places);
            return Err(e);
        }
    };

    commit(&staged_places, places_path)?;
    info!("✅ {} written.", places_path.display());
    commit(&staged_reviews, reviews_path)?;
    info!("✅ {} written.", reviews_path.display());

    Ok(())
}
