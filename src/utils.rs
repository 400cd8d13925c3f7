// Utility functions
use reqwest::Url;
use std::net::IpAddr;

const JS_RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Extension of the last path segment, lowercased and including the dot.
/// Query and fragment never count; leading dots do not start an extension.
pub fn file_extension(url: &Url) -> Option<String> {
    let segment = url.path().rsplit('/').next().unwrap_or("");
    let name = segment.trim_start_matches('.');
    let dot = name.rfind('.')?;
    Some(name[dot..].to_lowercase())
}

/// Escapes a value as a double-quoted JavaScript string literal, quotes included.
pub fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Turns an image key into a bare JavaScript identifier.
/// Anything but letters, digits, `_` and `$` becomes `_`; an empty key, a leading digit
/// or a reserved word gets a `_` prefix.
pub fn js_identifier(key: &str) -> String {
    let mut ident: String = key
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    let needs_prefix = ident.is_empty()
        || ident.starts_with(|c: char| c.is_numeric())
        || JS_RESERVED.contains(&ident.as_str());
    if needs_prefix {
        ident.insert(0, '_');
    }
    ident
}

/// Escapes a value for a backtick template literal.
pub fn escape_template(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Registrable domain label of a URL: `https://www.acme.co.uk/x` -> `acme`.
/// Hosts without a public suffix (`localhost`, IPs) are returned whole.
pub fn domain_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.trim_end_matches('.').to_lowercase();
    if host.is_empty() {
        return None;
    }
    if host.trim_matches(|c| c == '[' || c == ']').parse::<IpAddr>().is_ok() {
        return Some(host);
    }

    match (psl::domain_str(&host), psl::suffix_str(&host)) {
        (Some(domain), Some(suffix)) => domain
            .strip_suffix(suffix)
            .map(|label| label.trim_end_matches('.'))
            .filter(|label| !label.is_empty())
            .map(String::from),
        _ => Some(host),
    }
}
