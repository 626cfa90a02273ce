//! Target URL normalization.

use reqwest::Url;

/// Validate a Vault address and strip trailing slashes.
///
/// Used as a clap value parser, hence the `String` error.
pub fn normalize_target(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("target URL cannot be empty".into());
    }
    let url = Url::parse(trimmed).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "unsupported scheme '{}' (use http or https)",
            url.scheme()
        ));
    }
    if url.host_str().is_none() {
        return Err(format!("missing host in '{}'", raw));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("target URL must not carry a query or fragment".into());
    }
    Ok(trimmed.to_string())
}
