use url::Url;
use url::form_urlencoded::Serializer;

use crate::error::{Error, Result};

/// Appends `params` to `path` as an urlencoded query string.
///
/// An empty parameter list leaves `path` untouched.
pub(crate) fn append_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let mut query = Serializer::new(String::new());
    for (k, v) in params {
        query.append_pair(k, v);
    }
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, sep, query.finish())
}

/// Accepts absolute `http`/`https` URLs with a host.
pub(crate) fn validate_api_url(value: &str) -> Result<()> {
    let invalid = |reason: String| Error::InvalidUrl {
        url: value.to_string(),
        reason,
    };

    let parsed = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
