//! URL construction helpers for API endpoints.

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Parse and validate a URL prefix.
pub fn parse_prefix(prefix: &str) -> ApiResult<Url> {
    let url = Url::parse(prefix.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

/// Build the URL for `endpoint` below `prefix`.
///
/// Query and fragment of the prefix are dropped.
pub fn build_endpoint_url(prefix: &Url, endpoint: &str) -> Url {
    let mut url = prefix.clone();
    url.set_query(None);
    url.set_fragment(None);

    let base_path = url.path().trim_end_matches('/');
    let endpoint = endpoint.trim_matches('/');
    url.set_path(&format!("{base_path}/{endpoint}"));

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_endpoint_url() {
        let prefix = parse_prefix("https://api.example.com/v1").unwrap();
        assert_eq!(
            build_endpoint_url(&prefix, "open").as_str(),
            "https://api.example.com/v1/open"
        );
    }

    #[test]
    fn test_build_endpoint_url_trailing_slash() {
        let prefix = parse_prefix("https://api.example.com/v1/").unwrap();
        assert_eq!(
            build_endpoint_url(&prefix, "/install").as_str(),
            "https://api.example.com/v1/install"
        );
    }

    #[test]
    fn test_build_endpoint_url_host_only() {
        let prefix = parse_prefix("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            build_endpoint_url(&prefix, "open").as_str(),
            "http://127.0.0.1:8080/open"
        );
    }

    #[test]
    fn test_build_endpoint_url_drops_query() {
        let prefix = parse_prefix("https://api.example.com/v1?debug=1#x").unwrap();
        assert_eq!(
            build_endpoint_url(&prefix, "open").as_str(),
            "https://api.example.com/v1/open"
        );
    }

    #[test]
    fn test_parse_prefix_rejects_other_schemes() {
        assert!(matches!(
            parse_prefix("ftp://example.com"),
            Err(ApiError::UnsupportedScheme { scheme }) if scheme == "ftp"
        ));
        assert!(matches!(parse_prefix("example.com/v1"), Err(ApiError::InvalidUrl(_))));
    }
}
