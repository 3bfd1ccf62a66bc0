use url::Url;

use crate::error::ConfigError;

/// Location of the backend service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base: Url,
}

impl ApiConfig {
    /// Validates a base URL. It must be an absolute `http(s)` URL with a host
    /// and no query or fragment. A path prefix is kept.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let invalid = || ConfigError::InvalidBaseUrl(trimmed.to_string());
        let mut base = Url::parse(trimmed).map_err(|_| invalid())?;
        let usable = matches!(base.scheme(), "http" | "https")
            && base.host_str().is_some_and(|host| !host.is_empty())
            && base.query().is_none()
            && base.fragment().is_none();
        if !usable {
            return Err(invalid());
        }

        let path = base.path().trim_end_matches('/').to_string();
        base.set_path(&path);
        Ok(Self { base })
    }

    /// Picks the first non-blank candidate (runtime override, then build-time
    /// value) and validates it.
    pub fn resolve<'a, I>(candidates: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        candidates
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.trim().is_empty())
            .map_or(Err(ConfigError::MissingBaseUrl), Self::new)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Full URL for an endpoint path such as `/api/forecast_7day`, appended
    /// below the base path.
    pub fn url(&self, endpoint: &str) -> String {
        let mut url = self.base.clone();
        let path = format!(
            "{}/{}",
            self.base.path().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        url.set_path(&path);
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_endpoint() {
        let config = ApiConfig::new("http://localhost:8000/").unwrap();

        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(
            config.url("/api/forecast_1day"),
            "http://localhost:8000/api/forecast_1day"
        );
        assert_eq!(
            config.url("api/historical"),
            "http://localhost:8000/api/historical"
        );
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let config = ApiConfig::new("https://example.com/nifty/").unwrap();

        assert_eq!(config.base_url(), "https://example.com/nifty");
        assert_eq!(
            config.url("/api/historical"),
            "https://example.com/nifty/api/historical"
        );
    }

    #[test]
    fn test_resolve_prefers_first_non_blank() {
        let config = ApiConfig::resolve([
            None,
            Some("  "),
            Some("https://api.example.com"),
            Some("http://fallback"),
        ])
        .unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_resolve_without_candidates_fails_fast() {
        assert_eq!(
            ApiConfig::resolve([None, None]),
            Err(ConfigError::MissingBaseUrl)
        );
        assert_eq!(
            ApiConfig::resolve([Some("")]),
            Err(ConfigError::MissingBaseUrl)
        );
    }

    #[test]
    fn test_unusable_base_urls_are_rejected() {
        for raw in [
            "/api",
            "localhost:8000",
            "ftp://host",
            "http://",
            "http://host:8000?x=1",
            "https://host/#top",
        ] {
            assert_eq!(
                ApiConfig::new(raw),
                Err(ConfigError::InvalidBaseUrl(raw.to_string())),
                "{} should be rejected",
                raw
            );
        }
    }
}
