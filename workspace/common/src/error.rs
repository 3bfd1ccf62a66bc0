use thiserror::Error;

/// Failure while turning a backend payload into a chart-ready series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Forecast values arrived without any historical point to anchor their dates on
    #[error("cannot date {forecast_len} forecast value(s) without a historical anchor")]
    MissingAnchor { forecast_len: usize },
}

/// Invalid or missing backend configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No base URL was configured at build time or in local storage
    #[error("backend base URL is not configured (set NIFTY_API_BASE_URL)")]
    MissingBaseUrl,

    /// The configured base URL is not an absolute http(s) URL
    #[error("invalid backend base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Error types for a single panel fetch.
///
/// Stored in panel state, so it has to be cheap to clone and comparable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("HTTP error {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The payload decoded but could not be shaped into a series
    #[error("Malformed payload: {0}")]
    Shape(#[from] ShapeError),

    /// The request could not be built from the current configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_converts_into_fetch_error() {
        let err: FetchError = ShapeError::MissingAnchor { forecast_len: 2 }.into();
        assert_eq!(
            err.to_string(),
            "Malformed payload: cannot date 2 forecast value(s) without a historical anchor"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            status: 500,
            endpoint: "/api/forecast_7day".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 500 from /api/forecast_7day");
    }
}
