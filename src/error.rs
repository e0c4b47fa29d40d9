use thiserror::Error;

/// Cause carried by `LookupResult::TransportError` and sprite failures.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("unexpected upstream status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not decode sprite image: {0}")]
    Image(#[from] image::ImageError),

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else {
            LookupError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cause() {
        assert_eq!(LookupError::Timeout.to_string(), "request timed out");
        assert_eq!(
            LookupError::Status(503).to_string(),
            "unexpected upstream status 503"
        );
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(LookupError::from(bad)
            .to_string()
            .starts_with("malformed response body"));
    }
}
