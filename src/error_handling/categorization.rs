//! Error categorization.
//!
//! Maps lookup errors onto `FailureType` so the end-of-run statistics can group
//! them.

use super::types::{FailureType, LookupError};

/// Categorizes a `reqwest::Error` into a `FailureType`.
///
/// A response status is checked first: `error_for_status()` produces errors that
/// carry the status code. Otherwise the reqwest error kind decides.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureType {
    if error.status().is_some() || error.is_status() {
        return FailureType::LookupHttpStatus;
    }

    if error.is_timeout() {
        FailureType::LookupTimeout
    } else if error.is_connect() {
        FailureType::LookupConnectError
    } else if error.is_decode() || error.is_body() {
        FailureType::LookupDecodeError
    } else if error.is_builder() {
        FailureType::LookupInvalidUrl
    } else {
        FailureType::LookupOtherError
    }
}

impl LookupError {
    /// The statistics bucket for this failure.
    pub fn failure_type(&self) -> FailureType {
        match self {
            LookupError::InvalidUrl { .. } => FailureType::LookupInvalidUrl,
            LookupError::Request(e) => categorize_reqwest_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_invalid_url_failure_type() {
        let error = LookupError::InvalidUrl {
            endpoint: "mailto:nobody".to_string(),
        };
        assert_eq!(error.failure_type(), FailureType::LookupInvalidUrl);
    }

    #[tokio::test]
    async fn test_categorize_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let error = reqwest::get(server.uri())
            .await
            .expect("request should reach mock server")
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            categorize_reqwest_error(&error),
            FailureType::LookupHttpStatus
        );
    }

    #[tokio::test]
    async fn test_categorize_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let error = client.get(server.uri()).send().await.unwrap_err();
        assert_eq!(categorize_reqwest_error(&error), FailureType::LookupTimeout);
    }

    #[tokio::test]
    async fn test_categorize_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let error = reqwest::get(server.uri())
            .await
            .unwrap()
            .json::<serde_json::Value>()
            .await
            .unwrap_err();
        assert_eq!(
            categorize_reqwest_error(&error),
            FailureType::LookupDecodeError
        );
    }
}
