//! HTTP client for the geolocation service.

use log::{debug, info, warn};
use url::Url;

use super::types::{IpApiResponse, LookupResult};
use crate::error_handling::LookupError;

/// Issues one geolocation request per IP against a JSON endpoint.
///
/// The request URL is the endpoint with the IP appended as its last path
/// segment, so `http://ip-api.com/json` + `8.8.8.8` becomes
/// `http://ip-api.com/json/8.8.8.8`. The segment is percent-encoded, so
/// arbitrary input lines cannot alter the query or host.
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeoClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Looks up a single IP.
    ///
    /// Makes exactly one request bounded by the client's timeout. Timeouts,
    /// connection errors, non-2xx statuses, and undecodable bodies come back as
    /// `LookupResult::Failed`; this never returns an error to the caller.
    pub async fn lookup(&self, ip: &str) -> LookupResult {
        info!("Getting location for IP: {ip}");
        match self.fetch(ip).await {
            Ok(response) => LookupResult::Response(response),
            Err(e) => {
                warn!("Request error for IP {ip}: {e}");
                LookupResult::Failed(e)
            }
        }
    }

    async fn fetch(&self, ip: &str) -> Result<IpApiResponse, LookupError> {
        let url = self.lookup_url(ip)?;
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<IpApiResponse>()
            .await?;
        Ok(response)
    }

    fn lookup_url(&self, ip: &str) -> Result<Url, LookupError> {
        let invalid = || LookupError::InvalidUrl {
            endpoint: self.endpoint.clone(),
        };
        let mut url = Url::parse(&self.endpoint).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push(ip);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FailureType;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(endpoint: &str, timeout: Duration) -> GeoClient {
        let http = reqwest::Client::builder().timeout(timeout).build().unwrap();
        GeoClient::new(http, endpoint)
    }

    #[test]
    fn test_lookup_url_appends_ip() {
        let client = client_for("http://ip-api.com/json", Duration::from_secs(1));
        assert_eq!(
            client.lookup_url("8.8.8.8").unwrap().as_str(),
            "http://ip-api.com/json/8.8.8.8"
        );
    }

    #[test]
    fn test_lookup_url_handles_trailing_slash() {
        let client = client_for("http://ip-api.com/json/", Duration::from_secs(1));
        assert_eq!(
            client.lookup_url("1.1.1.1").unwrap().as_str(),
            "http://ip-api.com/json/1.1.1.1"
        );
    }

    #[test]
    fn test_lookup_url_encodes_hostile_input() {
        let client = client_for("http://ip-api.com/json", Duration::from_secs(1));
        let url = client.lookup_url("1.1.1.1/../x?y=z").unwrap();
        assert_eq!(url.host_str(), Some("ip-api.com"));
        assert!(url.query().is_none());
        assert_eq!(url.path_segments().unwrap().count(), 2);
    }

    #[test]
    fn test_lookup_url_rejects_bad_endpoint() {
        let client = client_for("not a url", Duration::from_secs(1));
        assert!(matches!(
            client.lookup_url("8.8.8.8"),
            Err(LookupError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/8.8.8.8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "lat": 39.03,
                "lon": -77.5,
                "city": "Ashburn",
                "country": "United States"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/json", server.uri()), Duration::from_secs(2));
        match client.lookup("8.8.8.8").await {
            LookupResult::Response(response) => {
                assert_eq!(response.status.as_deref(), Some("success"));
                assert_eq!(response.lat, Some(39.03));
            }
            LookupResult::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_non_2xx_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(2));
        match client.lookup("8.8.8.8").await {
            LookupResult::Failed(e) => assert_eq!(e.failure_type(), FailureType::LookupHttpStatus),
            LookupResult::Response(r) => panic!("expected failure, got {r:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_timeout_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "success"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_millis(200));
        match client.lookup("8.8.8.8").await {
            LookupResult::Failed(e) => assert_eq!(e.failure_type(), FailureType::LookupTimeout),
            LookupResult::Response(r) => panic!("expected timeout, got {r:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_invalid_json_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(2));
        match client.lookup("8.8.8.8").await {
            LookupResult::Failed(e) => {
                assert_eq!(e.failure_type(), FailureType::LookupDecodeError)
            }
            LookupResult::Response(r) => panic!("expected decode failure, got {r:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_connection_refused_is_failure() {
        // Bind then drop a listener to get a port nothing is listening on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{addr}/json"), Duration::from_secs(2));
        assert!(matches!(
            client.lookup("8.8.8.8").await,
            LookupResult::Failed(_)
        ));
    }
}
