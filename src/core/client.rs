use crate::domain::model::QueryParams;
use crate::utils::error::Result;
use reqwest::{Client, Request, StatusCode};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.nobelprize.org/2.1";

/// Thin client for the Nobel Prize REST API.
#[derive(Debug, Clone)]
pub struct NobelClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl NobelClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET request for `params` without sending it.
    pub fn build_request(&self, params: &QueryParams) -> Result<Request> {
        let url = format!("{}/{}", self.base_url, params.endpoint.path());
        let mut request = self.client.get(url).query(&params.to_query_pairs());

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        Ok(request.build()?)
    }

    /// Fetch and parse one page of results.
    ///
    /// The body is parsed as JSON whatever the status code, so an API error
    /// payload comes back like any other value. Transport failures and
    /// non-JSON bodies are returned as errors.
    pub async fn fetch(&self, params: &QueryParams) -> Result<serde_json::Value> {
        let request = self.build_request(params)?;
        tracing::debug!("Making API request to: {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status == StatusCode::OK {
            tracing::info!("Status: OK");
        } else {
            tracing::warn!("Status: Error ({})", status);
        }

        let body = response.text().await?;
        let data: serde_json::Value = serde_json::from_str(&body)?;
        Ok(data)
    }
}

impl Default for NobelClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Category, Endpoint};
    use crate::utils::error::NobelError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn query_of(request: &Request) -> HashMap<String, String> {
        request.url().query_pairs().into_owned().collect()
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    async fn fetch_with_logs(
        client: &NobelClient,
        params: &QueryParams,
    ) -> (Result<serde_json::Value>, String) {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        let result = client.fetch(params).await;
        (result, logs.contents())
    }

    #[test]
    fn test_build_request_maps_parameters() {
        let client = NobelClient::default();
        let params = QueryParams::new(Endpoint::NobelPrizes)
            .with_limit(25)
            .with_years(1990, 2000)
            .with_category(Some(Category::Literature));

        let request = client.build_request(&params).unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().path(), "/2.1/nobelPrizes");
        let query = query_of(&request);
        assert_eq!(query.len(), 4);
        assert_eq!(query["limit"], "25");
        assert_eq!(query["nobelPrizeYear"], "1990");
        assert_eq!(query["yearTo"], "2000");
        assert_eq!(query["nobelPrizeCategory"], "lit");
    }

    #[test]
    fn test_build_request_omits_unset_category() {
        let client = NobelClient::new("http://localhost:9000/");
        let params = QueryParams::default().with_years(1901, 1910);

        let request = client.build_request(&params).unwrap();

        assert_eq!(
            request.url().as_str().split('?').next(),
            Some("http://localhost:9000/laureates")
        );
        let query = query_of(&request);
        assert!(!query.contains_key("nobelPrizeCategory"));
        assert_eq!(query["limit"], "9999");
        assert_eq!(query["yearTo"], "1910");
    }

    #[test]
    fn test_build_request_for_every_endpoint_and_category() {
        let client = NobelClient::default();
        let categories = std::iter::once(None).chain(Category::ALL.map(Some));

        for category in categories {
            for endpoint in [Endpoint::Laureates, Endpoint::NobelPrizes] {
                let params = QueryParams::new(endpoint)
                    .with_years(1950, 1960)
                    .with_category(category);
                let request = client.build_request(&params).unwrap();

                assert_eq!(request.url().path(), format!("/2.1/{}", endpoint.path()));
                let query = query_of(&request);
                assert_eq!(query["nobelPrizeYear"], "1950");
                assert_eq!(query["yearTo"], "1960");
                match category {
                    Some(category) => {
                        assert_eq!(query.len(), 4);
                        assert_eq!(query["nobelPrizeCategory"], category.code());
                    }
                    None => {
                        assert_eq!(query.len(), 3);
                        assert!(!query.contains_key("nobelPrizeCategory"));
                    }
                }
            }
        }
    }

    #[test]
    fn test_build_request_applies_timeout() {
        let client = NobelClient::default().with_timeout(Some(Duration::from_secs(3)));
        let request = client.build_request(&QueryParams::default()).unwrap();
        assert_eq!(request.timeout(), Some(&Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_fetch_sends_query_parameters() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/laureates")
                .query_param("limit", "3")
                .query_param("nobelPrizeYear", "1921")
                .query_param("yearTo", "1922")
                .query_param("nobelPrizeCategory", "phy");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"laureates": [{"id": "1"}]}));
        });

        let client = NobelClient::new(server.base_url());
        let params = QueryParams::default()
            .with_limit(3)
            .with_years(1921, 1922)
            .with_category(Some(Category::Physics));

        let data = client.fetch(&params).await.unwrap();

        api_mock.assert();
        assert_eq!(data["laureates"][0]["id"], "1");
    }

    #[tokio::test]
    async fn test_fetch_returns_error_payload_on_non_200() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/nobelPrizes");
            then.status(400)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"code": 400, "message": "Invalid year"}));
        });

        let client = NobelClient::new(server.base_url());
        let data = client
            .fetch(&QueryParams::new(Endpoint::NobelPrizes))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(data["message"], "Invalid year");
    }

    #[tokio::test]
    async fn test_fetch_fails_on_non_json_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/laureates");
            then.status(502).body("<html>Bad Gateway</html>");
        });

        let client = NobelClient::new(server.base_url());
        let err = client.fetch(&QueryParams::default()).await.unwrap_err();

        assert!(matches!(err, NobelError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_fetch_propagates_transport_failure() {
        // nothing listens on port 1
        let client = NobelClient::new("http://127.0.0.1:1");
        let err = client.fetch(&QueryParams::default()).await.unwrap_err();

        assert!(matches!(err, NobelError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_fetch_logs_ok_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/laureates");
            then.status(200).json_body(serde_json::json!({"laureates": []}));
        });

        let client = NobelClient::new(server.base_url());
        let (result, logs) = fetch_with_logs(&client, &QueryParams::default()).await;

        assert!(result.is_ok());
        assert!(logs.contains("Status: OK"), "logs were: {}", logs);
        assert!(!logs.contains("Status: Error"));
    }

    #[tokio::test]
    async fn test_fetch_logs_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/nobelPrizes");
            then.status(404).json_body(serde_json::json!({"code": 404, "message": "Not found"}));
        });

        let client = NobelClient::new(server.base_url());
        let params = QueryParams::new(Endpoint::NobelPrizes);
        let (result, logs) = fetch_with_logs(&client, &params).await;

        assert_eq!(result.unwrap()["code"], 404);
        assert!(logs.contains("Status: Error (404 Not Found)"), "logs were: {}", logs);
        assert!(!logs.contains("Status: OK"));
    }
}
