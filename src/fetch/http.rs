use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use url::Url;

use super::{ContributionSource, FetchError};
use crate::contributions::Contribution;

const CLIENT_USER_AGENT: &str = concat!("portfolio/", env!("CARGO_PKG_VERSION"));

/// Reads the contributions list from a JSON endpoint
pub struct HttpContributionSource {
    client: reqwest::Client,
    endpoint: Url,
}

/// The endpoint answers with either the list or an `{"error": ...}` object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContributionsResponse {
    List(Vec<serde_json::Value>),
    Error { error: serde_json::Value },
}

impl HttpContributionSource {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContributionSource for HttpContributionSource {
    fn name(&self) -> &'static str {
        "http"
    }

    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_contributions(&self) -> Result<Vec<Contribution>, FetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        match serde_json::from_slice::<ContributionsResponse>(&body)? {
            ContributionsResponse::List(records) => {
                let total = records.len();
                let contributions: Vec<Contribution> = records
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, record)| match serde_json::from_value(record) {
                        Ok(contribution) => Some(contribution),
                        Err(e) => {
                            tracing::warn!(index, error = %e, "skipping malformed contribution");
                            None
                        }
                    })
                    .collect();
                tracing::debug!(count = contributions.len(), total, "decoded contributions");
                Ok(contributions)
            }
            ContributionsResponse::Error { error } => Err(FetchError::Upstream(match error {
                serde_json::Value::String(message) => message,
                other => other.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributions::{ContributionStatus, FetchResult};
    use crate::fetch::{ContributionFetcher, RetryPolicy};
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpContributionSource {
        let endpoint = Url::parse(&format!("{}/contributions", server.uri())).unwrap();
        HttpContributionSource::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    fn body() -> serde_json::Value {
        serde_json::json!([
            {
                "id": 1,
                "organisation": "acme",
                "repo": "app",
                "title": "Add retry",
                "link": "https://github.com/acme/app/pull/5",
                "status": "MERGED",
                "number": 5,
                "logo": "https://avatars.githubusercontent.com/u/1",
                "linesAdded": 40,
                "linesDeleted": 2
            },
            {
                "id": 2,
                "organisation": "acme",
                "repo": "lib",
                "title": "Fix docs",
                "link": "https://github.com/acme/lib/pull/7",
                "status": "OPEN",
                "number": 7
            }
        ])
    }

    #[tokio::test]
    async fn parses_contributions_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contributions"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body()))
            .mount(&mock_server)
            .await;

        let contributions = source_for(&mock_server)
            .fetch_contributions()
            .await
            .unwrap();

        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions[0].repo, "app");
        assert_eq!(contributions[0].status, ContributionStatus::Merged);
        assert_eq!(contributions[0].diff_summary(), Some((40, 2)));
        assert_eq!(contributions[1].repo, "lib");
        assert_eq!(contributions[1].number, 7);
    }

    #[tokio::test]
    async fn error_object_is_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contributions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "error": "rate limited" })),
            )
            .mount(&mock_server)
            .await;

        let err = source_for(&mock_server)
            .fetch_contributions()
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Upstream(ref m) if m == "rate limited"));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn skips_malformed_records() {
        let mock_server = MockServer::start().await;

        let mut records = body();
        records
            .as_array_mut()
            .unwrap()
            .insert(1, serde_json::json!({ "id": 3, "title": "no repo or status" }));

        Mock::given(method("GET"))
            .and(path("/contributions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(records))
            .mount(&mock_server)
            .await;

        let contributions = source_for(&mock_server)
            .fetch_contributions()
            .await
            .unwrap();

        let repos: Vec<_> = contributions.iter().map(|c| c.repo.as_str()).collect();
        assert_eq!(repos, ["app", "lib"]);
    }

    #[tokio::test]
    async fn malformed_body_is_permanent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contributions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let err = source_for(&mock_server)
            .fetch_contributions()
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn recovers_after_server_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contributions"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .with_priority(1)
            .expect(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/contributions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = ContributionFetcher::new(
            Arc::new(source_for(&mock_server)),
            RetryPolicy {
                max_attempts: 3,
                base_backoff_ms: 0,
            },
        );

        let result = fetcher.fetch_with_retry().await;

        match result {
            FetchResult::Loaded(contributions) => assert_eq!(contributions.len(), 2),
            FetchResult::Failed(f) => panic!("unexpected failure: {}", f.reason),
        }
    }

    #[tokio::test]
    async fn exhausted_retries_report_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contributions"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&mock_server)
            .await;

        let fetcher = ContributionFetcher::new(
            Arc::new(source_for(&mock_server)),
            RetryPolicy {
                max_attempts: 2,
                base_backoff_ms: 0,
            },
        );

        let result = fetcher.fetch_with_retry().await;

        assert_eq!(result, FetchResult::failed(2, "unexpected status 500"));
    }
}
