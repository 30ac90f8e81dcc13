//! HTTP client for the person-creation endpoint
//!
//! Posts the full set of form values as JSON and maps the response status to
//! success or [`SubmitError::Rejected`].

use super::SubmitError;
use super::traits::SubmissionClientTrait;
use crate::config::IntakeConfig;
use crate::state::FormValues;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Path of the endpoint, appended to the configured base URL
pub const CREATE_PERSON_PATH: &str = "/api/createPerson";

/// Body the endpoint answers with, e.g. `{"message":"success"}`
#[derive(Debug, Deserialize)]
struct CreatePersonResponse {
    message: String,
}

/// Client for the submission endpoint
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: reqwest::Client,
    url: String,
}

impl SubmissionClient {
    /// Build a client from the loaded configuration
    pub fn from_config(config: &IntakeConfig) -> Result<Self, SubmitError> {
        Self::new(
            &config.endpoint(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Build a client for `endpoint`; no timeout is applied unless given
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, SubmitError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(SubmitError::Client)?;
        let url = format!("{}{}", endpoint.trim_end_matches('/'), CREATE_PERSON_PATH);
        Ok(Self { client, url })
    }

    /// Full URL requests are posted to
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SubmissionClientTrait for SubmissionClient {
    async fn create_person(&self, values: &FormValues) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.url)
            .json(values)
            .send()
            .await
            .map_err(|source| SubmitError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<CreatePersonResponse>(&body)
            .map(|r| r.message)
            .unwrap_or(body);

        if status.is_success() {
            tracing::info!("Submitted form to {} ({status}): {message}", self.url);
            Ok(())
        } else {
            Err(SubmitError::Rejected {
                url: self.url.clone(),
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_values() -> FormValues {
        FormValues {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            mobile: "07123456789".to_string(),
            gender: "Female".to_string(),
            dob: "10/12/1815".to_string(),
            dob_day: "10".to_string(),
            dob_month: "12".to_string(),
            dob_year: "1815".to_string(),
            comments: String::new(),
        }
    }

    #[test]
    fn test_url_joins_endpoint_and_path() {
        let client = SubmissionClient::new("http://localhost:3000/", None).unwrap();
        assert_eq!(client.url(), "http://localhost:3000/api/createPerson");
    }

    #[tokio::test]
    async fn test_posts_json_with_wire_keys() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/createPerson"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "mobile": "07123456789",
                "gender": "Female",
                "dob": "10/12/1815",
                "dobDay": "10",
                "dobMonth": "12",
                "dobYear": "1815",
                "comments": ""
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "success"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = SubmissionClient::new(&server.uri(), None).unwrap();
        client.create_person(&sample_values()).await.unwrap();
    }

    #[tokio::test]
    async fn test_any_2xx_is_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/createPerson"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = SubmissionClient::new(&server.uri(), None).unwrap();
        assert!(client.create_person(&sample_values()).await.is_ok());
    }

    #[tokio::test]
    async fn test_server_failure_is_rejected_with_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/createPerson"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"message": "failure"})),
            )
            .mount(&server)
            .await;

        let client = SubmissionClient::new(&server.uri(), None).unwrap();
        let err = client.create_person(&sample_values()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        match err {
            SubmitError::Rejected { message, .. } => assert_eq!(message, "failure"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_redirect_class_status_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        let client = SubmissionClient::new(&server.uri(), None).unwrap();
        let err = client.create_person(&sample_values()).await.unwrap_err();
        assert_eq!(err.status(), Some(304));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Nothing listens on port 9 (discard) on test machines.
        let client =
            SubmissionClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = client.create_person(&sample_values()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport { .. }));
        assert_eq!(err.status(), None);
    }
}
