//! Upbound cloud API client (organizations and their spaces)

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::{api, http};
use crate::error::{CtxError, Result};

use super::models::{OrganizationResponse, SpaceResponse};

/// Cloud API client
pub struct CloudClient {
    client: Client,
    token: Option<String>,
    domain: String,
    /// Custom base URL override (for testing with mock servers)
    base_url_override: Option<String>,
}

impl CloudClient {
    pub fn new(token: Option<String>, domain: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(http::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(http::TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            domain,
            base_url_override: None,
        }
    }

    /// Create a client with custom base URL (for testing with mock servers)
    #[cfg(test)]
    pub fn with_base_url(token: Option<String>, base_url: String) -> Self {
        Self {
            client: Client::new(),
            token,
            domain: "mock.upbound.io".to_string(),
            base_url_override: Some(base_url),
        }
    }

    /// Token used for cloud calls, also stored in contexts built for cloud spaces
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn base_url(&self) -> String {
        if let Some(ref url) = self.base_url_override {
            return url.clone();
        }
        format!("https://{}{}{}", api::HOST_PREFIX, self.domain, api::BASE_PATH)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, error_context: &str) -> Result<T> {
        let token = self.token.as_deref().ok_or_else(|| {
            CtxError::Token(format!(
                "no Upbound token available to list {}; set --token or UP_TOKEN",
                error_context
            ))
        })?;

        debug!("Fetching {} from: {}", error_context, url);
        let response = self.client.get(url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            return Err(CtxError::Api {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", error_context),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn list_organizations(&self) -> Result<Vec<OrganizationResponse>> {
        let url = format!("{}/{}", self.base_url(), api::ORGANIZATIONS);
        self.get_json(&url, "organizations").await
    }

    pub async fn list_spaces(&self, org: &str) -> Result<Vec<SpaceResponse>> {
        let url = format!(
            "{}/{}/{}/{}",
            self.base_url(),
            api::ORGANIZATIONS,
            urlencoding::encode(org),
            api::SPACES
        );
        self.get_json(&url, &format!("spaces for organization '{}'", org))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(base_url: &str) -> CloudClient {
        CloudClient::with_base_url(Some("test-token".to_string()), base_url.to_string())
    }

    #[test]
    fn test_base_url_from_domain() {
        let client = CloudClient::new(None, "upbound.io".to_string());
        assert_eq!(client.base_url(), "https://api.upbound.io/v1");
    }

    #[tokio::test]
    async fn test_list_organizations_success() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "acme", "displayName": "Acme"},
                {"id": 2, "name": "zeta", "displayName": "Zeta"}
            ])))
            .mount(&mock_server)
            .await;

        let orgs = client.list_organizations().await.unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].name, "acme");
        assert_eq!(orgs[1].name, "zeta");
    }

    #[tokio::test]
    async fn test_list_organizations_unauthorized() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = client.list_organizations().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("organizations"));
    }

    #[tokio::test]
    async fn test_list_spaces_success() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/acme/spaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "eu-1", "ingress": "eu-1.example.com", "ca": "Q0EK"},
                {"name": "us-1", "ingress": "us-1.example.com"}
            ])))
            .mount(&mock_server)
            .await;

        let spaces = client.list_spaces("acme").await.unwrap();
        assert_eq!(spaces.len(), 2);
        assert_eq!(spaces[0].ca.as_deref(), Some("Q0EK"));
        assert_eq!(spaces[1].ingress, "us-1.example.com");
    }

    #[tokio::test]
    async fn test_list_spaces_not_found() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/ghost/spaces"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = client.list_spaces("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() {
        let mock_server = MockServer::start().await;
        let client = CloudClient::with_base_url(None, mock_server.uri());

        let err = client.list_organizations().await.unwrap_err();
        assert!(matches!(err, CtxError::Token(_)));
        assert!(err.to_string().contains("UP_TOKEN"));
    }
}
