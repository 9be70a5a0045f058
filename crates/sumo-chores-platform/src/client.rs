use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::SumoApiError;

pub const DEFAULT_SUMO_API_ENDPOINT: &str = "https://api.sumologic.com/api";

/// `{"data": [...]}` wrapper shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub(crate) data: Vec<T>,
}

#[derive(Debug, Clone)]
pub struct SumoClientConfig {
    pub api_endpoint: String,
    pub access_id: String,
    pub access_key: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// Basic-auth JSON client bound to one Sumo Logic API endpoint.
///
/// Calls are never retried here: every non-success status surfaces to the
/// caller with its body intact.
pub struct SumoClient {
    http: reqwest::Client,
    api_endpoint: String,
    access_id: String,
    access_key: String,
}

impl SumoClient {
    pub fn new(config: SumoClientConfig) -> Result<Self, SumoApiError> {
        let access_id = config.access_id.trim();
        let access_key = config.access_key.trim();
        if access_id.is_empty() || access_key.is_empty() {
            return Err(SumoApiError::MissingCredentials);
        }

        let api_endpoint = config.api_endpoint.trim().trim_end_matches('/').to_string();
        let parsed =
            reqwest::Url::parse(&api_endpoint).map_err(|error| SumoApiError::InvalidEndpoint {
                endpoint: config.api_endpoint.clone(),
                reason: error.to_string(),
            })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SumoApiError::InvalidEndpoint {
                endpoint: config.api_endpoint.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()?;

        Ok(Self {
            http,
            api_endpoint,
            access_id: access_id.to_string(),
            access_key: access_key.to_string(),
        })
    }

    /// Endpoint with any trailing slash removed.
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub(crate) async fn get_json<T>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SumoApiError>
    where
        T: DeserializeOwned,
    {
        let mut request = self
            .http
            .get(url)
            .basic_auth(&self.access_id, Some(&self.access_key));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SumoApiError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| SumoApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
