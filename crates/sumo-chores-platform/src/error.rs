use thiserror::Error;

#[derive(Debug, Error)]
/// Failures talking to the Sumo Logic API.
pub enum SumoApiError {
    #[error("missing Sumo Logic access id or access key")]
    MissingCredentials,
    #[error("invalid Sumo Logic api endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api request to {url} failed with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SumoApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
