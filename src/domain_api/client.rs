use crate::domain_api::models::{ResidentialSearchRequest, SearchResult};
use crate::pipeline::ListingSource;
use reqwest::blocking::Client;
use std::error::Error;
use std::fmt;
use std::time::Duration;

const SEARCH_URL: &str = "https://api.domain.com.au/v1/listings/residential/_search";

#[derive(Debug)]
pub enum DomainError {
    Network(String),
    Api(u16, String),
    Decode(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Network(msg) => write!(f, "Network error: {msg}"),
            DomainError::Api(status, body) => write!(f, "Domain API error: {status} - {body}"),
            DomainError::Decode(msg) => write!(f, "Response decode error: {msg}"),
        }
    }
}

impl Error for DomainError {}

/// Client for the Domain listings search API.
pub struct DomainClient {
    api_key: String,
    client: Client,
}

impl DomainClient {
    pub fn new(api_key: String) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| DomainError::Network(e.to_string()))?;

        Ok(Self { api_key, client })
    }

    /// Runs one residential search. A single call — the API caps results
    /// per search and this does not page through the remainder.
    pub fn search_residential(
        &self,
        request: &ResidentialSearchRequest,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let resp = self
            .client
            .post(SEARCH_URL)
            .header("X-Api-Key", &self.api_key)
            .json(request)
            .send()
            .map_err(|e| DomainError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(DomainError::Api(status.as_u16(), body));
        }

        resp.json::<Vec<SearchResult>>()
            .map_err(|e| DomainError::Decode(e.to_string()))
    }
}

impl ListingSource for DomainClient {
    fn search(&self, request: &ResidentialSearchRequest) -> Result<Vec<SearchResult>, DomainError> {
        self.search_residential(request)
    }
}
