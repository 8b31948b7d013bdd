use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::error::DemozooError;
use crate::types::{ProductionSummary, RemoteProduction};

pub const DEFAULT_BASE_URL: &str = "https://demozoo.org/api/v1";

/// How a metadata response status is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx: parse the payload.
    Usable,
    /// 404: the production was removed upstream.
    Gone,
    /// Anything else: leave the record alone this run.
    Skip,
}

/// Classify a response purely by status code.
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        404 => StatusClass::Gone,
        200..=299 => StatusClass::Usable,
        _ => StatusClass::Skip,
    }
}

/// Outcome of a metadata request that reached the server.
#[derive(Debug, Clone)]
pub enum Fetch<T> {
    Found(T),
    Gone,
    Unusable(u16),
}

/// Read access to the remote metadata service.
pub trait ProductionSource {
    fn production(&self, id: u64) -> Result<Fetch<RemoteProduction>, DemozooError>;

    fn releaser_productions(
        &self,
        releaser_id: u64,
    ) -> Result<Fetch<Vec<ProductionSummary>>, DemozooError>;
}

/// Blocking HTTP client for the metadata API.
pub struct DemozooClient {
    http: Client,
    base_url: String,
}

impl DemozooClient {
    /// Create a client. `timeout` bounds every request end to end.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, DemozooError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn production_url(&self, id: u64) -> String {
        format!("{}/productions/{id}/", self.base_url)
    }

    pub fn releaser_productions_url(&self, id: u64) -> String {
        format!("{}/releasers/{id}/productions/", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Fetch<T>, DemozooError> {
        let resp = self.http.get(url).query(&[("format", "json")]).send()?;
        let status = resp.status().as_u16();
        match classify_status(status) {
            StatusClass::Gone => {
                log::debug!("{url}: gone (HTTP 404)");
                Ok(Fetch::Gone)
            }
            StatusClass::Skip => {
                log::debug!("{url}: unusable (HTTP {status})");
                Ok(Fetch::Unusable(status))
            }
            StatusClass::Usable => {
                let text = resp.text()?;
                let value = serde_json::from_str(&text)?;
                Ok(Fetch::Found(value))
            }
        }
    }
}

impl ProductionSource for DemozooClient {
    fn production(&self, id: u64) -> Result<Fetch<RemoteProduction>, DemozooError> {
        self.get_json(&self.production_url(id))
    }

    fn releaser_productions(
        &self,
        releaser_id: u64,
    ) -> Result<Fetch<Vec<ProductionSummary>>, DemozooError> {
        self.get_json(&self.releaser_productions_url(releaser_id))
    }
}
