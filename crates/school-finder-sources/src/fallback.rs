//! Keyword-based local-search fallback, used when the spatial query finds nothing.
//!
//! The fallback carries no classification or contact signal, so every record it produces is
//! `Unknown` with an empty contact. Failures never propagate: they degrade to an empty list.

use ahash::AHashSet;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    Result, SourceError,
    model::{SchoolRecord, SchoolType},
    transport::{HttpRequest, HttpTransport},
};

pub const DEFAULT_FALLBACK_URL: &str = "https://google.serper.dev/places";

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default, alias = "title")]
    name: Option<String>,
    #[serde(default)]
    website: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default, alias = "local_results", alias = "places")]
    results: Vec<Listing>,
}

#[derive(Debug, Clone)]
pub struct FallbackSearchClient {
    endpoint: String,
    api_key: Option<String>,
    enabled: bool,
}

impl Default for FallbackSearchClient {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_URL, None)
    }
}

impl FallbackSearchClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            enabled: true,
        }
    }

    /// A client that never issues a request.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up "schools in `city`". Never fails; errors are logged and yield no records.
    #[instrument(name = "Fallback search", skip(self, transport), level = "info")]
    pub async fn search<T: HttpTransport>(&self, transport: &T, city: &str) -> Vec<SchoolRecord> {
        if !self.enabled {
            info!("Fallback search disabled");
            return Vec::new();
        }
        match self.fetch(transport, city).await {
            Ok(records) => {
                info!(records = records.len(), "Fallback search complete");
                records
            }
            Err(e) => {
                warn!(error = %e, "Fallback search failed");
                Vec::new()
            }
        }
    }

    async fn fetch<T: HttpTransport>(
        &self,
        transport: &T,
        city: &str,
    ) -> Result<Vec<SchoolRecord>> {
        let mut request = HttpRequest::get(&self.endpoint).query("q", format!("schools in {city}"));
        if let Some(key) = &self.api_key {
            request = request.header("X-API-KEY", key.as_str());
        }

        let response = transport.send(request).await?;
        if !response.is_success() {
            return Err(SourceError::Status {
                url: self.endpoint.clone(),
                status: response.status,
            });
        }
        let parsed: ListingResponse = serde_json::from_str(&response.body)?;
        Ok(listings_to_records(parsed.results))
    }
}

fn listings_to_records(listings: Vec<Listing>) -> Vec<SchoolRecord> {
    let mut seen = AHashSet::new();
    listings
        .into_iter()
        .filter_map(|listing| {
            let name = listing.name?.trim().to_owned();
            if name.is_empty() {
                return None;
            }
            let website = listing.website.unwrap_or_default().trim().to_owned();
            Some(SchoolRecord::new(name, website, SchoolType::Unknown, ""))
        })
        .filter(|record| seen.insert(record.dedup_key()))
        .collect()
}
