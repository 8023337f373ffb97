//! Overpass query execution with ordered mirror fallback.

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    Result, SourceError,
    model::RawElement,
    transport::{HttpRequest, HttpTransport},
};

pub const DEFAULT_OVERPASS_MIRRORS: [&str; 3] = [
    "https://overpass-api.de/api/interpreter",
    "https://overpass.openstreetmap.fr/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
];

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<RawElement>,
}

/// Sends a query to each mirror in turn until one answers with a well-formed response.
#[derive(Debug, Clone)]
pub struct OverpassExecutor {
    mirrors: Vec<String>,
}

impl Default for OverpassExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_OVERPASS_MIRRORS)
    }
}

impl OverpassExecutor {
    pub fn new<I, S>(mirrors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mirrors: mirrors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mirrors(&self) -> &[String] {
        &self.mirrors
    }

    /// One attempt per mirror, in order. Results of failed attempts are discarded.
    ///
    /// Returns [`SourceError::AllServersFailed`] when no mirror produced a usable response.
    #[instrument(
        name = "Overpass query",
        skip_all,
        fields(mirrors = self.mirrors.len()),
        level = "info"
    )]
    pub async fn execute<T: HttpTransport>(
        &self,
        transport: &T,
        query: &str,
    ) -> Result<Vec<RawElement>> {
        for url in &self.mirrors {
            match self.try_mirror(transport, url, query).await {
                Ok(elements) => {
                    info!(url = %url, elements = elements.len(), "Overpass query succeeded");
                    return Ok(elements);
                }
                Err(e) => warn!(url = %url, error = %e, "Overpass server failed"),
            }
        }
        Err(SourceError::AllServersFailed {
            attempts: self.mirrors.len(),
        })
    }

    async fn try_mirror<T: HttpTransport>(
        &self,
        transport: &T,
        url: &str,
        query: &str,
    ) -> Result<Vec<RawElement>> {
        let request = HttpRequest::post(url, query).header("Content-Type", "text/plain");
        let response = transport.send(request).await?;
        if !response.is_success() {
            return Err(SourceError::Status {
                url: url.to_owned(),
                status: response.status,
            });
        }
        let parsed: OverpassResponse = serde_json::from_str(&response.body)?;
        Ok(parsed.elements)
    }
}
