//! City name to coordinate and search area, via a Nominatim-compatible geocoder.

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    Result, SourceError,
    model::{BBOX_MARGIN_DEGREES, BoundingBox, CityInfo, Coordinate},
    transport::{HttpRequest, HttpTransport},
};

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim serialises coordinates as strings, other geocoders as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    lat: Degrees,
    lon: Degrees,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

impl GeocodeCandidate {
    fn short_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or_else(|| {
                self.display_name
                    .as_deref()
                    .and_then(|d| d.split(',').next())
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
            })
            .map(str::to_owned)
    }
}

#[derive(Debug, Clone)]
pub struct GeoLocator {
    endpoint: String,
}

impl Default for GeoLocator {
    fn default() -> Self {
        Self::new(NOMINATIM_SEARCH_URL)
    }
}

impl GeoLocator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve `city` to its top-ranked candidate and a fixed-margin bounding box.
    ///
    /// Fails with [`SourceError::NotFound`] when the geocoder has no candidate, and with a
    /// transport, status or parse error otherwise.
    #[instrument(name = "Geocode city", skip(self, transport), level = "info")]
    pub async fn locate<T: HttpTransport>(&self, transport: &T, city: &str) -> Result<CityInfo> {
        let request = HttpRequest::get(&self.endpoint)
            .query("format", "json")
            .query("q", city)
            .query("limit", "1");

        let response = transport.send(request).await?;
        if !response.is_success() {
            warn!(status = response.status, "Geocoder returned an error status");
            return Err(SourceError::Status {
                url: self.endpoint.clone(),
                status: response.status,
            });
        }

        let candidates: Vec<GeocodeCandidate> = serde_json::from_str(&response.body)?;
        let Some(top) = candidates.into_iter().next() else {
            return Err(SourceError::NotFound {
                query: city.to_owned(),
            });
        };

        let (Some(latitude), Some(longitude)) = (top.lat.value(), top.lon.value()) else {
            return Err(SourceError::MalformedResponse(format!(
                "geocoder returned unparsable coordinates for '{city}'"
            )));
        };

        let coordinate = Coordinate::new(latitude, longitude);
        let display_name = top.short_name().unwrap_or_else(|| city.to_owned());
        info!(latitude, longitude, display_name = %display_name, "City located");

        Ok(CityInfo {
            coordinate,
            bounding_box: BoundingBox::around(coordinate, BBOX_MARGIN_DEGREES),
            display_name,
        })
    }
}
