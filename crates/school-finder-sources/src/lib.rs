//! Service clients for the school-finder pipeline.
//!
//! Three external services feed the pipeline, each reached through the [`HttpTransport`]
//! seam:
//!
//! - [`GeoLocator`]: a Nominatim-compatible geocoder turning a city name into a point and a
//!   search box.
//! - [`OverpassExecutor`]: Overpass API mirrors, tried strictly in order.
//! - [`FallbackSearchClient`]: a local-search API consulted when the spatial query comes back
//!   empty.
//!
//! The data model shared with the extraction pipeline lives in [`model`].

pub mod fallback;
pub mod geocode;
pub mod model;
pub mod overpass;
pub mod testing;
pub mod transport;

pub use error::{Result, SourceError};
pub use fallback::{DEFAULT_FALLBACK_URL, FallbackSearchClient};
pub use geocode::{GeoLocator, NOMINATIM_SEARCH_URL};
pub use model::{
    BBOX_MARGIN_DEGREES, BoundingBox, CityInfo, Coordinate, ElementKind, RawElement,
    SchoolRecord, SchoolType,
};
pub use overpass::{DEFAULT_OVERPASS_MIRRORS, OverpassExecutor};
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
pub use transport::{DEFAULT_USER_AGENT, HttpRequest, HttpResponse, HttpTransport, Method};

mod error;
