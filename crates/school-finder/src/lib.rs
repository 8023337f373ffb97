//! School Finder - primary school discovery for any city
//!
//! School Finder turns a city name into a deduplicated, classified list of primary and
//! elementary schools. It geocodes the city, queries OpenStreetMap through the Overpass API
//! over a box around it, filters and classifies the returned elements with multilingual
//! keyword heuristics, and falls back to a local-search API when OpenStreetMap has nothing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use school_finder::{CsvQuoting, FilterCriteria, SchoolFinder, TypeFilter};
//!
//! let finder = SchoolFinder::new()?;
//! let session = finder.search_blocking("Oslo")?;
//!
//! for school in session.records() {
//!     println!("{} ({})", school.name, school.school_type);
//! }
//!
//! // Narrow down and export what is visible
//! let criteria = FilterCriteria::new(TypeFilter::Public, "skole");
//! let csv = session.export_csv(&criteria, CsvQuoting::Escaped);
//! std::fs::write(session.export_filename(), csv)?;
//! # Ok::<(), school_finder::error::SchoolFinderError>(())
//! ```
//!
//! # Pipeline
//!
//! - **Geocoding**: the top Nominatim candidate and a fixed-margin bounding box
//! - **Spatial query**: one Overpass QL union of category tags and a name regex, sent to each
//!   mirror in order until one answers
//! - **Extraction**: inclusion filter, display name, website, Public/Private/Unknown and a
//!   best-effort principal or contact
//! - **Deduplication**: by lower-cased name, first occurrence wins
//! - **Fallback**: "schools in <city>" against a local-search API when nothing survived
//!
//! Filtering and export are pure functions over a [`SearchSession`].
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
mod dedupe;
pub mod error;
pub mod export;
pub mod extract;
pub mod filter;
pub mod keywords;
mod query;

pub use core::{ResultOrigin, SchoolFinder, SearchSession};

pub use config::{
    DEFAULT_REQUEST_TIMEOUT, FinderConfig, FinderConfigBuilder, MIN_OVERPASS_MIRRORS,
};
pub use dedupe::dedupe;
pub use export::{
    CSV_HEADER, CsvQuoting, export_filename, to_delimited_text, to_delimited_text_with, write_csv,
};
pub use extract::{Rejection, UNNAMED_SCHOOL};
pub use filter::{FilterCriteria, ParseTypeFilterError, TypeFilter, TypeSummary};
pub use query::{DEFAULT_OVERPASS_TIMEOUT_SECS, QueryBuilder};
pub use school_finder_sources as sources;
pub use school_finder_sources::{
    BoundingBox, CityInfo, Coordinate, HttpTransport, RawElement, SchoolRecord, SchoolType,
};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the School Finder library.
///
/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG` when set, otherwise by
/// `level`. HTTP client internals are capped at `warn`. Only the first call has any effect.
///
/// # Examples
///
/// ```rust
/// use school_finder::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), school_finder::error::SchoolFinderError>(())
/// ```
pub fn init_logging(
    level: impl Into<LevelFilter>,
) -> Result<&'static (), error::SchoolFinderError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse()?)
            .add_directive("reqwest=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .map_err(|e| error::SchoolFinderError::Other(anyhow::anyhow!(e)))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_repeatable() {
        assert!(init_logging(tracing::Level::WARN).is_ok());
        assert!(init_logging(tracing::Level::DEBUG).is_ok());
    }

    #[test]
    fn test_filter_functions_reachable() {
        let records = [
            SchoolRecord::new("A skole", "", SchoolType::Public, ""),
            SchoolRecord::new("B skole", "", SchoolType::Private, ""),
        ];
        let criteria = FilterCriteria::default().with_type(TypeFilter::Public);
        assert_eq!(filter::count(&records, &criteria), 1);
        assert_eq!(filter::apply(&records, &criteria)[0].name, "A skole");
    }
}
