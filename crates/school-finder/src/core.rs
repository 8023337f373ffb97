//! The search pipeline and the session it produces.
//!
//! A [`SchoolFinder`] owns the configured service clients and runs one search at a time per
//! caller: geocode the city, query Overpass over the surrounding box, extract and deduplicate
//! records, and fall back to the local-search API when nothing survives. Each completed
//! search yields a [`SearchSession`] that the presentation layer filters and exports.
//!
//! ```rust,no_run
//! use school_finder::{FilterCriteria, SchoolFinder, TypeFilter};
//!
//! let finder = SchoolFinder::new()?;
//! let session = finder.search_blocking("Oslo")?;
//! let public = session.filter(&FilterCriteria::default().with_type(TypeFilter::Public));
//! println!("{} of {} schools are public", public.len(), session.count());
//! # Ok::<(), school_finder::error::SchoolFinderError>(())
//! ```
//!
//! Starting a new search supersedes any search still in flight on the same finder: the older
//! one resolves to [`SchoolFinderError::Superseded`] at its next network boundary and its
//! results are discarded.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, Utc};
#[cfg(feature = "http")]
use school_finder_sources::ReqwestTransport;
use school_finder_sources::{
    CityInfo, FallbackSearchClient, GeoLocator, HttpTransport, OverpassExecutor, SchoolRecord,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    config::FinderConfig,
    dedupe::dedupe,
    error::{Result, SchoolFinderError},
    export::{self, CsvQuoting},
    extract::extract,
    filter::{self, FilterCriteria, TypeSummary},
    query::QueryBuilder,
};

/// Which source produced a session's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrigin {
    Overpass,
    Fallback,
}

/// The result of one completed search. Replaced wholesale by the next search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSession {
    /// The trimmed city text as the user typed it.
    pub query: String,
    pub city: CityInfo,
    /// Deduplicated, in first-seen order. Never empty.
    pub records: Vec<SchoolRecord>,
    pub origin: ResultOrigin,
    pub searched_at: DateTime<Utc>,
}

impl SearchSession {
    fn new(query: &str, city: CityInfo, records: Vec<SchoolRecord>, origin: ResultOrigin) -> Self {
        Self {
            query: query.to_owned(),
            city,
            records,
            origin,
            searched_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[SchoolRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<SchoolRecord> {
        filter::apply(&self.records, criteria)
    }

    pub fn visible_count(&self, criteria: &FilterCriteria) -> usize {
        filter::count(&self.records, criteria)
    }

    pub fn summary(&self) -> TypeSummary {
        TypeSummary::of(&self.records)
    }

    pub fn export_filename(&self) -> String {
        export::export_filename(&self.query)
    }

    /// The visible subset as delimited text.
    pub fn export_csv(&self, criteria: &FilterCriteria, quoting: CsvQuoting) -> String {
        export::to_delimited_text_with(&self.filter(criteria), quoting)
    }

    /// Write the visible subset into `dir` under [`Self::export_filename`].
    pub fn write_csv(
        &self,
        dir: impl AsRef<Path>,
        criteria: &FilterCriteria,
        quoting: CsvQuoting,
    ) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.export_filename());
        export::write_csv(&path, &self.filter(criteria), quoting)?;
        Ok(path)
    }
}

/// Finds primary schools in a city.
pub struct SchoolFinder<T: HttpTransport> {
    transport: T,
    config: FinderConfig,
    query_builder: QueryBuilder,
    geolocator: GeoLocator,
    overpass: OverpassExecutor,
    fallback: FallbackSearchClient,
    generation: AtomicU64,
}

#[cfg(feature = "http")]
impl SchoolFinder<ReqwestTransport> {
    /// A finder talking to the public services with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(FinderConfig::default())
    }

    pub fn with_config(config: FinderConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.user_agent, config.request_timeout)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: HttpTransport> SchoolFinder<T> {
    pub fn with_transport(transport: T, config: FinderConfig) -> Self {
        let fallback = if config.fallback_enabled {
            FallbackSearchClient::new(&config.fallback_url, config.fallback_api_key.clone())
        } else {
            FallbackSearchClient::disabled()
        };

        Self {
            transport,
            query_builder: QueryBuilder::new(config.overpass_timeout_secs),
            geolocator: GeoLocator::new(&config.geocoder_url),
            overpass: OverpassExecutor::new(&config.overpass_mirrors),
            fallback,
            config,
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the full pipeline for `city`.
    ///
    /// # Errors
    ///
    /// - [`SchoolFinderError::EmptyInput`] for blank input, before any request is made
    /// - [`SchoolFinderError::NotFound`] when the geocoder has no candidate
    /// - [`SchoolFinderError::ServiceError`] when the geocoder cannot be reached
    /// - [`SchoolFinderError::NoResults`] when neither Overpass nor the fallback found a school
    /// - [`SchoolFinderError::Superseded`] when another search started on this finder meanwhile
    #[instrument(name = "School search", skip(self), level = "info")]
    pub async fn search(&self, city: &str) -> Result<SearchSession> {
        let query = city.trim();
        if query.is_empty() {
            return Err(SchoolFinderError::EmptyInput);
        }
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let t_search = std::time::Instant::now();

        let located = self.geolocator.locate(&self.transport, query).await;
        self.ensure_current(ticket)?;
        let city_info = located?;

        let overpass_query = self.query_builder.build(&city_info.bounding_box);
        let executed = self.overpass.execute(&self.transport, &overpass_query).await;
        self.ensure_current(ticket)?;
        let elements = executed.unwrap_or_else(|e| {
            warn!(error = %e, "Spatial query failed, continuing with no elements");
            Vec::new()
        });

        let records = dedupe(elements.iter().map(extract));
        if !records.is_empty() {
            info!(
                elements = elements.len(),
                records = records.len(),
                elapsed_seconds = ?t_search.elapsed(),
                "Search complete"
            );
            return Ok(SearchSession::new(query, city_info, records, ResultOrigin::Overpass));
        }

        info!("No schools from the spatial query, trying fallback search");
        let records = self.fallback.search(&self.transport, query).await;
        self.ensure_current(ticket)?;
        if records.is_empty() {
            return Err(SchoolFinderError::NoResults {
                city: city_info.display_name,
            });
        }

        info!(
            records = records.len(),
            elapsed_seconds = ?t_search.elapsed(),
            "Search complete from fallback"
        );
        Ok(SearchSession::new(query, city_info, records, ResultOrigin::Fallback))
    }

    /// [`Self::search`] driven to completion on a private runtime.
    ///
    /// Must not be called from within an async context.
    pub fn search_blocking(&self, city: &str) -> Result<SearchSession> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.search(city))
    }

    /// The visible subset of `session` in the configured CSV dialect.
    pub fn export_csv(&self, session: &SearchSession, criteria: &FilterCriteria) -> String {
        session.export_csv(criteria, self.config.csv_quoting)
    }

    fn ensure_current(&self, ticket: u64) -> Result<()> {
        if self.generation.load(Ordering::SeqCst) == ticket {
            Ok(())
        } else {
            info!(ticket, "Search superseded");
            Err(SchoolFinderError::Superseded)
        }
    }
}
