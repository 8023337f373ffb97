//! Integration tests for School Finder
//!
//! These tests drive the full public API end to end. All three services are played by a
//! scripted in-memory transport, so no network access is needed and every request the
//! pipeline makes can be inspected afterwards.

use school_finder::{
    CsvQuoting, FilterCriteria, FinderConfig, FinderConfigBuilder, ResultOrigin, SchoolFinder,
    SchoolType, TypeFilter,
    error::SchoolFinderError,
    sources::{
        DEFAULT_FALLBACK_URL, DEFAULT_OVERPASS_MIRRORS, Method, NOMINATIM_SEARCH_URL,
        testing::ScriptedTransport,
    },
};

const OSLO: &str = r#"[{"lat":"59.9133301","lon":"10.7389701","name":"Oslo","display_name":"Oslo, Norway","boundingbox":["59.8","60.1","10.5","10.9"]}]"#;

const MAJORSTUEN: &str = r#"{"version":0.6,"elements":[
    {"type":"node","id":1001,"lat":59.929,"lon":10.714,"tags":{"amenity":"school","name":"Majorstuen skole"}}
]}"#;

const NO_ELEMENTS: &str = r#"{"version":0.6,"elements":[]}"#;

const MIXED: &str = r#"{"elements":[
    {"type":"node","id":1,"lat":59.92,"lon":10.71,"tags":{"amenity":"school","name":"Oslo Primary School","operator":"public"}},
    {"type":"node","id":2,"lat":59.93,"lon":10.72,"tags":{"amenity":"school","name":"OSLO PRIMARY SCHOOL","operator":"private"}},
    {"type":"way","id":3,"center":{"lat":59.94,"lon":10.73},"tags":{"amenity":"school","name":"Oslo Montessori","operator":"public","website":"https://montessori.example"}},
    {"type":"relation","id":4,"center":{"lat":59.95,"lon":10.74},"tags":{"amenity":"school","name":"Bergen International College"}},
    {"type":"node","id":5,"lat":59.96,"lon":10.75,"tags":{"amenity":"school","name":"St. \"Olav\" Catholic School","contact:person":"Sister Maria"}},
    {"type":"node","id":6,"lat":59.97,"lon":10.76,"tags":{"shop":"bakery","name":"Oslo Bakeri"}}
]}"#;

const PLACES: &str = r#"{"places":[{"title":"Uranienborg skole","website":"https://uranienborg.example"},{"title":"Bolteløkka skole"}]}"#;

fn setup_test_env() {
    let _ = school_finder::init_logging(tracing::Level::WARN);
}

fn finder(transport: ScriptedTransport) -> SchoolFinder<ScriptedTransport> {
    SchoolFinder::with_transport(transport, FinderConfig::default())
}

#[tokio::test]
async fn test_unresolvable_city_skips_spatial_query() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json(NOMINATIM_SEARCH_URL, "[]")
        .respond_json("https://overpass", MAJORSTUEN);
    let finder = finder(transport);

    let err = finder.search("Atlantisxyz").await.unwrap_err();
    assert!(matches!(err, SchoolFinderError::NotFound { ref city } if city == "Atlantisxyz"));
    assert_eq!(err.user_message(), "City not found");

    let sent = finder.transport().requests();
    assert_eq!(sent.len(), 1, "only the geocoder should be contacted");
    assert_eq!(sent[0].query_value("q"), Some("Atlantisxyz"));
    assert_eq!(sent[0].query_value("limit"), Some("1"));
}

#[tokio::test]
async fn test_oslo_end_to_end() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json(NOMINATIM_SEARCH_URL, OSLO)
        .respond_json(DEFAULT_OVERPASS_MIRRORS[0], MAJORSTUEN)
        .respond_json(DEFAULT_FALLBACK_URL, PLACES);
    let finder = finder(transport);

    let session = finder.search("Oslo").await.expect("Search should work");

    assert_eq!(session.count(), 1);
    assert_eq!(session.origin, ResultOrigin::Overpass);
    let school = &session.records()[0];
    assert_eq!(school.name, "Majorstuen skole");
    assert_eq!(school.website, "");
    assert_eq!(school.school_type, SchoolType::Unknown);
    assert_eq!(school.contact, "");

    assert!(finder.transport().requests_to(DEFAULT_FALLBACK_URL).is_empty());

    let overpass = finder.transport().requests_to(DEFAULT_OVERPASS_MIRRORS[0]);
    assert_eq!(overpass.len(), 1);
    assert_eq!(overpass[0].method, Method::Post);
    let query = overpass[0].body.as_deref().unwrap();
    assert!(query.starts_with("[out:json][timeout:60];"));
    assert!(query.trim_end().ends_with("out center tags qt;"));
}

#[tokio::test]
async fn test_zero_elements_uses_fallback_once_then_no_results() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json(NOMINATIM_SEARCH_URL, OSLO)
        .respond_json(DEFAULT_OVERPASS_MIRRORS[0], NO_ELEMENTS)
        .respond_json(DEFAULT_FALLBACK_URL, r#"{"places":[]}"#);
    let finder = finder(transport);

    let err = finder.search("Oslo").await.unwrap_err();
    assert!(matches!(err, SchoolFinderError::NoResults { .. }));
    assert_eq!(err.user_message(), "No schools found in this area");

    let fallback = finder.transport().requests_to(DEFAULT_FALLBACK_URL);
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0].query_value("q"), Some("schools in Oslo"));
}

#[tokio::test]
async fn test_fallback_records_become_session() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json(NOMINATIM_SEARCH_URL, OSLO)
        .respond_json(DEFAULT_OVERPASS_MIRRORS[0], NO_ELEMENTS)
        .respond_json(DEFAULT_FALLBACK_URL, PLACES);
    let finder = finder(transport);

    let session = finder.search("Oslo").await.unwrap();
    assert_eq!(session.origin, ResultOrigin::Fallback);
    assert_eq!(session.count(), 2);
    assert!(session.records().iter().all(|r| r.school_type == SchoolType::Unknown));
    assert!(session.records().iter().all(|r| r.contact.is_empty()));
    assert_eq!(session.records()[0].website, "https://uranienborg.example");
}

#[tokio::test]
async fn test_all_mirrors_failing_degrades_to_fallback() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json(NOMINATIM_SEARCH_URL, OSLO)
        .respond_status(DEFAULT_OVERPASS_MIRRORS[0], 504)
        .fail(DEFAULT_OVERPASS_MIRRORS[1], "connection reset")
        .respond_json(DEFAULT_OVERPASS_MIRRORS[2], "<html>rate limited</html>")
        .respond_json(DEFAULT_FALLBACK_URL, PLACES);
    let finder = finder(transport);

    let session = finder.search("Oslo").await.unwrap();
    assert_eq!(session.origin, ResultOrigin::Fallback);

    let urls: Vec<_> = finder
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(
        urls,
        [
            NOMINATIM_SEARCH_URL,
            DEFAULT_OVERPASS_MIRRORS[0],
            DEFAULT_OVERPASS_MIRRORS[1],
            DEFAULT_OVERPASS_MIRRORS[2],
            DEFAULT_FALLBACK_URL,
        ]
    );
}

#[tokio::test]
async fn test_second_mirror_answers_after_first_fails() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json(NOMINATIM_SEARCH_URL, OSLO)
        .respond_status(DEFAULT_OVERPASS_MIRRORS[0], 429)
        .respond_json(DEFAULT_OVERPASS_MIRRORS[1], MAJORSTUEN);
    let finder = finder(transport);

    let session = finder.search("Oslo").await.unwrap();
    assert_eq!(session.origin, ResultOrigin::Overpass);
    assert!(finder.transport().requests_to(DEFAULT_OVERPASS_MIRRORS[2]).is_empty());
    assert!(finder.transport().requests_to(DEFAULT_FALLBACK_URL).is_empty());
}

#[tokio::test]
async fn test_geocoder_outage_is_service_error() {
    setup_test_env();

    let transport = ScriptedTransport::new().fail(NOMINATIM_SEARCH_URL, "dns failure");
    let finder = finder(transport);

    let err = finder.search("Oslo").await.unwrap_err();
    assert!(matches!(err, SchoolFinderError::ServiceError(_)));
    assert_eq!(err.user_message(), "Search failed");
    assert_eq!(finder.transport().requests().len(), 1);
}

#[tokio::test]
async fn test_blank_input_is_rejected_before_any_request() {
    setup_test_env();

    let finder = finder(ScriptedTransport::new());
    let err = finder.search("   ").await.unwrap_err();
    assert!(matches!(err, SchoolFinderError::EmptyInput));
    assert_eq!(err.user_message(), "Please enter a city");
    assert!(finder.transport().requests().is_empty());
}

#[tokio::test]
async fn test_extraction_dedupe_and_classification() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json(NOMINATIM_SEARCH_URL, OSLO)
        .respond_json(DEFAULT_OVERPASS_MIRRORS[0], MIXED);
    let finder = finder(transport);

    let session = finder.search("Oslo").await.unwrap();
    let names: Vec<_> = session.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        ["Oslo Primary School", "Oslo Montessori", "St. \"Olav\" Catholic School"]
    );

    let records = session.records();
    assert_eq!(records[0].school_type, SchoolType::Public);
    assert_eq!(records[1].school_type, SchoolType::Public);
    assert_eq!(records[1].website, "https://montessori.example");
    assert_eq!(records[2].school_type, SchoolType::Private);
    assert_eq!(records[2].contact, "Sister Maria");

    let summary = session.summary();
    assert_eq!((summary.public, summary.private, summary.unknown), (2, 1, 0));
}

#[tokio::test]
async fn test_filter_and_export_workflow() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json(NOMINATIM_SEARCH_URL, OSLO)
        .respond_json(DEFAULT_OVERPASS_MIRRORS[0], MIXED);
    let config = FinderConfigBuilder::new()
        .csv_quoting(CsvQuoting::Verbatim)
        .build();
    let finder = SchoolFinder::with_transport(transport, config);
    let session = finder.search("Oslo").await.unwrap();

    // 1. Type filter
    let public = FilterCriteria::default().with_type(TypeFilter::Public);
    assert_eq!(session.visible_count(&public), 2);

    // 2. Name search is a case-insensitive substring match
    let montessori = FilterCriteria::new(TypeFilter::All, "MONTESSORI");
    let visible = session.filter(&montessori);
    assert_eq!(visible.len(), 1);
    assert_eq!(session.filter(&montessori), visible);

    // 3. Export of the visible subset honours the configured quoting
    let verbatim = finder.export_csv(&session, &FilterCriteria::new(TypeFilter::Private, ""));
    assert_eq!(
        verbatim,
        "\"School Name\",\"Website\",\"Type\",\"Principal\"\n\"St. \"Olav\" Catholic School\",\"\",\"Private\",\"Sister Maria\""
    );
    let escaped = session.export_csv(
        &FilterCriteria::new(TypeFilter::Private, ""),
        CsvQuoting::Escaped,
    );
    assert!(escaped.contains("\"St. \"\"Olav\"\" Catholic School\""));

    // 4. File export
    let dir = tempfile::tempdir().unwrap();
    let path = session
        .write_csv(dir.path(), &public, CsvQuoting::Escaped)
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "Oslo_schools.csv");
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 3);
}

#[tokio::test]
async fn test_custom_endpoints_and_disabled_fallback() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .respond_json("http://geo.local/search", OSLO)
        .respond_status("http://primary.local", 503)
        .respond_json("http://secondary.local", NO_ELEMENTS);
    let config = FinderConfigBuilder::offline_fallback()
        .geocoder_url("http://geo.local/search")
        .overpass_mirrors([
            "http://primary.local/api/interpreter",
            "http://secondary.local/api/interpreter",
        ])
        .unwrap()
        .build();
    let finder = SchoolFinder::with_transport(transport, config);

    let err = finder.search("Oslo").await.unwrap_err();
    assert!(matches!(err, SchoolFinderError::NoResults { .. }));
    assert_eq!(finder.transport().requests().len(), 3);
}

#[tokio::test]
async fn test_finder_is_reusable_after_errors() {
    setup_test_env();

    let transport = ScriptedTransport::new()
        .route(NOMINATIM_SEARCH_URL, |request| {
            let body = if request.query_value("q") == Some("Oslo") { OSLO } else { "[]" };
            Ok(school_finder::sources::HttpResponse::ok(body))
        })
        .respond_json(DEFAULT_OVERPASS_MIRRORS[0], MAJORSTUEN);
    let finder = finder(transport);

    assert!(finder.search("Nowhere").await.is_err());
    assert!(finder.search("").await.is_err());
    let session = finder.search("Oslo").await.unwrap();
    assert_eq!(session.count(), 1);
}
