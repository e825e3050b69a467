use std::time::Duration;

use globetrotter::core::action::{Action, update};
use globetrotter::core::filter::FilterState;
use globetrotter::core::state::App;
use globetrotter::source::{
    CountrySource, DataFetchError, RestCountriesSource, RetryPolicy, load_catalog,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn source_for(server: &MockServer, fields: &[&str]) -> RestCountriesSource {
    RestCountriesSource::new(
        Some(format!("{}/v3.1", server.uri())),
        fields.iter().map(|f| f.to_string()).collect(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn quick_retries(retries: u32) -> RetryPolicy {
    RetryPolicy::new(retries, Duration::from_millis(10))
}

/// A small payload in the provider's format, deliberately out of order.
fn sample_payload() -> serde_json::Value {
    json!([
        {
            "name": { "common": "Aruba", "official": "Aruba" },
            "cca2": "AW",
            "flags": { "png": "https://flagcdn.com/w320/aw.png", "svg": "https://flagcdn.com/aw.svg" },
            "population": 106766,
            "continents": ["North America"],
            "subregion": "Caribbean",
            "capital": ["Oranjestad"],
            "independent": false,
            "languages": { "nld": "Dutch", "pap": "Papiamento" },
            "currencies": { "AWG": { "name": "Aruban florin", "symbol": "ƒ" } },
            "demonyms": { "eng": { "f": "Aruban", "m": "Aruban" } },
            "maps": { "googleMaps": "https://goo.gl/maps/8hopbQqifHAgyZyg8" }
        },
        {
            "name": { "common": "Åland Islands", "official": "Åland Islands" },
            "cca2": "AX",
            "flags": { "png": "https://flagcdn.com/w320/ax.png" },
            "population": 29458,
            "continents": ["Europe"],
            "independent": false
        },
        {
            "name": { "common": "Afghanistan", "official": "Islamic Republic of Afghanistan" },
            "cca2": "AF",
            "flags": { "png": "https://flagcdn.com/w320/af.png" },
            "population": 40218234,
            "continents": ["Asia"],
            "independent": true
        },
        {
            "name": { "official": "Nameless Republic" },
            "continents": ["Europe"]
        },
        {
            "name": { "common": "Albania", "official": "Republic of Albania" },
            "cca2": "AL",
            "population": 2837743,
            "continents": ["Europe"],
            "independent": true
        }
    ])
}

fn names(app: &App) -> Vec<String> {
    app.visible_countries()
        .iter()
        .map(|c| c.common_name.clone())
        .collect()
}

// ============================================================================
// REST Countries Source Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_and_normalize_sorted_catalog() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &[]);
    let batch = load_catalog(&source, RetryPolicy::default()).await.unwrap();

    let names: Vec<&str> = batch.records.iter().map(|c| c.common_name.as_str()).collect();
    assert_eq!(names, vec!["Afghanistan", "Åland Islands", "Albania", "Aruba"]);
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].index, 3);

    let aruba = &batch.records[3];
    assert_eq!(aruba.capitals, vec!["Oranjestad"]);
    assert_eq!(aruba.currencies["AWG"].symbol.as_deref(), Some("ƒ"));
    assert_eq!(aruba.demonym_masculine_english.as_deref(), Some("Aruban"));
    assert!(!aruba.is_sovereign);
}

#[tokio::test]
async fn test_fields_are_sent_as_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .and(query_param("fields", "name,cca2,continents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &["name", "cca2", "continents"]);
    let payload = source.fetch_countries().await.unwrap();
    assert_eq!(payload, json!([]));
}

#[tokio::test]
async fn test_http_error_becomes_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &[]);
    let result = load_catalog(&source, quick_retries(2)).await;

    match result {
        Err(DataFetchError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("Not Found"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_array_payload_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 404 })))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &[]);
    let result = load_catalog(&source, RetryPolicy::default()).await;
    assert!(matches!(result, Err(DataFetchError::Parse(_))));
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &[]);
    let result = source.fetch_countries().await;
    assert!(matches!(result, Err(DataFetchError::Parse(_))));
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &[]);
    let batch = load_catalog(&source, quick_retries(1)).await.unwrap();
    assert_eq!(batch.records.len(), 4);
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &[]);
    let result = load_catalog(&source, RetryPolicy::default()).await;
    assert!(matches!(result, Err(DataFetchError::Api { status: 500, .. })));
}

// ============================================================================
// End-to-end: fetch, load, filter, favorite
// ============================================================================

#[tokio::test]
async fn test_loaded_catalog_drives_the_views() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &[]);
    let batch = load_catalog(&source, RetryPolicy::default()).await.unwrap();

    let mut app = App::new(source.name().to_string(), FilterState::default());
    update(&mut app, Action::CatalogLoaded(batch));
    assert_eq!(app.rejected_count, 1);
    assert_eq!(names(&app), vec!["Afghanistan", "Åland Islands", "Albania", "Aruba"]);

    update(&mut app, Action::ToggleContinentFilter("Europe".to_string()));
    update(&mut app, Action::SetShowNonSovereign(false));
    assert_eq!(names(&app), vec!["Albania"]);

    let albania = app.catalog.find("Albania").cloned().unwrap();
    update(&mut app, Action::ToggleFavorite(albania));
    assert!(names(&app).is_empty());
    assert_eq!(app.favorite_countries().len(), 1);
    assert!(app.load_error().is_none());
}

#[tokio::test]
async fn test_failed_fetch_leaves_empty_catalog_with_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, &[]);
    let error = load_catalog(&source, RetryPolicy::default())
        .await
        .unwrap_err();

    let mut app = App::new(source.name().to_string(), FilterState::default());
    update(&mut app, Action::CatalogFailed(error.to_string()));
    assert!(app.catalog.is_empty());
    assert!(app.load_failed());
    assert!(names(&app).is_empty());
}
