use std::time::Duration;

use catalog_engine::{CharacterFetcher, FailureKind, FetchSettings, ReqwestFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RICK_PAGE: &str = r#"{
  "info": { "count": 3, "pages": 1, "next": null, "prev": null },
  "results": [
    {
      "id": 1, "name": "Rick Sanchez", "status": "Alive", "species": "Human",
      "type": "", "gender": "Male",
      "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
      "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
      "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
      "episode": [], "url": "", "created": ""
    },
    {
      "id": 8, "name": "Adjudicator Rick", "status": "Dead", "species": "Human",
      "type": "", "gender": "Male",
      "origin": { "name": "unknown", "url": "" },
      "location": { "name": "Citadel of Ricks", "url": "" },
      "image": "https://rickandmortyapi.com/api/character/avatar/8.jpeg",
      "episode": [], "url": "", "created": ""
    },
    {
      "id": 15, "name": "Alien Rick", "status": "unknown", "species": "Alien",
      "type": "", "gender": "Male",
      "origin": { "name": "unknown", "url": "" },
      "location": { "name": "Earth (Replacement Dimension)", "url": "" },
      "image": "https://rickandmortyapi.com/api/character/avatar/15.jpeg",
      "episode": [], "url": "", "created": ""
    }
  ]
}"#;

fn init_logging() {
    catalog_logging::initialize_for_tests();
}

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        base_url: format!("{}/api", server.uri()),
        ..FetchSettings::default()
    }
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[tokio::test]
async fn fetcher_sends_query_and_decodes_page() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", "1"))
        .and(query_param("name", "Rick"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RICK_PAGE, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("fetcher");
    let page = fetcher
        .fetch_page(&params(&[("page", "1"), ("name", "Rick")]))
        .await
        .expect("fetch ok");

    assert_eq!(page.info.count, 3);
    assert_eq!(page.info.pages, 1);
    assert_eq!(page.results.len(), 3);
    assert_eq!(page.results[0].name, "Rick Sanchez");
    assert_eq!(page.results[0].origin.name, "Earth (C-137)");
    assert_eq!(page.results[2].status, "unknown");
}

#[tokio::test]
async fn request_url_keeps_parameter_order() {
    let server = MockServer::start().await;
    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("fetcher");

    let url = fetcher.request_url(&params(&[
        ("page", "2"),
        ("name", "Mr. Meeseeks"),
        ("status", "Alive"),
        ("gender", "Male"),
    ]));

    assert_eq!(
        url.as_str(),
        format!(
            "{}/api/character?page=2&name=Mr.+Meeseeks&status=Alive&gender=Male",
            server.uri()
        )
    );
}

#[tokio::test]
async fn not_found_means_no_matches() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw(r#"{"error":"There is nothing here"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("fetcher");
    let page = fetcher
        .fetch_page(&params(&[("page", "1"), ("name", "zzzz")]))
        .await
        .expect("empty page");

    assert_eq!(page.info.count, 0);
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("fetcher");
    let err = fetcher
        .fetch_page(&params(&[("page", "1")]))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(RICK_PAGE, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings).expect("fetcher");
    let err = fetcher
        .fetch_page(&params(&[("page", "1")]))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RICK_PAGE, "application/json"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings).expect("fetcher");
    let err = fetcher
        .fetch_page(&params(&[("page", "1")]))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 10, .. }
    ));
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"info\":", "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("fetcher");
    let err = fetcher
        .fetch_page(&params(&[("page", "1")]))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[test]
fn invalid_base_url_is_rejected() {
    let settings = FetchSettings {
        base_url: "not a url".to_string(),
        ..FetchSettings::default()
    };

    let err = ReqwestFetcher::new(settings).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[test]
fn default_endpoint_targets_public_api() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("fetcher");

    assert_eq!(
        fetcher.endpoint().as_str(),
        "https://rickandmortyapi.com/api/character"
    );
}
