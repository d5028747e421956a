use std::time::Duration;

use catsays::application::{KeyDisposition, lookup_once};
use catsays::domain::{LookupError, ResultView};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{spawn_services, wait_for_state};

fn cat_response(body: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "image/jpeg")
        .set_body_bytes(body.to_vec())
}

fn words_response(words: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(words)
}

#[tokio::test]
async fn typing_finds_a_cat_and_a_suggestion() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/cat/gru"))
        .respond_with(cat_response(b"gru-cat"))
        .expect(1)
        .mount(&services.cats)
        .await;
    Mock::given(method("GET"))
        .and(path("/words"))
        .and(query_param("sp", "gru*"))
        .respond_with(words_response(serde_json::json!([
            { "word": "grub" },
            { "word": "grumpy", "score": 900 }
        ])))
        .mount(&services.words)
        .await;

    let search = services.coordinator();
    let mut states = search.subscribe();

    search.set_query("g");
    search.set_query("gr");
    search.set_query("gru");

    let state = wait_for_state(&mut states, |s| {
        s.result.is_some() && s.suggestion.is_some()
    })
    .await;

    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.result.as_ref().map(|i| i.bytes()), Some(&b"gru-cat"[..]));
    assert_eq!(state.prediction().as_deref(), Some("grumpy"));

    assert_eq!(search.accept_suggestion(), KeyDisposition::Handled);
    assert_eq!(search.snapshot().query, "grumpy");
}

#[tokio::test]
async fn says_query_completes_the_caption() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/cat/grumpy%20cat/says/hel"))
        .respond_with(cat_response(b"says-cat"))
        .mount(&services.cats)
        .await;
    Mock::given(method("GET"))
        .and(path("/words"))
        .and(query_param("sp", "hel*"))
        .respond_with(words_response(serde_json::json!([{ "word": "hello", "score": 10 }])))
        .mount(&services.words)
        .await;

    let search = services.coordinator();
    let mut states = search.subscribe();
    search.set_query("grumpy cat says hel");

    let state = wait_for_state(&mut states, |s| {
        s.result.is_some() && s.suggestion.is_some()
    })
    .await;

    assert_eq!(
        state.prediction().as_deref(),
        Some("grumpy cat says hello")
    );
}

#[tokio::test]
async fn missing_cat_shows_not_found_without_error() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/cat/dragon"))
        .respond_with(ResponseTemplate::new(404).set_delay(Duration::from_millis(200)))
        .mount(&services.cats)
        .await;

    let search = services.coordinator();
    let mut states = search.subscribe();
    search.set_query("dragon");

    wait_for_state(&mut states, |s| s.loading).await;
    let state = wait_for_state(&mut states, |s| !s.loading).await;

    assert_eq!(state.result, None);
    assert_eq!(state.error, None);
    assert_eq!(state.view(), ResultView::NotFound);
}

#[tokio::test]
async fn server_error_is_shown_to_the_user() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/cat/grumpy"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&services.cats)
        .await;

    let search = services.coordinator();
    let mut states = search.subscribe();
    search.set_query("grumpy");

    let state = wait_for_state(&mut states, |s| s.error.is_some()).await;

    assert!(!state.loading);
    assert_eq!(state.result, None);
    assert_eq!(
        state.error.as_deref(),
        Some("request failed (500 Internal Server Error): boom")
    );
}

#[tokio::test]
async fn word_service_failure_stays_silent() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/cat/grumpy"))
        .respond_with(cat_response(b"grumpy-cat"))
        .mount(&services.cats)
        .await;
    Mock::given(method("GET"))
        .and(path("/words"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&services.words)
        .await;

    let search = services.coordinator();
    let mut states = search.subscribe();
    search.set_query("grumpy");

    let state = wait_for_state(&mut states, |s| s.result.is_some()).await;
    // give the word lookup time to settle
    tokio::time::sleep(Duration::from_millis(200)).await;

    let state_after = search.snapshot();
    assert_eq!(state.error, None);
    assert_eq!(state_after.error, None);
    assert_eq!(state_after.suggestion, None);
}

#[tokio::test]
async fn superseded_slow_cat_never_shows_up() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/cat/slow"))
        .respond_with(cat_response(b"slow-cat").set_delay(Duration::from_millis(500)))
        .mount(&services.cats)
        .await;
    Mock::given(method("GET"))
        .and(path("/cat/fast"))
        .respond_with(cat_response(b"fast-cat"))
        .mount(&services.cats)
        .await;

    let search = services.coordinator();
    let mut states = search.subscribe();

    search.set_query("slow");
    wait_for_state(&mut states, |s| s.loading).await;
    search.set_query("fast");

    let state = wait_for_state(&mut states, |s| s.result.is_some()).await;
    assert_eq!(state.result.as_ref().map(|i| i.bytes()), Some(&b"fast-cat"[..]));

    tokio::time::sleep(Duration::from_millis(700)).await;
    let state = search.snapshot();
    assert_eq!(state.query, "fast");
    assert_eq!(state.result.as_ref().map(|i| i.bytes()), Some(&b"fast-cat"[..]));
}

#[tokio::test]
async fn lookup_once_reports_image_and_suggestion() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/cat/grumpy"))
        .respond_with(cat_response(b"grumpy-cat"))
        .mount(&services.cats)
        .await;
    Mock::given(method("GET"))
        .and(path("/words"))
        .and(query_param("sp", "grumpy*"))
        .respond_with(words_response(serde_json::json!([{ "word": "grumpyish" }])))
        .mount(&services.words)
        .await;

    let client = services.client.as_ref();
    let report = lookup_once(client, client, "grumpy").await;

    assert_eq!(report.suggestion.as_deref(), Some("grumpyish"));
    assert_eq!(report.says, None);
    assert_eq!(
        report.image.as_ref().map(|i| i.bytes()),
        Ok(&b"grumpy-cat"[..])
    );
}

#[tokio::test]
async fn lookup_once_passes_not_found_through() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/cat/dragon"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&services.cats)
        .await;

    let client = services.client.as_ref();
    let report = lookup_once(client, client, "dragon").await;

    assert_eq!(report.image, Err(LookupError::NotFound));
    assert_eq!(report.suggestion, None);
}
