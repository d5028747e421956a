use catsays::domain::{LookupError, WordMatch};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_services;

#[tokio::test]
async fn complete_sends_wildcard_prefix() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/words"))
        .and(query_param("sp", "gru*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "word": "grub" },
            { "word": "grumpy", "score": 1204 }
        ])))
        .expect(1)
        .mount(&services.words)
        .await;

    let words = services
        .client
        .words()
        .complete("gru")
        .await
        .expect("Failed to fetch words");

    assert_eq!(
        words,
        vec![
            WordMatch {
                word: "grub".to_string(),
                score: None,
            },
            WordMatch {
                word: "grumpy".to_string(),
                score: Some(1204.0),
            },
        ]
    );
}

#[tokio::test]
async fn empty_list_is_not_an_error() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/words"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&services.words)
        .await;

    let words = services
        .client
        .words()
        .complete("zzzq")
        .await
        .expect("Failed to fetch words");

    assert!(words.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_request_error() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/words"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&services.words)
        .await;

    let result = services.client.words().complete("gru").await;

    assert!(
        matches!(&result, Err(LookupError::Request(message)) if message.starts_with("failed to decode word list")),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn failing_service_is_a_request_error() {
    let services = spawn_services().await;

    Mock::given(method("GET"))
        .and(path("/words"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&services.words)
        .await;

    let result = services.client.words().complete("gru").await;

    assert_eq!(
        result,
        Err(LookupError::request("request failed (503 Service Unavailable)"))
    );
}
