//! End-to-end board flow against a mocked Gemini endpoint
//!
//! Drives the session state machine through topic entry, curation, and a
//! second generation round, checking what reaches the model.

mod common;

use common::{gemini_at, gemini_reply};
use ideaboard::board::{Gateway, GenerationNotice, SessionState};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_topic_curate_and_generate_more() {
    let server = MockServer::start().await;

    // Second round: only matches once the removed idea is in the prompt
    Mock::given(method("POST"))
        .and(body_string_contains("1. Pet rock subscription"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(
            "Pet portrait studio\n\nAquarium rentals\n",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("Topic: \\\"pets\\\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(
            "Dog cafe\nPet rock subscription\nCat yoga",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = Gateway::new(Box::new(gemini_at(&server.uri())));

    let transition = SessionState::new()
        .set_topic(&gateway, "  pets  ")
        .await
        .unwrap();
    assert_eq!(transition.notice, Some(GenerationNotice::Added(3)));
    let state = transition.state;
    assert_eq!(state.topic().unwrap().as_str(), "pets");

    let state = state.remove(2).unwrap().state;
    let state = state.like(1).unwrap().state;

    let transition = state.generate_more(&gateway).await.unwrap();
    assert_eq!(transition.notice, Some(GenerationNotice::Added(2)));
    let state = transition.state;

    let visible: Vec<&str> = state.visible().map(|(_, _, i)| i.text.as_str()).collect();
    assert_eq!(
        visible,
        vec!["Dog cafe", "Cat yoga", "Pet portrait studio", "Aquarium rentals"]
    );
    assert_eq!(state.ideas().len(), 5);
    assert_eq!(state.liked().count(), 1);
    assert_eq!(state.removed().count(), 1);

    let requests = server.received_requests().await.expect("request recording");
    let second = String::from_utf8_lossy(&requests[1].body);
    assert!(second.contains("1. Dog cafe"));
    assert!(second.contains("2. Cat yoga"));
}

#[tokio::test]
async fn test_failed_generation_keeps_board_and_reports() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": { "message": "The model is overloaded", "status": "UNAVAILABLE" }
        })))
        .mount(&server)
        .await;

    let gateway = Gateway::new(Box::new(gemini_at(&server.uri())));

    let transition = SessionState::new()
        .set_topic(&gateway, "pets")
        .await
        .unwrap();

    match transition.notice {
        Some(GenerationNotice::Failed(message)) => {
            assert!(message.contains("overloaded"), "{}", message)
        }
        other => panic!("expected failure notice, got {:?}", other),
    }
    assert!(transition.state.is_board());
    assert_eq!(transition.state.visible_count(), 0);
}
