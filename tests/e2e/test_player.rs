use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_build_the_lesson_playback_document(ctx: &TestContext) {
    let course = ctx.fixtures.create_course("Rust 101", "Intro").await.unwrap();

    // Created through the API so narration audio exists
    let response = ctx
        .client
        .post(
            &format!("/api/courses/{}/lessons", course.id),
            &json!({"title": "Ownership", "position": 1}),
        )
        .await
        .unwrap();
    let lesson_id = response
        .body
        .as_ref()
        .unwrap()
        .get("id")
        .and_then(|v| v.as_i64())
        .unwrap();

    ctx.client
        .post(
            &format!("/api/lessons/{}/segments", lesson_id),
            &json!({"position": 2, "kind": "key_wait", "text": "Press space", "key_label": "space", "error_text": "Wrong key"}),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);
    ctx.client
        .post(
            &format!("/api/lessons/{}/segments", lesson_id),
            &json!({"position": 1, "kind": "narration", "text": "Welcome"}),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .client
        .get(&format!("/api/lessons/{}/player", lesson_id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("id").and_then(|v| v.as_i64()), Some(lesson_id));
    assert_eq!(body.get("title").and_then(|v| v.as_str()), Some("Ownership"));
    assert_eq!(
        body.get("audio_url").and_then(|v| v.as_str()),
        Some(format!("/media/lessons_audio/lesson_{}.mp3", lesson_id).as_str())
    );

    // Segments come back in playback order with their audio
    let segments = body.get("segments").and_then(|v| v.as_array()).unwrap();
    assert_eq!(segments.len(), 2);

    assert_eq!(
        segments[0].get("kind").and_then(|v| v.as_str()),
        Some("narration")
    );
    assert_eq!(
        segments[0].get("text").and_then(|v| v.as_str()),
        Some("Welcome")
    );
    assert!(segments[0].get("audio_url").is_some());
    assert!(segments[0].get("error_audio_url").is_none());

    assert_eq!(
        segments[1].get("kind").and_then(|v| v.as_str()),
        Some("key_wait")
    );
    assert_eq!(
        segments[1].get("key_label").and_then(|v| v.as_str()),
        Some("space")
    );
    assert_eq!(
        segments[1].get("error_text").and_then(|v| v.as_str()),
        Some("Wrong key")
    );
    assert!(segments[1].get("error_audio_url").is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_missing_lesson_player(ctx: &TestContext) {
    let response = ctx.client.get("/api/lessons/9999/player").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_segments_for_bare_lesson(ctx: &TestContext) {
    let course = ctx.fixtures.create_course("Rust 101", "Intro").await.unwrap();
    let lesson = ctx
        .fixtures
        .create_lesson(course.id, "Ownership", 1)
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/lessons/{}/player", lesson.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    let segments = body.get("segments").and_then(|v| v.as_array()).unwrap();
    assert!(segments.is_empty());
    // Fixture-created lesson has no narration yet
    assert!(body.get("audio_url").is_none());
}
