use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_narrate_only_the_primary_text_when_no_error_text(ctx: &TestContext) {
    let course = ctx.fixtures.create_course("Rust 101", "Intro").await.unwrap();
    let lesson = ctx
        .fixtures
        .create_lesson(course.id, "Ownership", 1)
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/lessons/{}/segments", lesson.id),
            &json!({
                "position": 1,
                "kind": "key_wait",
                "text": "Press space",
                "key_label": "space"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    let segment_id = body.get("id").and_then(|v| v.as_i64()).unwrap();
    assert_eq!(body.get("kind").and_then(|v| v.as_str()), Some("key_wait"));
    assert_eq!(
        body.get("narration_status").and_then(|v| v.as_str()),
        Some("ready")
    );
    assert_eq!(
        body.get("audio_url").and_then(|v| v.as_str()),
        Some(format!("/media/segments_audio/seg_{}.mp3", segment_id).as_str())
    );
    // Absent error text means no error audio and no extra synthesis call
    assert!(body.get("error_audio_url").is_none());
    assert_eq!(ctx.tts.texts(), vec!["Press space".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_narrate_error_text_independently(ctx: &TestContext) {
    let course = ctx.fixtures.create_course("Rust 101", "Intro").await.unwrap();
    let lesson = ctx
        .fixtures
        .create_lesson(course.id, "Ownership", 1)
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/lessons/{}/segments", lesson.id),
            &json!({
                "position": 1,
                "kind": "key_wait",
                "text": "Press space",
                "key_label": "space"
            }),
        )
        .await
        .unwrap();
    let segment_id = response
        .body
        .as_ref()
        .unwrap()
        .get("id")
        .and_then(|v| v.as_i64())
        .unwrap();
    assert_eq!(ctx.tts.call_count(), 1);

    // Adding error text while the primary text is unchanged synthesizes
    // only the error prompt
    let response = ctx
        .client
        .put(
            &format!("/api/segments/{}", segment_id),
            &json!({
                "position": 1,
                "kind": "key_wait",
                "text": "Press space",
                "error_text": "Wrong key",
                "key_label": "space"
            }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    assert_eq!(ctx.tts.texts(), vec![
        "Press space".to_string(),
        "Wrong key".to_string()
    ]);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        body.get("error_audio_url").and_then(|v| v.as_str()),
        Some(format!("/media/segments_audio/errors/seg_err_{}.mp3", segment_id).as_str())
    );

    let (audio, error_audio, status) = ctx.fixtures.segment_media(segment_id).await.unwrap();
    assert_eq!(
        audio.as_deref(),
        Some(format!("segments_audio/seg_{}.mp3", segment_id).as_str())
    );
    assert_eq!(
        error_audio.as_deref(),
        Some(format!("segments_audio/errors/seg_err_{}.mp3", segment_id).as_str())
    );
    assert_eq!(status, "ready");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_default_to_narration_kind_and_position(ctx: &TestContext) {
    let course = ctx.fixtures.create_course("Rust 101", "Intro").await.unwrap();
    let lesson = ctx
        .fixtures
        .create_lesson(course.id, "Ownership", 1)
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/lessons/{}/segments", lesson.id),
            &json!({"text": "Welcome to the lesson"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("kind").and_then(|v| v.as_str()), Some("narration"));
    assert_eq!(body.get("position").and_then(|v| v.as_i64()), Some(1));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_segments_in_playback_order(ctx: &TestContext) {
    let course = ctx.fixtures.create_course("Rust 101", "Intro").await.unwrap();
    let lesson = ctx
        .fixtures
        .create_lesson(course.id, "Ownership", 1)
        .await
        .unwrap();
    ctx.fixtures
        .create_segment(
            lesson.id,
            2,
            examvoice_backend::domain::course::SegmentKind::Narration,
            "Second",
        )
        .await
        .unwrap();
    ctx.fixtures
        .create_segment(
            lesson.id,
            1,
            examvoice_backend::domain::course::SegmentKind::Narration,
            "First",
        )
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/lessons/{}/segments", lesson.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let segments = response.body.as_ref().unwrap().as_array().unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].get("text").and_then(|v| v.as_str()), Some("First"));
    assert_eq!(segments[1].get("text").and_then(|v| v.as_str()), Some("Second"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_segment_text(ctx: &TestContext) {
    let course = ctx.fixtures.create_course("Rust 101", "Intro").await.unwrap();
    let lesson = ctx
        .fixtures
        .create_lesson(course.id, "Ownership", 1)
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/lessons/{}/segments", lesson.id),
            &json!({"text": "  "}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_delete_segment(ctx: &TestContext) {
    let course = ctx.fixtures.create_course("Rust 101", "Intro").await.unwrap();
    let lesson = ctx
        .fixtures
        .create_lesson(course.id, "Ownership", 1)
        .await
        .unwrap();
    let segment = ctx
        .fixtures
        .create_segment(
            lesson.id,
            1,
            examvoice_backend::domain::course::SegmentKind::Narration,
            "Welcome",
        )
        .await
        .unwrap();

    ctx.client
        .delete(&format!("/api/segments/{}", segment.id))
        .await
        .unwrap()
        .assert_status(StatusCode::NO_CONTENT);

    ctx.client
        .delete(&format!("/api/segments/{}", segment.id))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
}
