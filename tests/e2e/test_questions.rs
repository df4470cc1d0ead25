use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_question_and_narrate_its_text(ctx: &TestContext) {
    let exam = ctx.fixtures.create_exam("Math", "Algebra").await.unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/exams/{}/questions", exam.id),
            &json!({"text": "What is 2+2?", "position": 1}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    let question_id = body.get("id").and_then(|v| v.as_i64()).unwrap();
    assert_eq!(
        body.get("narration_status").and_then(|v| v.as_str()),
        Some("ready")
    );
    assert_eq!(
        body.get("audio_url").and_then(|v| v.as_str()),
        Some(format!("/media/questions_audio/q_{}.mp3", question_id).as_str())
    );

    // Question narration is the raw question text, no template around it
    assert_eq!(ctx.tts.texts(), vec!["What is 2+2?".to_string()]);
    assert!(ctx.media_file_exists(&format!("questions_audio/q_{}.mp3", question_id)));

    let (audio_file, status) = ctx.fixtures.question_media(question_id).await.unwrap();
    assert_eq!(audio_file.as_deref(), Some(format!("questions_audio/q_{}.mp3", question_id).as_str()));
    assert_eq!(status, "ready");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_regenerate_when_question_text_changes(ctx: &TestContext) {
    let exam = ctx.fixtures.create_exam("Math", "Algebra").await.unwrap();
    let response = ctx
        .client
        .post(
            &format!("/api/exams/{}/questions", exam.id),
            &json!({"text": "What is 2+2?", "position": 1}),
        )
        .await
        .unwrap();
    let question_id = response
        .body
        .as_ref()
        .unwrap()
        .get("id")
        .and_then(|v| v.as_i64())
        .unwrap();
    assert_eq!(ctx.tts.call_count(), 1);

    ctx.client
        .put(
            &format!("/api/questions/{}", question_id),
            &json!({"text": "What is 3+3?", "position": 1}),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    assert_eq!(ctx.tts.texts(), vec![
        "What is 2+2?".to_string(),
        "What is 3+3?".to_string()
    ]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_resynthesize_on_position_only_change(ctx: &TestContext) {
    let exam = ctx.fixtures.create_exam("Math", "Algebra").await.unwrap();
    let response = ctx
        .client
        .post(
            &format!("/api/exams/{}/questions", exam.id),
            &json!({"text": "What is 2+2?", "position": 1}),
        )
        .await
        .unwrap();
    let question_id = response
        .body
        .as_ref()
        .unwrap()
        .get("id")
        .and_then(|v| v.as_i64())
        .unwrap();
    assert_eq!(ctx.tts.call_count(), 1);

    // Reordering does not touch the narrated text
    ctx.client
        .put(
            &format!("/api/questions/{}", question_id),
            &json!({"text": "What is 2+2?", "position": 5}),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    assert_eq!(ctx.tts.call_count(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_questions_in_playback_order(ctx: &TestContext) {
    let exam = ctx.fixtures.create_exam("Math", "Algebra").await.unwrap();
    ctx.fixtures
        .create_question(exam.id, "Second", 2)
        .await
        .unwrap();
    ctx.fixtures
        .create_question(exam.id, "First", 1)
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/exams/{}/questions", exam.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let questions = response.body.as_ref().unwrap().as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].get("text").and_then(|v| v.as_str()), Some("First"));
    assert_eq!(questions[1].get("text").and_then(|v| v.as_str()), Some("Second"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_question_text(ctx: &TestContext) {
    let exam = ctx.fixtures.create_exam("Math", "Algebra").await.unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/exams/{}/questions", exam.id),
            &json!({"text": "", "position": 1}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_when_creating_question_for_missing_exam(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/exams/9999/questions",
            &json!({"text": "What is 2+2?", "position": 1}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_delete_question(ctx: &TestContext) {
    let exam = ctx.fixtures.create_exam("Math", "Algebra").await.unwrap();
    let question = ctx
        .fixtures
        .create_question(exam.id, "What is 2+2?", 1)
        .await
        .unwrap();

    ctx.client
        .delete(&format!("/api/questions/{}", question.id))
        .await
        .unwrap()
        .assert_status(StatusCode::NO_CONTENT);

    ctx.client
        .delete(&format!("/api/questions/{}", question.id))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
}
