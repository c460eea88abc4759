use httpmock::prelude::*;
use reply_generator_client::{
    Client, Error, FormState, NoticeLevel, ReplyController, RequestStatus, Tone,
};
use serde_json::json;
use std::time::Duration;

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.base_url())
        .build()
        .expect("client builds")
}

fn friendly_form() -> ReplyController {
    let mut form = ReplyController::new();
    form.set_email_content("Hi, are you available tomorrow?");
    form.set_tone(Some(Tone::Friendly));
    form
}

#[tokio::test]
async fn successful_submit_shows_reply() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/email/generate")
                .json_body(json!({
                    "emailContent": "Hi, are you available tomorrow?",
                    "tone": "friendly"
                }));
            then.status(200).body("Sure, I'm free after 2pm!");
        })
        .await;

    let mut form = friendly_form();
    let notice = form.submit(&client_for(&server)).await;

    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Email reply generated successfully!");
    assert_eq!(form.state().outcome.status, RequestStatus::Success);
    assert_eq!(form.state().outcome.reply_text, "Sure, I'm free after 2pm!");
    assert!(form.pending_request().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn rate_limited_submit_keeps_previous_reply() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/email/generate")
                .json_body(json!({"emailContent": "First mail", "tone": "friendly"}));
            then.status(200).body("Earlier reply");
        })
        .await;
    let limited = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/email/generate")
                .json_body(json!({
                    "emailContent": "Hi, are you available tomorrow?",
                    "tone": "friendly"
                }));
            then.status(429).body("");
        })
        .await;

    let client = client_for(&server);
    let mut form = friendly_form();
    form.set_email_content("First mail");
    form.submit(&client).await;
    assert_eq!(form.state().outcome.reply_text, "Earlier reply");

    form.set_email_content("Hi, are you available tomorrow?");
    let notice = form.submit(&client).await;

    assert!(notice.is_error());
    let outcome = &form.state().outcome;
    assert_eq!(outcome.status, RequestStatus::Failed);
    assert_eq!(outcome.reply_text, "Earlier reply");
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("Too many requests. Please wait a moment and try again.")
    );
    limited.assert_hits_async(1).await;
}

#[tokio::test]
async fn blank_submit_is_local_only() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/api/email/generate");
            then.status(200);
        })
        .await;

    let mut form = ReplyController::new();
    form.set_email_content("   ");
    let notice = form.submit(&client_for(&server)).await;

    assert_eq!(notice.message, "Please enter email content");
    assert!(notice.is_error());
    assert_eq!(*form.state(), {
        let mut expected = FormState::default();
        expected.draft.email_content = "   ".into();
        expected
    });
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn failed_submit_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/email/generate");
            then.status(500);
        })
        .await;

    let mut form = friendly_form();
    let notice = form.submit(&client_for(&server)).await;

    assert_eq!(notice.message, "Server error. Please try again later.");
    assert_eq!(form.state().outcome.status, RequestStatus::Failed);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn maintenance_message_reaches_error_banner() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/email/generate");
            then.status(503)
                .json_body(json!({"message": "Down for maintenance"}));
        })
        .await;

    let mut form = friendly_form();
    let notice = form.submit(&client_for(&server)).await;

    assert_eq!(notice.message, "Down for maintenance");
    assert_eq!(
        form.state().outcome.error_message.as_deref(),
        Some("Down for maintenance")
    );
}

#[tokio::test]
async fn spawned_submit_completes_through_handle() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/email/generate");
            then.status(200).body("Spawned reply");
        })
        .await;

    let mut form = friendly_form();
    let handle = form.spawn_submit(&client_for(&server)).unwrap();
    assert_eq!(form.state().outcome.status, RequestStatus::Pending);
    assert!(matches!(
        form.spawn_submit(&client_for(&server)),
        Err(Error::RequestInFlight)
    ));

    let (id, result) = handle.join().await;
    let notice = form.complete(id, result).expect("current request");

    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(form.state().outcome.reply_text, "Spawned reply");
}

#[tokio::test]
async fn late_response_after_reset_is_ignored() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/email/generate");
            then.status(200)
                .body("Late reply")
                .delay(Duration::from_millis(200));
        })
        .await;

    let mut form = friendly_form();
    let handle = form.spawn_submit(&client_for(&server)).unwrap();
    let notice = form.reset_all();
    assert_eq!(notice.message, "All fields cleared!");

    let (id, result) = handle.join().await;
    assert!(result.is_ok());
    assert!(form.complete(id, result).is_none());
    assert_eq!(*form.state(), FormState::default());
}

#[tokio::test]
async fn aborted_request_reports_cancellation() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/email/generate");
            then.status(200).body("never").delay(Duration::from_secs(5));
        })
        .await;

    let mut form = friendly_form();
    let handle = form.spawn_submit(&client_for(&server)).unwrap();
    handle.abort();

    let (id, result) = handle.join().await;
    assert!(matches!(result, Err(Error::Cancelled)));

    let notice = form.complete(id, result).expect("current request");
    assert!(notice.is_error());
    assert_eq!(form.state().outcome.status, RequestStatus::Failed);
    assert!(form.state().can_submit());
}
