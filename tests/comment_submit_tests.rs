mod helpers;

use axum::http::StatusCode;
use fake::{faker, Fake};
use helpers::{fake_post, session_cookie, ApiCall};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use thread_page_server::entities::comment::NewComment;

test_with_server!(submission_writes_then_rereads_post, |server, ctx_state, api| {
    api.insert_post(fake_post("p1", &[("c1", "ann", "2023-01-01T00:00:00Z")]));

    server
        .get("/post/p1/thread")
        .add_header("Cookie", session_cookie(Some("alice")))
        .await
        .assert_status_ok();

    let response = server
        .post("/post/p1/comments")
        .add_header("Accept", "application/json")
        .add_header("Cookie", session_cookie(Some("alice")))
        .json(&json!({ "comment": "hello", "toast_id": "toast-1" }))
        .await;
    response.assert_status_ok();

    let expected_write = NewComment {
        text: "hello".to_string(),
        post_id: "p1".to_string(),
        username: Some("alice".to_string()),
    };
    assert_eq!(
        api.calls(),
        vec![
            ApiCall::Read("p1".to_string()),
            ApiCall::Write(expected_write),
            ApiCall::Read("p1".to_string()),
        ]
    );

    let body = response.json::<Value>();
    assert_eq!(body["thread"]["state"], "ready");
    assert_eq!(body["thread"]["comment_form"]["comment"], "");
    assert_eq!(body["thread"]["comments"][0]["text"], "hello");
    assert_eq!(body["thread"]["comments"][0]["username"], "alice");
    assert_eq!(body["thread"]["comments"][1]["id"], "c1");
    assert_eq!(
        body["toast"],
        json!({ "id": "toast-1", "level": "success", "message": "Comment Successfully Posted!" })
    );
});

test_with_server!(htmx_submission_swaps_thread_and_toast, |server, ctx_state, api| {
    api.insert_post(fake_post("p1", &[]));

    let response = server
        .post("/post/p1/comments")
        .add_header("HX-Request", "true")
        .add_header("Cookie", session_cookie(Some("alice")))
        .form(&[("comment", "hello"), ("toast_id", "t-1")])
        .await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains("id=\"post-thread\""));
    assert!(html.contains("hx-swap-oob=\"true\""));
    assert!(html.contains("id=\"toast-t-1\""));
    assert!(html.contains("Comment Successfully Posted!"));
    assert!(html.contains("\"></textarea>"));
    assert!(html.contains("hello"));
});

test_with_server!(submission_text_is_escaped_in_thread, |server, ctx_state, api| {
    api.insert_post(fake_post("p1", &[]));
    let sentence: String = faker::lorem::en::Sentence(3..8).fake();
    let text = format!("{sentence} <script>alert(1)</script>");

    let response = server
        .post("/post/p1/comments")
        .add_header("HX-Request", "true")
        .add_header("Cookie", session_cookie(Some("alice")))
        .form(&[("comment", text.as_str())])
        .await;
    response.assert_status_ok();
    let html = response.text();

    assert!(!html.contains("<script>alert(1)"));
    assert!(html.contains("&lt;script&gt;"));
    assert_eq!(api.writes()[0].text, text);
});

test_with_server!(signed_out_submission_is_rejected, |server, ctx_state, api| {
    api.insert_post(fake_post("p1", &[]));

    let response = server
        .post("/post/p1/comments")
        .add_header("Accept", "application/json")
        .json(&json!({ "comment": "hello" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"], "Please sign in to comment");
    assert!(api.writes().is_empty());
});

test_with_server!(session_without_name_sends_no_username, |server, ctx_state, api| {
    api.insert_post(fake_post("p1", &[]));

    server
        .post("/post/p1/comments")
        .add_header("Accept", "application/json")
        .add_header("Cookie", session_cookie(None))
        .json(&json!({ "comment": "anonymous" }))
        .await
        .assert_status_ok();

    assert_eq!(api.writes()[0].username, None);
});

test_with_server!(failed_write_reports_no_success, |server, ctx_state, api| {
    api.insert_post(fake_post("p1", &[]));
    api.fail_writes.store(true, Ordering::SeqCst);

    let response = server
        .post("/post/p1/comments")
        .add_header("HX-Request", "true")
        .add_header("Cookie", session_cookie(Some("alice")))
        .form(&[("comment", "hello"), ("toast_id", "t-1")])
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert!(!response.text().contains("Comment Successfully Posted!"));
    assert_eq!(api.reads(), 0);
});

test_with_server!(unsupported_body_is_rejected, |server, ctx_state, api| {
    let response = server
        .post("/post/p1/comments")
        .add_header("Cookie", session_cookie(Some("alice")))
        .text("hello")
        .await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(api.calls().is_empty());
});
