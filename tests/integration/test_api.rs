//! End-to-end tests for the mentorlink HTTP API.
//!
//! Each test binds the real router on an ephemeral port over a fresh libSQL
//! file and drives it with `reqwest`.

mod common;

use common::spawn_test_server;
use serde_json::{json, Value};

// ============================================================================
// Walk-through
// ============================================================================

#[tokio::test]
async fn test_assign_then_reassign_walkthrough() {
    let server = spawn_test_server().await;

    let ada = server.create("mentors", "Ada").await;
    let lin = server.create("students", "Lin").await;

    let (status, mentor) = server
        .post(&format!("/mentors/{ada}/students/{lin}"), None)
        .await;
    assert_eq!(status, 200);
    assert_eq!(mentor["students"], json!([lin]));

    let grace = server.create("mentors", "Grace").await;

    let (status, student) = server.put(&format!("/students/{lin}/mentor/{grace}")).await;
    assert_eq!(status, 200);
    assert_eq!(student["mentor"], grace.as_str());
    assert_eq!(student["previousMentor"], ada.as_str());

    let (status, previous) = server
        .get(&format!("/students/{lin}/previous-mentor"))
        .await;
    assert_eq!(status, 200);
    assert_eq!(previous["id"], ada.as_str());
    assert_eq!(previous["name"], "Ada");

    // Ada no longer lists Lin; Grace does.
    let (_, ada_body) = server.get(&format!("/mentors/{ada}")).await;
    assert_eq!(ada_body["students"], json!([]));
    let (_, grace_students) = server.get(&format!("/mentors/{grace}/students")).await;
    assert_eq!(grace_students[0]["id"], lin.as_str());
}

#[tokio::test]
async fn test_second_reassignment_overwrites_previous_mentor() {
    let server = spawn_test_server().await;
    let m1 = server.create("mentors", "Ada").await;
    let m2 = server.create("mentors", "Grace").await;
    let m3 = server.create("mentors", "Barbara").await;
    let s = server.create("students", "Lin").await;

    server.post(&format!("/mentors/{m1}/students/{s}"), None).await;
    server.put(&format!("/students/{s}/mentor/{m2}")).await;
    let (status, student) = server.put(&format!("/students/{s}/mentor/{m3}")).await;

    assert_eq!(status, 200);
    assert_eq!(student["mentor"], m3.as_str());
    assert_eq!(student["previousMentor"], m2.as_str());
}

// ============================================================================
// Listing and lookups
// ============================================================================

#[tokio::test]
async fn test_lists_start_empty() {
    let server = spawn_test_server().await;

    let (status, mentors) = server.get("/mentors").await;
    assert_eq!(status, 200);
    assert_eq!(mentors, json!([]));

    let (status, students) = server.get("/students").await;
    assert_eq!(status, 200);
    assert_eq!(students, json!([]));
}

#[tokio::test]
async fn test_created_student_has_no_relationships() {
    let server = spawn_test_server().await;
    let lin = server.create("students", "Lin").await;

    let (status, body) = server.get(&format!("/students/{lin}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["mentor"], Value::Null);
    assert_eq!(body["previousMentor"], Value::Null);

    let (status, previous) = server
        .get(&format!("/students/{lin}/previous-mentor"))
        .await;
    assert_eq!(status, 200);
    assert_eq!(previous, Value::Null);
}

#[tokio::test]
async fn test_populate_returns_full_students() {
    let server = spawn_test_server().await;
    let ada = server.create("mentors", "Ada").await;
    let lin = server.create("students", "Lin").await;
    let kai = server.create("students", "Kai").await;

    server.post(&format!("/mentors/{ada}/students/{lin}"), None).await;
    server.post(&format!("/mentors/{ada}/students/{kai}"), None).await;

    let (status, students) = server.get(&format!("/mentors/{ada}/students")).await;
    assert_eq!(status, 200);
    let students = students.as_array().expect("array");
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["name"], "Lin");
    assert_eq!(students[1]["name"], "Kai");
    for student in students {
        assert_eq!(student["mentor"], ada.as_str());
    }
}

// ============================================================================
// Failure modes
// ============================================================================

#[tokio::test]
async fn test_unknown_ids_return_404_without_mutation() {
    let server = spawn_test_server().await;
    let ada = server.create("mentors", "Ada").await;
    let lin = server.create("students", "Lin").await;
    let missing = "0123456789abcdef01234567";

    let (status, _) = server
        .post(&format!("/mentors/{missing}/students/{lin}"), None)
        .await;
    assert_eq!(status, 404);

    let (status, _) = server
        .post(&format!("/mentors/{ada}/students/{missing}"), None)
        .await;
    assert_eq!(status, 404);

    let (status, _) = server.put(&format!("/students/{lin}/mentor/{missing}")).await;
    assert_eq!(status, 404);

    let (status, _) = server.put(&format!("/students/{missing}/mentor/{ada}")).await;
    assert_eq!(status, 404);

    let (_, student) = server.get(&format!("/students/{lin}")).await;
    assert_eq!(student["mentor"], Value::Null);
    assert_eq!(student["previousMentor"], Value::Null);
    let (_, mentor) = server.get(&format!("/mentors/{ada}")).await;
    assert_eq!(mentor["students"], json!([]));
}

#[tokio::test]
async fn test_malformed_ids_return_404() {
    let server = spawn_test_server().await;

    for path in [
        "/mentors/xyz",
        "/students/xyz",
        "/mentors/xyz/students",
        "/students/xyz/previous-mentor",
        "/mentors/0123456789ABCDEF01234567",
    ] {
        let (status, body) = server.get(path).await;
        assert_eq!(status, 404, "{path}");
        assert!(body["error"].is_string(), "{path}");
    }
}

#[tokio::test]
async fn test_double_assignment_returns_400() {
    let server = spawn_test_server().await;
    let ada = server.create("mentors", "Ada").await;
    let lin = server.create("students", "Lin").await;

    let (first, _) = server
        .post(&format!("/mentors/{ada}/students/{lin}"), None)
        .await;
    let (second, body) = server
        .post(&format!("/mentors/{ada}/students/{lin}"), None)
        .await;

    assert_eq!(first, 200);
    assert_eq!(second, 400);
    assert!(body["error"].as_str().expect("message").contains("already assigned"));

    let (_, mentor) = server.get(&format!("/mentors/{ada}")).await;
    assert_eq!(mentor["students"], json!([lin]));
}

#[tokio::test]
async fn test_bad_json_returns_400() {
    let server = spawn_test_server().await;

    let response = server
        .client
        .post(server.url("/mentors"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 400);
}

// ============================================================================
// Landing and health
// ============================================================================

#[tokio::test]
async fn test_landing_page_links_collections() {
    let server = spawn_test_server().await;

    let response = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status().as_u16(), 200);

    let html = response.text().await.expect("Body is not text");
    assert!(html.contains("/mentors"));
    assert!(html.contains("/students"));
}

#[tokio::test]
async fn test_health_reports_ok() {
    let server = spawn_test_server().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}
