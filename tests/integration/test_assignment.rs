//! Integration tests for assignment under concurrent requests.

mod common;

use common::spawn_test_server;
use serde_json::json;

/// Two mentors race to claim the same student; exactly one wins.
#[tokio::test]
async fn test_concurrent_assignment_has_one_winner() {
    let server = spawn_test_server().await;
    let ada = server.create("mentors", "Ada").await;
    let grace = server.create("mentors", "Grace").await;
    let lin = server.create("students", "Lin").await;

    let first_path = format!("/mentors/{ada}/students/{lin}");
    let second_path = format!("/mentors/{grace}/students/{lin}");
    let ((first, _), (second, _)) = futures::join!(
        server.post(&first_path, None),
        server.post(&second_path, None),
    );

    let mut statuses = [first, second];
    statuses.sort_unstable();
    assert_eq!(statuses, [200, 400]);

    let student = server
        .store
        .find_student(&lin)
        .await
        .expect("lookup failed")
        .expect("student exists");
    let winner = student.mentor.expect("student has a mentor");

    let mentors = server.store.list_mentors().await.expect("list failed");
    let holding: Vec<_> = mentors
        .iter()
        .filter(|m| m.students.contains(&lin))
        .map(|m| m.id.clone())
        .collect();
    assert_eq!(holding, vec![winner]);
}

/// Many students assigned to one mentor at once all land on the roster.
#[tokio::test]
async fn test_concurrent_assignments_of_distinct_students() {
    let server = spawn_test_server().await;
    let ada = server.create("mentors", "Ada").await;

    let mut students = Vec::new();
    for name in ["Lin", "Kai", "Noor", "Ravi"] {
        students.push(server.create("students", name).await);
    }

    let paths: Vec<String> = students
        .iter()
        .map(|s| format!("/mentors/{ada}/students/{s}"))
        .collect();
    let results = futures::future::join_all(paths.iter().map(|p| server.post(p, None))).await;
    assert!(results.iter().all(|(status, _)| *status == 200));

    let (_, mentor) = server.get(&format!("/mentors/{ada}")).await;
    let roster = mentor["students"].as_array().expect("roster array");
    assert_eq!(roster.len(), students.len());
    for id in &students {
        assert!(roster.contains(&json!(id)), "{id} missing from roster");
    }
}

/// Reassignment leaves every student on exactly one roster.
#[tokio::test]
async fn test_reassignment_keeps_rosters_consistent() {
    let server = spawn_test_server().await;
    let ada = server.create("mentors", "Ada").await;
    let grace = server.create("mentors", "Grace").await;
    let lin = server.create("students", "Lin").await;
    let kai = server.create("students", "Kai").await;

    server.post(&format!("/mentors/{ada}/students/{lin}"), None).await;
    server.post(&format!("/mentors/{ada}/students/{kai}"), None).await;

    let lin_path = format!("/students/{lin}/mentor/{grace}");
    let kai_path = format!("/students/{kai}/mentor/{grace}");
    let ((lin_status, _), (kai_status, _)) =
        futures::join!(server.put(&lin_path), server.put(&kai_path));
    assert_eq!((lin_status, kai_status), (200, 200));

    let (_, ada_students) = server.get(&format!("/mentors/{ada}/students")).await;
    assert_eq!(ada_students, json!([]));

    let (_, grace_body) = server.get(&format!("/mentors/{grace}")).await;
    assert_eq!(grace_body["students"].as_array().expect("roster").len(), 2);

    for id in [&lin, &kai] {
        let (_, previous) = server.get(&format!("/students/{id}/previous-mentor")).await;
        assert_eq!(previous["id"], ada.as_str());
    }
}
