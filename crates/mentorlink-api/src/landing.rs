//! Static landing page served at `GET /`.

use axum::response::Html;

/// HTML body of the landing page.
pub const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>mentorlink</title>
</head>
<body>
  <h1>mentorlink</h1>
  <p>Assign students to mentors and track who mentored whom.</p>
  <ul>
    <li><a href="/mentors">All mentors</a></li>
    <li><a href="/students">All students</a></li>
    <li><a href="/health">Health</a></li>
  </ul>
  <h2>Linking</h2>
  <ul>
    <li><code>POST /mentors/:mentorId/students/:studentId</code> assigns a student</li>
    <li><code>PUT /students/:studentId/mentor/:mentorId</code> reassigns a student</li>
    <li><code>GET /mentors/:mentorId/students</code> lists a mentor's students</li>
    <li><code>GET /students/:studentId/previous-mentor</code> shows the previous mentor</li>
  </ul>
</body>
</html>
"#;

/// Handler for `GET /`.
pub(crate) async fn handle_index() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
