//! HTTP API endpoints for mentorlink.
//!
//! # Endpoints
//!
//! - `GET /` - Landing page
//! - `GET /health` - Store liveness check
//! - `GET /mentors`, `POST /mentors` - List or create mentors
//! - `GET /students`, `POST /students` - List or create students
//! - `GET /mentors/:mentorId`, `GET /students/:studentId` - Fetch one entity
//! - `POST /mentors/:mentorId/students/:studentId` - Assign a student
//! - `PUT /students/:studentId/mentor/:mentorId` - Reassign a student
//! - `GET /mentors/:mentorId/students` - A mentor's students, expanded
//! - `GET /students/:studentId/previous-mentor` - A student's previous mentor, expanded
//!
//! # Example
//!
//! ```no_run
//! use mentorlink_api::{create_router, AppState, Config};
//! use mentorlink_store::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let store = Store::open(config.store_location()).await?;
//! let router = create_router(AppState::new(store));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use mentorlink_store::{Mentor, NewMentor, NewStudent, RosterError, Store, Student};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info, warn};

use crate::landing;

// ============================================================================
// Response Types
// ============================================================================

/// Error response body returned on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Description of the error.
    pub error: String,
    /// Underlying error text, present on server errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response body for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when the store answered.
    pub status: String,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the mentor/student store.
    pub store: Store,
}

impl AppState {
    /// Creates a new `AppState` around an open store.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

// ============================================================================
// API Error Type
// ============================================================================

/// Internal error type for API handlers.
#[derive(Debug)]
enum ApiError {
    /// A referenced mentor or student does not exist.
    NotFound(String),
    /// The student already has a mentor.
    AlreadyAssigned(String),
    /// The request body was rejected before reaching a handler.
    Rejected { status: StatusCode, message: String },
    /// Any other failure, reported with a per-endpoint message.
    Internal {
        message: &'static str,
        details: String,
    },
    /// The store did not answer the health check.
    Unavailable(String),
}

impl ApiError {
    /// Returns a mapper from store errors to API errors for the given endpoint.
    ///
    /// `message` is only used when the error is not a client error.
    fn store(message: &'static str) -> impl FnOnce(RosterError) -> Self {
        move |err| match err {
            RosterError::MentorNotFound { .. } | RosterError::StudentNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            RosterError::AlreadyAssigned { .. } => Self::AlreadyAssigned(err.to_string()),
            other => {
                error!(error = %other, "{message}");
                Self::Internal {
                    message,
                    details: other.to_string(),
                }
            }
        }
    }

    /// Maps a rejected JSON body for the given entity.
    ///
    /// A body that parses but lacks the entity's shape is a validation
    /// failure; anything else keeps the rejection's own status.
    fn body(entity: &'static str, message: &'static str, rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                Self::store(message)(RosterError::validation(entity, err.body_text()))
            }
            other => {
                warn!(status = %other.status(), "Rejected {entity} body");
                Self::Rejected {
                    status: other.status(),
                    message: other.body_text(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            Self::AlreadyAssigned(msg) => (StatusCode::BAD_REQUEST, msg, None),
            Self::Rejected { status, message } => (status, message, None),
            Self::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message.to_string(),
                Some(details),
            ),
            Self::Unavailable(details) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Store unavailable".to_string(),
                Some(details),
            ),
        };

        let body = Json(ErrorResponse { error, details });
        (status, body).into_response()
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the HTTP router with all endpoints.
///
/// The router carries CORS middleware allowing any origin and tracing
/// middleware for request logging.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(landing::handle_index))
        .route("/health", get(handle_health))
        .route("/mentors", get(handle_list_mentors).post(handle_create_mentor))
        .route("/mentors/:mentorId", get(handle_get_mentor))
        .route("/mentors/:mentorId/students", get(handle_students_of_mentor))
        .route("/mentors/:mentorId/students/:studentId", post(handle_assign))
        .route("/students", get(handle_list_students).post(handle_create_student))
        .route("/students/:studentId", get(handle_get_student))
        .route("/students/:studentId/mentor/:mentorId", put(handle_reassign))
        .route(
            "/students/:studentId/previous-mentor",
            get(handle_previous_mentor),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for `GET /health`.
async fn handle_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    state.store.ping().await.map_err(|err| {
        error!(
            location = %state.store.location(),
            error = %err,
            "Health check failed"
        );
        ApiError::Unavailable(err.to_string())
    })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// Handler for `GET /mentors`.
async fn handle_list_mentors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Mentor>>, ApiError> {
    let mentors = state
        .store
        .list_mentors()
        .await
        .map_err(ApiError::store("Error fetching mentors"))?;
    Ok(Json(mentors))
}

/// Handler for `POST /mentors`.
async fn handle_create_mentor(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewMentor>, JsonRejection>,
) -> Result<(StatusCode, Json<Mentor>), ApiError> {
    const MESSAGE: &str = "Error creating mentor";

    let Json(fields) = payload.map_err(|rejection| ApiError::body("mentor", MESSAGE, rejection))?;
    info!(name = %fields.name, "Creating mentor");

    let mentor = state
        .store
        .create_mentor(fields)
        .await
        .map_err(ApiError::store(MESSAGE))?;
    Ok((StatusCode::CREATED, Json(mentor)))
}

/// Handler for `GET /mentors/:mentorId`.
async fn handle_get_mentor(
    State(state): State<Arc<AppState>>,
    Path(mentor_id): Path<String>,
) -> Result<Json<Mentor>, ApiError> {
    const MESSAGE: &str = "Error fetching mentor";

    state
        .store
        .find_mentor(&mentor_id)
        .await
        .map_err(ApiError::store(MESSAGE))?
        .map(Json)
        .ok_or_else(|| ApiError::store(MESSAGE)(RosterError::mentor_not_found(mentor_id)))
}

/// Handler for `GET /students`.
async fn handle_list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state
        .store
        .list_students()
        .await
        .map_err(ApiError::store("Error fetching students"))?;
    Ok(Json(students))
}

/// Handler for `POST /students`.
async fn handle_create_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    const MESSAGE: &str = "Error creating student";

    let Json(fields) =
        payload.map_err(|rejection| ApiError::body("student", MESSAGE, rejection))?;
    info!(name = %fields.name, "Creating student");

    let student = state
        .store
        .create_student(fields)
        .await
        .map_err(ApiError::store(MESSAGE))?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Handler for `GET /students/:studentId`.
async fn handle_get_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    const MESSAGE: &str = "Error fetching student";

    state
        .store
        .find_student(&student_id)
        .await
        .map_err(ApiError::store(MESSAGE))?
        .map(Json)
        .ok_or_else(|| ApiError::store(MESSAGE)(RosterError::student_not_found(student_id)))
}

/// Handler for `POST /mentors/:mentorId/students/:studentId`.
///
/// Responds with the mentor after the student joined its roster.
async fn handle_assign(
    State(state): State<Arc<AppState>>,
    Path((mentor_id, student_id)): Path<(String, String)>,
) -> Result<Json<Mentor>, ApiError> {
    info!(mentor_id = %mentor_id, student_id = %student_id, "Assigning student");

    let mentor = state
        .store
        .assign_student_to_mentor(&mentor_id, &student_id)
        .await
        .map_err(|err| {
            if err.is_client_error() {
                warn!(error = %err, "Assignment rejected");
            }
            ApiError::store("Error assigning student to mentor")(err)
        })?;
    Ok(Json(mentor))
}

/// Handler for `PUT /students/:studentId/mentor/:mentorId`.
///
/// Responds with the student after the change.
async fn handle_reassign(
    State(state): State<Arc<AppState>>,
    Path((student_id, mentor_id)): Path<(String, String)>,
) -> Result<Json<Student>, ApiError> {
    info!(student_id = %student_id, mentor_id = %mentor_id, "Reassigning student");

    let student = state
        .store
        .reassign_student_mentor(&student_id, &mentor_id)
        .await
        .map_err(|err| {
            if err.is_client_error() {
                warn!(error = %err, "Reassignment rejected");
            }
            ApiError::store("Error reassigning student mentor")(err)
        })?;
    Ok(Json(student))
}

/// Handler for `GET /mentors/:mentorId/students`.
async fn handle_students_of_mentor(
    State(state): State<Arc<AppState>>,
    Path(mentor_id): Path<String>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state
        .store
        .students_of_mentor(&mentor_id)
        .await
        .map_err(ApiError::store("Error fetching students of mentor"))?;
    debug!(mentor_id = %mentor_id, count = students.len(), "Expanded roster");
    Ok(Json(students))
}

/// Handler for `GET /students/:studentId/previous-mentor`.
///
/// Responds with `null` when the student was never reassigned.
async fn handle_previous_mentor(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<Option<Mentor>>, ApiError> {
    let mentor = state
        .store
        .previous_mentor_of(&student_id)
        .await
        .map_err(ApiError::store("Error fetching previous mentor"))?;
    Ok(Json(mentor))
}

// ============================================================================
// Tests
// ============================================================================
