//! mentorlink API
//!
//! HTTP surface and configuration for the mentorlink service: the axum
//! router over [`mentorlink_store::Store`], the environment-driven
//! [`Config`], and the landing page.

pub mod api;
pub mod config;
pub mod error;
mod landing;

pub use api::{create_router, AppState, ErrorResponse, HealthResponse};
pub use config::Config;
pub use error::{Result, ServiceError};
pub use landing::LANDING_PAGE;
